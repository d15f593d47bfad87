//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One tick per frame, clock passed in by the caller
//! - Seeded RNG only
//! - No rendering, audio, or terminal dependencies

pub mod collision;
pub mod mask;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{find_landing_platform, mask_collide, probe_overlap};
pub use mask::Mask;
pub use rect::Rect;
pub use state::{
    Cloud, EndReason, GameEvent, GamePhase, GameState, Mob, Platform, Player, PlayerFrame,
    Powerup, PowerupKind,
};
pub use tick::{TickInput, tick};
