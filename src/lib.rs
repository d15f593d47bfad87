//! Jumpy - an endless vertical platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, spawning, score)
//! - `renderer`: Terminal rendering of the world and text screens
//! - `platform`: Terminal input and frame timing
//! - `highscores`: Single-integer high score file
//! - `settings`: JSON configuration
//! - `ui`: Start / game-over screen models

pub mod audio;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use highscores::HighScore;
pub use settings::Settings;

pub use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use std::ops::Range;

    pub const TITLE: &str = "Jumpy!";

    /// Screen dimensions (world pixels)
    pub const WIDTH: f32 = 480.0;
    pub const HEIGHT: f32 = 600.0;
    /// Target frame rate; one simulation tick per frame
    pub const FPS: u32 = 60;

    pub const HIGHSCORE_FILE: &str = "highscore.txt";

    /// Player physics (per tick)
    pub const PLAYER_ACCELERATION: f32 = 0.5;
    pub const PLAYER_FRICTION: f32 = -0.12;
    pub const GRAVITY: f32 = 0.5;
    pub const JUMP_COEFFICIENT: f32 = 20.0;
    /// Upward speed a released jump is cut down to
    pub const JUMP_CUT_SPEED: f32 = 3.0;
    /// Horizontal speeds below this snap to zero
    pub const VELOCITY_EPSILON: f32 = 0.1;
    pub const PLAYER_START: (f32, f32) = (40.0, HEIGHT - 100.0);

    /// Ground probe nudge for jump checks
    pub const JUMP_PROBE_OFFSET: f32 = 2.0;
    /// Horizontal overhang tolerated when landing
    pub const LANDING_TOLERANCE: f32 = 10.0;

    /// Gameplay
    pub const BOOST_POWER: f32 = 60.0;
    pub const POWERUP_SPAWN_PERCENTAGE: u32 = 7;
    pub const POWERUP_GAP: f32 = 5.0;
    pub const MOB_FREQUENCY_MS: u64 = 5000;
    pub const MOB_JITTER_MS: [i64; 5] = [-1000, -500, 0, 500, 1000];
    pub const MOB_SPAWN_MARGIN: f32 = 100.0;
    pub const MOB_VERTICAL_STEP: f32 = 0.5;
    pub const MOB_VERTICAL_LIMIT: f32 = 3.0;
    pub const MIN_PLATFORMS: usize = 6;
    /// Replenished platforms: drawn width (positions x) and top edge above the screen
    pub const PLATFORM_SPAWN_WIDTH: Range<i32> = 50..100;
    pub const PLATFORM_SPAWN_Y: Range<i32> = -75..-30;
    pub const PLATFORM_SCORE: u64 = 10;
    pub const INITIAL_CLOUDS: usize = 8;
    pub const INITIAL_CLOUD_OFFSET: f32 = 500.0;
    pub const CLOUD_SPAWN_PERCENTAGE: u32 = 10;
    /// Minimum per-tick scroll while reframing upward
    pub const MIN_SCROLL: f32 = 2.0;
    /// Minimum per-tick shift while the player falls off the bottom
    pub const MIN_FALL_SHIFT: f32 = 10.0;

    /// Animation intervals (ms)
    pub const WALK_FRAME_MS: u64 = 200;
    pub const IDLE_FRAME_MS: u64 = 350;

    /// Draw layers (lower draws first)
    pub const CLOUD_LAYER: u8 = 0;
    pub const PLATFORM_LAYER: u8 = 1;
    pub const POWERUP_LAYER: u8 = 1;
    pub const PLAYER_LAYER: u8 = 2;
    pub const MOB_LAYER: u8 = 2;

    /// Starting platform layout (top-left corners)
    pub const PLATFORM_LIST: [(f32, f32); 5] = [
        (0.0, HEIGHT - 60.0),
        (WIDTH / 2.0 - 50.0, HEIGHT * 3.0 / 4.0),
        (WIDTH / 4.0, HEIGHT / 3.0),
        (5.0 / 6.0 * WIDTH, 1.0 / 2.0 * HEIGHT),
        (2.0 / 3.0 * WIDTH, 1.0 / 8.0 * HEIGHT),
    ];

    /// Sprite frame sizes (sprite sheet cuts at half scale)
    pub const PLAYER_STANDING_FRAMES: [(f32, f32); 2] = [(60.0, 95.0), (60.0, 100.0)];
    pub const PLAYER_WALK_FRAMES: [(f32, f32); 2] = [(60.0, 100.0), (60.0, 103.0)];
    pub const PLATFORM_SIZES: [(f32, f32); 2] = [(190.0, 47.0), (100.0, 50.0)];
    pub const POWERUP_SIZE: (f32, f32) = (35.0, 35.0);
    pub const MOB_UP_SIZE: (f32, f32) = (61.0, 69.0);
    pub const MOB_DOWN_SIZE: (f32, f32) = (61.0, 67.0);
    pub const CLOUD_SIZES: [(f32, f32); 3] = [(129.0, 71.0), (129.0, 71.0), (146.0, 64.0)];
}
