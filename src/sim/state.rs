//! Game state and entity types
//!
//! `GameState` owns every entity collection. Entities never hold references to
//! each other or to the world: a powerup names its platform by id, and every
//! update that needs world data receives it as a parameter.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::mask::Mask;
use super::rect::Rect;
use crate::consts::*;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Collections built, waiting for `begin`
    Starting,
    /// Ticking
    Playing,
    /// Terminal condition reached
    Ended,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    MobCollision,
    OutOfPlatforms,
    Quit,
}

/// Discrete cues raised for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Jump,
    Boost,
    MusicStart,
    MusicStop,
}

/// Player animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerFrame {
    Standing(usize),
    WalkRight(usize),
    WalkLeft(usize),
}

impl PlayerFrame {
    pub fn size(&self) -> (f32, f32) {
        match *self {
            PlayerFrame::Standing(i) => PLAYER_STANDING_FRAMES[i % PLAYER_STANDING_FRAMES.len()],
            PlayerFrame::WalkRight(i) | PlayerFrame::WalkLeft(i) => {
                PLAYER_WALK_FRAMES[i % PLAYER_WALK_FRAMES.len()]
            }
        }
    }
}

fn silhouette((w, h): (f32, f32)) -> Mask {
    Mask::ellipse(w as usize, h as usize)
}

/// The player sprite
#[derive(Debug, Clone)]
pub struct Player {
    /// Midbottom anchor of the sprite
    pub pos: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
    pub jumping: bool,
    pub walking: bool,
    pub current_frame: usize,
    /// Clock value (ms) of the last animation frame change
    pub last_update: u64,
    pub frame: PlayerFrame,
    pub rect: Rect,
    pub mask: Mask,
    /// Cleared once the fall-through shift pushes the sprite off the top
    pub visible: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        let frame = PlayerFrame::Standing(0);
        let (w, h) = frame.size();
        let start = Vec2::new(PLAYER_START.0, PLAYER_START.1);
        let mut rect = Rect::sized(w, h);
        rect.set_center(start);
        Self {
            pos: start,
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            jumping: false,
            walking: false,
            current_frame: 0,
            last_update: 0,
            frame,
            rect,
            mask: silhouette((w, h)),
            visible: true,
        }
    }

    /// Re-anchor the hitbox to the current position
    pub fn sync_rect(&mut self) {
        self.rect.set_midbottom(self.pos);
    }

    fn set_frame(&mut self, frame: PlayerFrame) {
        let (w, h) = frame.size();
        if frame.size() != self.frame.size() {
            self.mask = silhouette((w, h));
        }
        self.frame = frame;
        self.rect.resize_keep_bottom(w, h);
    }

    /// Start a jump if standing on a platform.
    ///
    /// Returns true when the jump happened (the caller plays the jump cue).
    pub fn jump(&mut self, platforms: &[Platform]) -> bool {
        let grounded = super::collision::probe_overlap(
            &self.rect,
            Vec2::new(JUMP_PROBE_OFFSET, 0.0),
            platforms.iter().map(|p| &p.rect),
        );
        if grounded && !self.jumping {
            self.jumping = true;
            self.vel.y = -JUMP_COEFFICIENT;
            return true;
        }
        false
    }

    /// Shorten a rising jump when the jump key is released
    pub fn jump_cut(&mut self) {
        if self.jumping && self.vel.y < -JUMP_CUT_SPEED {
            self.vel.y = -JUMP_CUT_SPEED;
        }
    }

    /// Animate, integrate one tick of motion, and wrap horizontally
    pub fn update(&mut self, left: bool, right: bool, now_ms: u64) {
        self.animate(now_ms);

        self.acc = Vec2::new(0.0, GRAVITY);
        if left {
            self.acc.x = -PLAYER_ACCELERATION;
        }
        if right {
            self.acc.x = PLAYER_ACCELERATION;
        }
        self.acc.x += self.vel.x * PLAYER_FRICTION;

        self.vel += self.acc;
        if self.vel.x.abs() < VELOCITY_EPSILON {
            self.vel.x = 0.0;
        }
        self.pos += self.vel + 0.5 * self.acc;

        let half = self.rect.w / 2.0;
        if self.pos.x > WIDTH + half {
            self.pos.x = -half;
        }
        if self.pos.x < -half {
            self.pos.x = WIDTH + half;
        }

        self.sync_rect();
    }

    fn animate(&mut self, now_ms: u64) {
        self.walking = self.vel.x != 0.0;

        if self.walking && now_ms.saturating_sub(self.last_update) > WALK_FRAME_MS {
            self.last_update = now_ms;
            self.current_frame = (self.current_frame + 1) % PLAYER_WALK_FRAMES.len();
            let frame = if self.vel.x > 0.0 {
                PlayerFrame::WalkRight(self.current_frame)
            } else {
                PlayerFrame::WalkLeft(self.current_frame)
            };
            self.set_frame(frame);
        }

        if !self.jumping
            && !self.walking
            && now_ms.saturating_sub(self.last_update) > IDLE_FRAME_MS
        {
            self.last_update = now_ms;
            self.current_frame = (self.current_frame + 1) % PLAYER_STANDING_FRAMES.len();
            self.set_frame(PlayerFrame::Standing(self.current_frame));
        }
    }
}

/// A platform the player can land on
#[derive(Debug, Clone)]
pub struct Platform {
    pub id: u32,
    pub rect: Rect,
}

/// Powerup types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerupKind {
    Boost,
}

/// A powerup resting on a platform
#[derive(Debug, Clone)]
pub struct Powerup {
    pub id: u32,
    pub kind: PowerupKind,
    /// Owning platform (non-owning handle)
    pub platform_id: u32,
    pub rect: Rect,
}

impl Powerup {
    pub fn new(id: u32, kind: PowerupKind, platform: &Platform) -> Self {
        let mut rect = Rect::sized(POWERUP_SIZE.0, POWERUP_SIZE.1);
        rect.set_centerx(platform.rect.centerx());
        rect.set_bottom(platform.rect.top() - POWERUP_GAP);
        Self {
            id,
            kind,
            platform_id: platform.id,
            rect,
        }
    }

    /// Follow the owning platform. Returns false once the platform is gone.
    pub fn update(&mut self, platforms: &[Platform]) -> bool {
        match platforms.iter().find(|p| p.id == self.platform_id) {
            Some(platform) => {
                self.rect.set_bottom(platform.rect.top() - POWERUP_GAP);
                true
            }
            None => false,
        }
    }
}

/// A flying enemy crossing the screen
#[derive(Debug, Clone)]
pub struct Mob {
    pub id: u32,
    pub rect: Rect,
    pub vel_x: f32,
    pub vel_y: f32,
    /// Per-tick change of `vel_y`; flips sign at the limits
    pub delta_y: f32,
    pub mask: Mask,
}

impl Mob {
    pub fn new(id: u32, rng: &mut impl Rng) -> Self {
        let mut rect = Rect::sized(MOB_UP_SIZE.0, MOB_UP_SIZE.1);
        let from_left = rng.random_bool(0.5);
        let cx = if from_left {
            -MOB_SPAWN_MARGIN
        } else {
            WIDTH + MOB_SPAWN_MARGIN
        };
        rect.set_centerx(cx);
        let mut vel_x = rng.random_range(1..4) as f32;
        if !from_left {
            vel_x = -vel_x;
        }
        rect.y = rng.random_range(0..(HEIGHT / 2.0) as i32) as f32;
        Self {
            id,
            rect,
            vel_x,
            vel_y: 0.0,
            delta_y: MOB_VERTICAL_STEP,
            mask: silhouette(MOB_UP_SIZE),
        }
    }

    /// Wings up while rising
    pub fn facing_up(&self) -> bool {
        self.delta_y < 0.0
    }

    /// Advance one tick. Returns false once the mob has left the screen.
    pub fn update(&mut self) -> bool {
        self.rect.x += self.vel_x;
        self.vel_y += self.delta_y;
        if self.vel_y > MOB_VERTICAL_LIMIT || self.vel_y < -MOB_VERTICAL_LIMIT {
            self.delta_y = -self.delta_y;
        }

        let size = if self.facing_up() {
            MOB_UP_SIZE
        } else {
            MOB_DOWN_SIZE
        };
        if (self.rect.w, self.rect.h) != size {
            self.rect.resize_keep_center(size.0, size.1);
            self.mask = silhouette(size);
        }
        self.rect.y += self.vel_y;

        !(self.rect.left() > WIDTH + MOB_SPAWN_MARGIN || self.rect.right() < -MOB_SPAWN_MARGIN)
    }
}

/// Background decoration
#[derive(Debug, Clone)]
pub struct Cloud {
    pub id: u32,
    /// Index into `CLOUD_SIZES`
    pub image: usize,
    pub scale: f32,
    pub rect: Rect,
}

impl Cloud {
    /// The hitbox keeps the unscaled image size; only the drawn image shrinks.
    pub fn new(id: u32, rng: &mut impl Rng) -> Self {
        let image = rng.random_range(0..CLOUD_SIZES.len());
        let (w, h) = CLOUD_SIZES[image];
        let scale = rng.random_range(50..101) as f32 / 100.0;
        let x = rng.random_range(0..(WIDTH - w) as i32) as f32;
        let y = rng.random_range(-500..-50) as f32;
        Self {
            id,
            image,
            scale,
            rect: Rect::new(x, y, w, h),
        }
    }

    /// Scaled image area, anchored at the hitbox's top-left corner
    pub fn drawn_rect(&self) -> Rect {
        Rect::new(
            self.rect.x,
            self.rect.y,
            (self.rect.w * self.scale).floor(),
            (self.rect.h * self.scale).floor(),
        )
    }

    /// Returns false once the cloud has drifted far below the screen
    pub fn update(&mut self) -> bool {
        self.rect.top() <= HEIGHT * 2.0
    }
}

/// Complete session state (the world)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub score: u64,
    pub phase: GamePhase,
    pub end_reason: Option<EndReason>,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub powerups: Vec<Powerup>,
    pub mobs: Vec<Mob>,
    pub clouds: Vec<Cloud>,
    /// Clock value (ms) of the last mob spawn
    pub mob_timer: u64,
    /// Set when the player asked to close the game
    pub quit_requested: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Build a fresh session: player, starting platforms, and clouds
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            phase: GamePhase::Starting,
            end_reason: None,
            player: Player::new(),
            platforms: Vec::new(),
            powerups: Vec::new(),
            mobs: Vec::new(),
            clouds: Vec::new(),
            mob_timer: 0,
            quit_requested: false,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        };

        for &(x, y) in PLATFORM_LIST.iter() {
            state.spawn_platform(x, y);
        }
        for _ in 0..INITIAL_CLOUDS {
            let cloud = state.spawn_cloud();
            cloud.rect.y += INITIAL_CLOUD_OFFSET;
        }

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Enter the playing phase and start the gameplay music
    pub fn begin(&mut self) {
        if self.phase == GamePhase::Starting {
            self.phase = GamePhase::Playing;
            self.push_event(GameEvent::MusicStart);
            log::info!("Session started (seed {})", self.seed);
        }
    }

    /// End the session. Only the first terminal condition is recorded.
    pub fn end(&mut self, reason: EndReason) {
        if self.phase != GamePhase::Ended {
            self.phase = GamePhase::Ended;
            self.end_reason = Some(reason);
            self.push_event(GameEvent::MusicStop);
            log::info!("Session ended: {:?}, score {}", reason, self.score);
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Spawn a platform with its top-left corner at (x, y), possibly carrying a powerup
    pub fn spawn_platform(&mut self, x: f32, y: f32) -> u32 {
        let id = self.next_entity_id();
        let (w, h) = PLATFORM_SIZES[self.rng.random_range(0..PLATFORM_SIZES.len())];
        let platform = Platform {
            id,
            rect: Rect::new(x, y, w, h),
        };
        if self.rng.random_range(0..100) < POWERUP_SPAWN_PERCENTAGE {
            let powerup_id = self.next_entity_id();
            self.powerups
                .push(Powerup::new(powerup_id, PowerupKind::Boost, &platform));
        }
        self.platforms.push(platform);
        id
    }

    pub fn spawn_cloud(&mut self) -> &mut Cloud {
        let id = self.next_entity_id();
        let cloud = Cloud::new(id, &mut self.rng);
        self.clouds.push(cloud);
        let last = self.clouds.len() - 1;
        &mut self.clouds[last]
    }

    pub fn spawn_mob(&mut self) {
        let id = self.next_entity_id();
        let mob = Mob::new(id, &mut self.rng);
        log::debug!(
            "Mob {} spawned at x={} heading {}",
            id,
            mob.rect.centerx(),
            if mob.vel_x > 0.0 { "right" } else { "left" }
        );
        self.mobs.push(mob);
    }
}
