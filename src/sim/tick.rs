//! Per-frame simulation tick
//!
//! One call advances the world by one frame. Steps run in a fixed order and
//! later steps see the results of earlier ones within the same tick.

use glam::Vec2;
use rand::Rng;

use super::collision::{find_landing_platform, mask_collide, rects_overlap};
use super::state::{EndReason, GameEvent, GamePhase, GameState, PowerupKind};
use crate::consts::*;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Left arrow held
    pub left: bool,
    /// Right arrow held
    pub right: bool,
    /// Jump key went down this frame
    pub jump_pressed: bool,
    /// Jump key went up this frame
    pub jump_released: bool,
    /// Window close / quit key
    pub quit: bool,
}

/// Advance the game state by one frame.
///
/// `now_ms` is the external clock (milliseconds since program start); it
/// drives animation frames and the mob spawn timer.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: u64) {
    if input.quit {
        state.quit_requested = true;
        state.end(EndReason::Quit);
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    if input.jump_pressed && state.player.jump(&state.platforms) {
        state.push_event(GameEvent::Jump);
    }
    if input.jump_released {
        state.player.jump_cut();
    }

    state.time_ticks += 1;

    update_entities(state, input, now_ms);
    maybe_spawn_mob(state, now_ms);
    check_mob_hits(state);
    resolve_platform_landing(state);

    if state.player.rect.top() <= HEIGHT / 4.0 {
        scroll_world(state);
    }

    collect_powerups(state);

    if state.player.rect.bottom() > HEIGHT {
        handle_fall(state);
    }

    // Only reachable through the fall-through culling above
    if state.platforms.is_empty() {
        state.end(EndReason::OutOfPlatforms);
    }

    replenish_platforms(state);
}

/// Run every entity's own update and drop the ones that expired
pub fn update_entities(state: &mut GameState, input: &TickInput, now_ms: u64) {
    state.clouds.retain_mut(|cloud| cloud.update());

    let platforms = &state.platforms;
    state.powerups.retain_mut(|powerup| powerup.update(platforms));

    state.player.update(input.left, input.right, now_ms);

    state.mobs.retain_mut(|mob| mob.update());
}

/// Spawn a mob once the jittered interval has elapsed since the last one
pub fn maybe_spawn_mob(state: &mut GameState, now_ms: u64) {
    let jitter = MOB_JITTER_MS[state.rng.random_range(0..MOB_JITTER_MS.len())];
    let interval = (MOB_FREQUENCY_MS as i64 + jitter) as u64;
    if now_ms.saturating_sub(state.mob_timer) > interval {
        state.mob_timer = now_ms;
        state.spawn_mob();
    }
}

/// Any pixel contact with a mob ends the session
pub fn check_mob_hits(state: &mut GameState) -> bool {
    let player = &state.player;
    let hit = state
        .mobs
        .iter()
        .any(|mob| mask_collide(&player.rect, &player.mask, &mob.rect, &mob.mask));
    if hit {
        state.end(EndReason::MobCollision);
    }
    hit
}

/// Land a falling player on the lowest overlapping platform.
///
/// The player's feet must be above the platform's vertical center and its
/// anchor within `LANDING_TOLERANCE` of the platform's horizontal extent.
pub fn resolve_platform_landing(state: &mut GameState) -> bool {
    let player = &mut state.player;
    if player.vel.y <= 0.0 {
        return false;
    }

    let Some(index) = find_landing_platform(&player.rect, state.platforms.iter().map(|p| &p.rect))
    else {
        return false;
    };
    let lowest = &state.platforms[index].rect;

    let within_x = player.pos.x < lowest.right() + LANDING_TOLERANCE
        && player.pos.x > lowest.left() - LANDING_TOLERANCE;
    if within_x && player.pos.y < lowest.centery() {
        player.pos.y = lowest.top();
        player.vel.y = 0.0;
        player.jumping = false;
        return true;
    }
    false
}

/// Move the world down to follow a player in the top quarter of the screen.
///
/// Platforms pushed past the bottom are removed and score points.
pub fn scroll_world(state: &mut GameState) {
    if state.rng.random_range(0..100) < CLOUD_SPAWN_PERCENTAGE {
        state.spawn_cloud();
    }

    let vel_y = state.player.vel.y;
    let shift = vel_y.abs().max(MIN_SCROLL);
    let cloud_shift = (vel_y / 2.0).abs().max(MIN_SCROLL);

    state.player.pos.y += shift;
    for cloud in &mut state.clouds {
        cloud.rect.y += cloud_shift;
    }
    for mob in &mut state.mobs {
        mob.rect.y += shift;
    }

    let mut scrolled_off = 0u64;
    state.platforms.retain_mut(|platform| {
        platform.rect.y += shift;
        if platform.rect.top() >= HEIGHT {
            scrolled_off += 1;
            false
        } else {
            true
        }
    });
    state.score += scrolled_off * PLATFORM_SCORE;
}

/// Pick up every powerup touching the player
pub fn collect_powerups(state: &mut GameState) {
    let player_rect = state.player.rect;
    let mut collected = Vec::new();
    state.powerups.retain(|powerup| {
        if rects_overlap(&powerup.rect, &player_rect) {
            collected.push(powerup.kind);
            false
        } else {
            true
        }
    });

    for kind in collected {
        match kind {
            PowerupKind::Boost => {
                state.push_event(GameEvent::Boost);
                state.player.vel.y = -BOOST_POWER;
                state.player.jumping = false;
            }
        }
    }
}

/// Shift everything up while the player drops below the screen.
///
/// Entities pushed above the top edge are removed without scoring. The
/// player's hitbox moves but its position does not, so the shift repeats
/// every tick until the platforms run out.
pub fn handle_fall(state: &mut GameState) {
    let shift = Vec2::new(0.0, -state.player.vel.y.max(MIN_FALL_SHIFT));

    state.player.rect.translate(shift);
    if state.player.rect.bottom() < 0.0 {
        state.player.visible = false;
    }

    state.clouds.retain_mut(|cloud| {
        cloud.rect.translate(shift);
        cloud.rect.bottom() >= 0.0
    });
    state.platforms.retain_mut(|platform| {
        platform.rect.translate(shift);
        platform.rect.bottom() >= 0.0
    });
    state.powerups.retain_mut(|powerup| {
        powerup.rect.translate(shift);
        powerup.rect.bottom() >= 0.0
    });
    state.mobs.retain_mut(|mob| {
        mob.rect.translate(shift);
        mob.rect.bottom() >= 0.0
    });
}

/// Spawn platforms just above the screen until the minimum count is alive
pub fn replenish_platforms(state: &mut GameState) {
    while state.platforms.len() < MIN_PLATFORMS {
        let width = state.rng.random_range(PLATFORM_SPAWN_WIDTH);
        let x = state.rng.random_range(0..(WIDTH as i32 - width)) as f32;
        let y = state.rng.random_range(PLATFORM_SPAWN_Y) as f32;
        state.spawn_platform(x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rect::Rect;
    use crate::sim::state::{Mob, Platform, Powerup};
    use proptest::prelude::*;

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.begin();
        state.drain_events();
        state
    }

    fn platform_alive(state: &GameState, id: u32) -> bool {
        state.platforms.iter().any(|p| p.id == id)
    }

    /// Keep only the starting platform at (0, 540)
    fn single_ground(state: &mut GameState) -> Rect {
        state.platforms.truncate(1);
        state.powerups.clear();
        state.platforms[0].rect
    }

    #[test]
    fn test_tick_requires_begin() {
        let mut state = GameState::new(1);
        tick(&mut state, &TickInput::default(), 16);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.platforms.len(), PLATFORM_LIST.len());

        state.begin();
        tick(&mut state, &TickInput::default(), 32);
        assert_eq!(state.time_ticks, 1);
        assert!(state.platforms.len() >= MIN_PLATFORMS);
    }

    #[test]
    fn test_jump_without_ground_is_ignored() {
        let mut state = playing(3);
        // Open air: no starting platform under x=40, y=100
        state.player.pos = Vec2::new(40.0, 100.0);
        state.player.sync_rect();

        assert!(!state.player.jump(&state.platforms));
        assert!(!state.player.jumping);
        assert_eq!(state.player.vel.y, 0.0);
    }

    #[test]
    fn test_jump_from_ground_emits_event() {
        let mut state = playing(4);
        // Spawned player overlaps the starting floor at y=540
        let input = TickInput {
            jump_pressed: true,
            ..Default::default()
        };
        tick(&mut state, &input, 16);
        assert!(state.player.jumping);
        assert!(state.player.vel.y < 0.0);
        assert_eq!(state.drain_events(), vec![GameEvent::Jump]);
    }

    #[test]
    fn test_landing_snaps_to_platform_top() {
        let mut state = playing(5);
        let ground = single_ground(&mut state);
        assert_eq!(ground.top_left(), Vec2::new(0.0, 540.0));

        state.player.pos = Vec2::new(ground.right() + 5.0, 550.0);
        state.player.sync_rect();
        state.player.vel.y = 5.0;
        state.player.jumping = true;

        assert!(resolve_platform_landing(&mut state));
        assert_eq!(state.player.pos.y, ground.top());
        assert_eq!(state.player.vel.y, 0.0);
        assert!(!state.player.jumping);
    }

    #[test]
    fn test_no_landing_outside_tolerance_or_when_rising() {
        let mut state = playing(6);
        let ground = single_ground(&mut state);

        // Hitbox overlaps but the anchor overhangs by more than 10px
        state.player.pos = Vec2::new(ground.right() + 15.0, 550.0);
        state.player.sync_rect();
        state.player.vel.y = 5.0;
        assert!(!resolve_platform_landing(&mut state));
        assert_eq!(state.player.pos.y, 550.0);

        // Rising through the platform
        state.player.pos = Vec2::new(50.0, 550.0);
        state.player.sync_rect();
        state.player.vel.y = -5.0;
        assert!(!resolve_platform_landing(&mut state));
        assert_eq!(state.player.vel.y, -5.0);

        // Feet below the platform's center
        state.player.pos = Vec2::new(50.0, ground.centery() + 1.0);
        state.player.sync_rect();
        state.player.vel.y = 5.0;
        assert!(!resolve_platform_landing(&mut state));
    }

    #[test]
    fn test_scroll_scores_platforms_pushed_off_bottom() {
        let mut state = playing(7);
        state.platforms.clear();
        state.powerups.clear();
        let low = state.spawn_platform(0.0, HEIGHT - 5.0);
        let high = state.spawn_platform(200.0, 100.0);
        state.player.vel.y = -10.0;
        let before_y = state.player.pos.y;

        scroll_world(&mut state);

        assert_eq!(state.score, PLATFORM_SCORE);
        assert!(!platform_alive(&state, low));
        assert!(platform_alive(&state, high));
        assert_eq!(state.platforms[0].rect.y, 110.0);
        assert_eq!(state.player.pos.y, before_y + 10.0);
    }

    #[test]
    fn test_scroll_uses_minimum_shift() {
        let mut state = playing(8);
        state.player.vel.y = 0.5;
        let mob_id = state.next_entity_id();
        let mut mob = Mob::new(mob_id, &mut state.rng);
        mob.rect.y = 10.0;
        state.mobs.push(mob);
        let cloud_ys: Vec<f32> = state.clouds.iter().map(|c| c.rect.y).collect();

        scroll_world(&mut state);

        assert_eq!(state.mobs[0].rect.y, 12.0);
        for (cloud, before) in state.clouds.iter().zip(cloud_ys) {
            assert_eq!(cloud.rect.y, before + MIN_SCROLL);
        }
    }

    #[test]
    fn test_boost_overrides_velocity() {
        let mut state = playing(9);
        let ground = single_ground(&mut state);
        let platform = Platform {
            id: state.platforms[0].id,
            rect: ground,
        };
        let id = state.next_entity_id();
        let mut powerup = Powerup::new(id, PowerupKind::Boost, &platform);
        powerup.rect.set_center(state.player.rect.center());
        state.powerups.push(powerup);
        state.player.vel.y = 12.0;
        state.player.jumping = true;

        collect_powerups(&mut state);

        assert!(state.powerups.is_empty());
        assert_eq!(state.player.vel.y, -BOOST_POWER);
        assert!(!state.player.jumping);
        assert_eq!(state.drain_events(), vec![GameEvent::Boost]);
    }

    #[test]
    fn test_mob_contact_ends_session() {
        let mut state = playing(10);
        let id = state.next_entity_id();
        let mut mob = Mob::new(id, &mut state.rng);
        mob.rect.set_center(state.player.rect.center());
        state.mobs.push(mob);

        assert!(check_mob_hits(&mut state));
        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(state.end_reason, Some(EndReason::MobCollision));
    }

    #[test]
    fn test_mob_spawn_interval() {
        let mut state = playing(11);
        maybe_spawn_mob(&mut state, 3000);
        assert!(state.mobs.is_empty());

        maybe_spawn_mob(&mut state, 6001);
        assert_eq!(state.mobs.len(), 1);
        assert_eq!(state.mob_timer, 6001);

        maybe_spawn_mob(&mut state, 6500);
        assert_eq!(state.mobs.len(), 1);
    }

    #[test]
    fn test_mob_spawn_jitter_bounds() {
        let mut at_midpoint = 0;
        for seed in 0..500 {
            // Shortest interval is 4000ms and the test is strict
            let mut state = playing(seed);
            maybe_spawn_mob(&mut state, 4000);
            assert!(state.mobs.is_empty());

            // Longest interval is 6000ms
            let mut state = playing(seed);
            maybe_spawn_mob(&mut state, 6001);
            assert_eq!(state.mobs.len(), 1);

            // Only the -1000 and -500 offsets fire at exactly 5000ms
            let mut state = playing(seed);
            maybe_spawn_mob(&mut state, 5000);
            at_midpoint += state.mobs.len();
        }
        assert!((150..=250).contains(&at_midpoint), "{} spawns", at_midpoint);
    }

    #[test]
    fn test_replenish_spawn_band() {
        for seed in 0..50 {
            let mut state = playing(seed);
            state.platforms.clear();
            state.powerups.clear();

            replenish_platforms(&mut state);

            assert_eq!(state.platforms.len(), MIN_PLATFORMS);
            for platform in &state.platforms {
                let (x, y) = (platform.rect.x, platform.rect.y);
                assert_eq!(x, x.floor());
                assert!(x >= 0.0 && x < WIDTH - PLATFORM_SPAWN_WIDTH.start as f32);
                assert!(y >= PLATFORM_SPAWN_Y.start as f32 && y < PLATFORM_SPAWN_Y.end as f32);
                assert!(PLATFORM_SIZES.contains(&(platform.rect.w, platform.rect.h)));
            }
        }
    }

    #[test]
    fn test_scroll_cloud_spawn_rate() {
        let mut state = playing(15);
        state.player.vel.y = -4.0;
        let before = state.clouds.len();
        let samples = 2000;
        for _ in 0..samples {
            scroll_world(&mut state);
        }
        // 10% of 2000 is 200; allow about four standard deviations
        let spawned = state.clouds.len() - before;
        assert!((145..=255).contains(&spawned), "{} clouds", spawned);
    }

    #[test]
    fn test_fall_culls_without_scoring() {
        let mut state = playing(12);
        state.platforms.clear();
        state.clouds.clear();
        state.mobs.clear();
        let top = state.spawn_platform(0.0, 0.0);
        let lower = state.spawn_platform(0.0, 400.0);
        state.powerups.clear();

        let kept_platform = state.platforms[1].clone();
        let id = state.next_entity_id();
        state
            .powerups
            .push(Powerup::new(id, PowerupKind::Boost, &kept_platform));
        let mut high_powerup = Powerup::new(id + 1, PowerupKind::Boost, &kept_platform);
        high_powerup.rect.y = 0.0;
        state.powerups.push(high_powerup);

        for y in [200.0, -20.0] {
            let cloud = state.spawn_cloud();
            cloud.rect.y = y;
        }
        for y in [100.0, -20.0] {
            let id = state.next_entity_id();
            let mut mob = Mob::new(id, &mut state.rng);
            mob.rect.y = y;
            state.mobs.push(mob);
        }

        state.player.rect.y = HEIGHT;
        state.player.vel.y = 60.0;
        let pos = state.player.pos;

        handle_fall(&mut state);

        assert!(!platform_alive(&state, top));
        assert!(platform_alive(&state, lower));
        assert_eq!(state.platforms[0].rect.y, 340.0);
        assert_eq!(state.powerups.len(), 1);
        assert_eq!(state.powerups[0].rect.bottom(), 335.0);
        assert_eq!(state.clouds.len(), 1);
        assert_eq!(state.clouds[0].rect.y, 140.0);
        assert_eq!(state.mobs.len(), 1);
        assert_eq!(state.mobs[0].rect.y, 40.0);
        // Hitbox moved, anchor did not
        assert_eq!(state.player.rect.y, HEIGHT - 60.0);
        assert_eq!(state.player.pos, pos);
        assert!(state.player.visible);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_falling_off_ends_when_platforms_run_out() {
        let mut state = playing(13);
        state.mobs.clear();
        state.player.pos = Vec2::new(240.0, HEIGHT + 200.0);
        state.player.vel.y = 30.0;

        let mut now = 0;
        for _ in 0..200 {
            now += 16;
            tick(&mut state, &TickInput::default(), now);
            if state.phase == GamePhase::Ended {
                break;
            }
        }

        assert_eq!(state.end_reason, Some(EndReason::OutOfPlatforms));
        assert_eq!(state.score, 0);
        // Replenishment still ran on the final tick
        assert!(state.platforms.len() >= MIN_PLATFORMS);
        assert_eq!(state.drain_events(), vec![GameEvent::MusicStop]);
    }

    #[test]
    fn test_quit_ends_session() {
        let mut state = playing(14);
        let input = TickInput {
            quit: true,
            ..Default::default()
        };
        tick(&mut state, &input, 16);
        assert!(state.quit_requested);
        assert_eq!(state.end_reason, Some(EndReason::Quit));
    }

    #[test]
    fn test_determinism() {
        let mut state1 = playing(99999);
        let mut state2 = playing(99999);

        let inputs = [
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput {
                jump_pressed: true,
                ..Default::default()
            },
            TickInput {
                jump_released: true,
                left: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        let mut now = 0;
        for _ in 0..50 {
            for input in &inputs {
                now += 16;
                tick(&mut state1, input, now);
                tick(&mut state2, input, now);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.platforms.len(), state2.platforms.len());
        assert_eq!(state1.player.pos, state2.player.pos);
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
            |(left, right, jump_pressed, jump_released)| TickInput {
                left,
                right,
                jump_pressed,
                jump_released,
                quit: false,
            },
        )
    }

    proptest! {
        #[test]
        fn prop_platform_floor_and_score_steps(
            seed in any::<u64>(),
            inputs in prop::collection::vec(arb_input(), 1..400),
        ) {
            let mut state = playing(seed);
            let mut now = 0u64;
            let mut last_score = state.score;
            for input in &inputs {
                now += 16;
                tick(&mut state, input, now);
                prop_assert!(state.platforms.len() >= MIN_PLATFORMS);
                prop_assert!(state.score >= last_score);
                prop_assert_eq!((state.score - last_score) % PLATFORM_SCORE, 0);
                last_score = state.score;
            }
        }

        #[test]
        fn prop_jump_cut_is_idempotent(vel_y in -80.0f32..80.0, jumping in any::<bool>()) {
            let mut state = playing(1);
            state.player.vel.y = vel_y;
            state.player.jumping = jumping;
            state.player.jump_cut();
            let once = state.player.vel.y;
            state.player.jump_cut();
            prop_assert_eq!(state.player.vel.y, once);
            if !jumping || vel_y >= -JUMP_CUT_SPEED {
                prop_assert_eq!(once, vel_y);
            }
        }
    }
}
