//! Obstacle generator: timed pair spawning, oscillation, scrolling and
//! pass scoring

use glam::Vec2;
use rand::Rng;

use super::state::{CoinTier, GameEvent, GameState, Obstacle, Oscillation, Pickup, PickupKind};
use crate::consts::*;

/// Ammo carried by a weapon pickup
pub const WEAPON_AMMO_MIN: u32 = 8;
pub const WEAPON_AMMO_MAX: u32 = 15;

/// Weighted coin tier roll (60% silver, 30% gold, 10% diamond)
pub fn roll_coin_tier<R: Rng>(rng: &mut R) -> CoinTier {
    match rng.random_range(0..100u32) {
        0..60 => CoinTier::Silver,
        60..90 => CoinTier::Gold,
        _ => CoinTier::Diamond,
    }
}

/// Allowed range for a pair's `top_height` at spawn
pub fn top_height_range(state: &GameState) -> (f32, f32) {
    let min = OBSTACLE_MIN_HEIGHT;
    let max = state.field.y
        - state.profile.ground_height
        - state.profile.obstacle_gap
        - OBSTACLE_MIN_HEIGHT
        - OBSTACLE_MARGIN;
    (min, max.max(min))
}

/// Range an oscillating pair's `top_height` stays within
fn oscillation_bounds(state: &GameState) -> (f32, f32) {
    let min = OBSTACLE_MIN_HEIGHT;
    let max = state.ground_y() - state.profile.obstacle_gap - OBSTACLE_MIN_HEIGHT;
    (min, max.max(min))
}

/// Advance the spawn timer and spawn a pair when it elapses
pub fn update_spawner(state: &mut GameState, dt: f32) {
    state.obstacle_timer += dt;
    if state.obstacle_timer >= state.profile.obstacle_spawn_interval {
        state.obstacle_timer = 0.0;
        spawn_obstacle(state);
    }
}

/// Spawn one obstacle pair at the right edge, with any embedded pickups
pub fn spawn_obstacle(state: &mut GameState) {
    let (min, max) = top_height_range(state);
    let top_height = state.rng.random_range(min..=max);
    let gap = state.profile.obstacle_gap;
    let id = state.next_entity_id();
    let mut obstacle = Obstacle::new(id, state.field.x, top_height, gap);

    if state.profile.moving_obstacles
        && state.rng.random_bool(state.profile.moving_obstacle_chance as f64)
    {
        let direction = if state.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        obstacle.oscillation = Some(Oscillation {
            direction,
            speed: state.profile.obstacle_move_speed,
            original_top_height: top_height,
        });
    }

    let center_x = obstacle.x + obstacle.width / 2.0;
    log::debug!(
        "Obstacle {} spawned: top {:.0}, gap {:.0}, moving {}",
        id,
        top_height,
        gap,
        obstacle.oscillation.is_some()
    );
    state.obstacles.push(obstacle);

    if state.profile.coins_enabled
        && state.rng.random_bool(state.profile.coin_spawn_chance as f64)
    {
        let tier = roll_coin_tier(&mut state.rng);
        let pos = Vec2::new(center_x, top_height + gap * 0.5);
        push_pickup(state, PickupKind::Coin(tier), pos, COIN_RADIUS);
    }

    if !state.avatar.has_shield()
        && state.rng.random_bool(state.profile.shield_spawn_chance as f64)
    {
        let pos = Vec2::new(center_x, top_height + gap * 0.25);
        push_pickup(state, PickupKind::Shield, pos, POWERUP_RADIUS);
    }

    if state.avatar.weapon_level == 0
        && state.rng.random_bool(state.profile.weapon_spawn_chance as f64)
    {
        let ammo = state.rng.random_range(WEAPON_AMMO_MIN..=WEAPON_AMMO_MAX);
        let pos = Vec2::new(center_x, top_height + gap * 0.75);
        push_pickup(state, PickupKind::Weapon { ammo }, pos, POWERUP_RADIUS);
    }
}

fn push_pickup(state: &mut GameState, kind: PickupKind, pos: Vec2, radius: f32) {
    let id = state.next_entity_id();
    log::debug!("Pickup {} spawned: {:?}", id, kind);
    state.pickups.push(Pickup {
        id,
        kind,
        pos,
        radius,
        collected: false,
    });
}

/// Step one oscillating pair, reversing at the bounds
pub fn oscillate(obstacle: &mut Obstacle, dt: f32, min_top: f32, max_top: f32) {
    if let Some(osc) = obstacle.oscillation.as_mut() {
        let mut top = obstacle.top_height + osc.speed * dt * osc.direction;
        if top <= min_top {
            top = min_top;
            osc.direction = 1.0;
        } else if top >= max_top {
            top = max_top;
            osc.direction = -1.0;
        }
        obstacle.top_height = top;
        obstacle.bottom_y = top + obstacle.gap;
    }
}

/// Scroll, oscillate, score passes and drop pairs that left the field
pub fn advance_obstacles(state: &mut GameState, dt: f32) {
    let (min_top, max_top) = oscillation_bounds(state);
    let scroll = state.profile.scroll_speed * dt;
    let avatar_x = state.avatar.pos.x;
    let mut passed = 0u64;

    for obstacle in &mut state.obstacles {
        obstacle.x -= scroll;
        oscillate(obstacle, dt, min_top, max_top);

        if !obstacle.passed && obstacle.right() < avatar_x {
            obstacle.passed = true;
            passed += 1;
        }
    }

    state.obstacles.retain(|o| o.right() > 0.0);

    for _ in 0..passed {
        state.award(1);
        let score = state.totals.score;
        state.events.push(GameEvent::ObstaclePassed { score });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::DifficultyProfile;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn playing(profile: DifficultyProfile) -> GameState {
        let mut state = GameState::new(profile, 1234);
        state.jump();
        state.drain_events();
        state
    }

    #[test]
    fn test_spawn_within_height_range() {
        let mut state = playing(DifficultyProfile::hard());
        let (min, max) = top_height_range(&state);
        for _ in 0..200 {
            spawn_obstacle(&mut state);
        }
        for o in &state.obstacles {
            assert!(o.top_height >= min && o.top_height <= max);
            assert_eq!(o.gap, state.profile.obstacle_gap);
            assert_eq!(o.bottom_y, o.top_height + o.gap);
            assert_eq!(o.x, state.field.x);
        }
    }

    #[test]
    fn test_spawner_timer() {
        let mut state = playing(DifficultyProfile::easy());
        let interval = state.profile.obstacle_spawn_interval;
        update_spawner(&mut state, interval * 0.5);
        assert!(state.obstacles.is_empty());
        update_spawner(&mut state, interval * 0.6);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacle_timer, 0.0);
    }

    #[test]
    fn test_pass_scored_exactly_once() {
        let mut state = playing(DifficultyProfile::easy());
        let avatar_x = state.avatar.pos.x;
        state
            .obstacles
            .push(Obstacle::new(99, avatar_x - OBSTACLE_WIDTH + 1.0, 150.0, 200.0));

        for _ in 0..20 {
            advance_obstacles(&mut state, 1.0 / 60.0);
        }
        assert_eq!(state.totals.score, 1);
        let passes = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::ObstaclePassed { .. }))
            .count();
        assert_eq!(passes, 1);
    }

    #[test]
    fn test_offscreen_obstacles_removed() {
        let mut state = playing(DifficultyProfile::easy());
        state.obstacles.push(Obstacle::new(5, -OBSTACLE_WIDTH + 0.5, 150.0, 200.0));
        advance_obstacles(&mut state, 0.1);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_oscillation_preserves_gap_and_reverses() {
        let mut o = Obstacle::new(1, 200.0, 100.0, 150.0);
        o.oscillation = Some(Oscillation {
            direction: -1.0,
            speed: 60.0,
            original_top_height: 100.0,
        });

        oscillate(&mut o, 1.0, 70.0, 300.0);
        assert_eq!(o.top_height, 70.0);
        assert_eq!(o.bottom_y - o.top_height, 150.0);
        assert_eq!(o.oscillation.map(|osc| osc.direction), Some(1.0));

        for _ in 0..10 {
            oscillate(&mut o, 1.0, 70.0, 300.0);
            assert!(o.top_height >= 70.0 && o.top_height <= 300.0);
            assert_eq!(o.bottom_y, o.top_height + o.gap);
        }
    }

    #[test]
    fn test_static_obstacle_does_not_oscillate() {
        let mut o = Obstacle::new(1, 200.0, 100.0, 150.0);
        oscillate(&mut o, 1.0, 70.0, 300.0);
        assert_eq!(o.top_height, 100.0);
    }

    #[test]
    fn test_no_shield_spawn_while_shielded() {
        let profile = DifficultyProfile {
            shield_spawn_chance: 1.0,
            coin_spawn_chance: 0.0,
            weapon_spawn_chance: 0.0,
            ..DifficultyProfile::hard()
        };
        let mut state = playing(profile);
        spawn_obstacle(&mut state);
        assert_eq!(state.pickups.len(), 1);
        assert_eq!(state.pickups[0].kind, PickupKind::Shield);

        state.pickups.clear();
        state.avatar.grant_shield();
        spawn_obstacle(&mut state);
        assert!(state.pickups.is_empty());
    }

    #[test]
    fn test_weapon_pickup_ammo_in_range() {
        let profile = DifficultyProfile {
            weapon_spawn_chance: 1.0,
            coin_spawn_chance: 0.0,
            ..DifficultyProfile::easy()
        };
        let mut state = playing(profile);
        for _ in 0..50 {
            spawn_obstacle(&mut state);
        }
        assert_eq!(state.pickups.len(), 50);
        for p in &state.pickups {
            match p.kind {
                PickupKind::Weapon { ammo } => {
                    assert!((WEAPON_AMMO_MIN..=WEAPON_AMMO_MAX).contains(&ammo))
                }
                other => panic!("unexpected pickup {:?}", other),
            }
        }
    }

    #[test]
    fn test_coin_tiers_all_appear() {
        let mut rng = Pcg32::seed_from_u64(3);
        let tiers: Vec<CoinTier> = (0..500).map(|_| roll_coin_tier(&mut rng)).collect();
        assert!(tiers.contains(&CoinTier::Silver));
        assert!(tiers.contains(&CoinTier::Gold));
        assert!(tiers.contains(&CoinTier::Diamond));
        let silver = tiers.iter().filter(|t| **t == CoinTier::Silver).count();
        assert!(silver > 200);
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = playing(DifficultyProfile::crazy());
        let mut b = playing(DifficultyProfile::crazy());
        for _ in 0..20 {
            spawn_obstacle(&mut a);
            spawn_obstacle(&mut b);
        }
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.pickups, b.pickups);
    }
}
