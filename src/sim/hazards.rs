//! Hazards and projectiles
//!
//! Drifters and missiles spawn on a steady timer. Hunters and bombers join
//! once the score passes the profile's threshold, on a timer that shortens
//! as the score grows. All projectiles (player bullets, hunter bullets and
//! bomber bombs) are integrated here, and player bullets are resolved against
//! hazards.

use glam::Vec2;
use rand::Rng;

use super::collision::{Aabb, circle_aabb_overlap};
use super::state::{
    BulletTier, GameEvent, GameState, Hazard, HazardClass, HazardKind, Projectile, ProjectileKind,
};
use crate::direction_or;
use crate::profile::DifficultyProfile;

// Drifter: straight flight with a sinusoidal bob
pub const DRIFTER_SIZE: Vec2 = Vec2::new(34.0, 26.0);
pub const DRIFTER_EXTRA_SPEED: f32 = 60.0;
pub const DRIFTER_AMPLITUDE: f32 = 30.0;
pub const DRIFTER_FREQUENCY: f32 = 3.0;

// Missile: fast closing speed with soft vertical homing
pub const MISSILE_SIZE: Vec2 = Vec2::new(36.0, 14.0);
pub const MISSILE_CLOSING_SPEED: f32 = 200.0;
pub const MISSILE_HOMING_GAIN: f32 = 1.2;
pub const MISSILE_MAX_VERTICAL_SPEED: f32 = 140.0;

// Hunter: parks near the right edge and shoots at the avatar
pub const HUNTER_SIZE: Vec2 = Vec2::new(40.0, 36.0);
pub const HUNTER_BASE_SPEED: f32 = 150.0;
pub const HUNTER_MIN_SPEED: f32 = 10.0;
pub const HUNTER_HOLD_FRACTION: f32 = 0.78;
pub const HUNTER_HEALTH: u32 = 3;
pub const HUNTER_HOVER_AMPLITUDE: f32 = 12.0;
pub const HUNTER_HOVER_FREQUENCY: f32 = 2.0;
/// Seconds a hunter stays parked before flying off
pub const HUNTER_LINGER: f32 = 10.0;

// Bomber: crosses high up, dropping bombs
pub const BOMBER_SIZE: Vec2 = Vec2::new(64.0, 26.0);
pub const BOMBER_SPEED: f32 = 90.0;
pub const BOMBER_HEALTH: u32 = 4;
pub const BOMBER_DROP_INTERVAL: f32 = 1.6;
pub const BOMBER_MIN_ALTITUDE: f32 = 40.0;
pub const BOMBER_MAX_ALTITUDE: f32 = 130.0;

// Projectiles
pub const HAZARD_BULLET_SPEED: f32 = 260.0;
pub const HAZARD_BULLET_RADIUS: f32 = 5.0;
pub const BOMB_RADIUS: f32 = 8.0;
pub const BOMB_GRAVITY: f32 = 420.0;
pub const BOMB_DROP_SPEED: f32 = 40.0;

/// Keep spawned hazards this far from the ceiling and ground
const SPAWN_MARGIN: f32 = 60.0;
/// Hazards are culled once this far outside the field
const CULL_MARGIN: f32 = 100.0;
/// Share of basic spawns that are drifters (the rest are missiles)
const DRIFTER_SHARE: f64 = 0.7;

impl Hazard {
    /// Body box used for bullets and avatar contact
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    /// Apply one bullet; returns true if the hazard is destroyed
    pub fn take_hit(&mut self, tier: BulletTier) -> bool {
        self.health = match tier {
            BulletTier::Lethal => 0,
            other => self.health.saturating_sub(other.damage()),
        };
        self.health == 0
    }
}

/// Hunter/bomber spawn interval at a given score
///
/// Starts at the profile's base interval at the threshold and shrinks by a
/// fixed step per point beyond it, never below the floor.
pub fn advanced_spawn_interval(profile: &DifficultyProfile, score: u64) -> f32 {
    let past = score.saturating_sub(profile.advanced_hazard_score) as f32;
    (profile.advanced_spawn_interval - past * profile.advanced_interval_step)
        .max(profile.advanced_spawn_floor)
}

/// Advance both hazard spawn timers
pub fn update_hazard_spawns(state: &mut GameState, dt: f32) {
    if !state.profile.hazards_enabled {
        return;
    }

    state.hazard_timer += dt;
    if state.hazard_timer >= state.profile.hazard_spawn_interval {
        state.hazard_timer = 0.0;
        let class = if state.rng.random_bool(DRIFTER_SHARE) {
            HazardClass::Drifter
        } else {
            HazardClass::Missile
        };
        spawn_hazard(state, class);
    }

    let score = state.totals.score;
    if score >= state.profile.advanced_hazard_score {
        state.advanced_timer += dt;
        if state.advanced_timer >= advanced_spawn_interval(&state.profile, score) {
            state.advanced_timer = 0.0;
            let class = if state.rng.random_bool(0.5) {
                HazardClass::Hunter
            } else {
                HazardClass::Bomber
            };
            spawn_hazard(state, class);
        }
    }
}

/// Spawn a hazard of the given class just beyond the right edge
pub fn spawn_hazard(state: &mut GameState, class: HazardClass) {
    let top = SPAWN_MARGIN;
    let bottom = (state.ground_y() - SPAWN_MARGIN).max(top);
    let scroll = state.profile.scroll_speed;

    let (kind, pos, vel, size, health) = match class {
        HazardClass::Drifter => {
            let y = state.rng.random_range(top..=bottom);
            let phase = state.rng.random_range(0.0..std::f32::consts::TAU);
            (
                HazardKind::Drifter { base_y: y, phase },
                Vec2::new(state.field.x + DRIFTER_SIZE.x, y + phase.sin() * DRIFTER_AMPLITUDE),
                Vec2::new(-(scroll + DRIFTER_EXTRA_SPEED), 0.0),
                DRIFTER_SIZE,
                1,
            )
        }
        HazardClass::Missile => {
            let y = state.rng.random_range(top..=bottom);
            (
                HazardKind::Missile,
                Vec2::new(state.field.x + MISSILE_SIZE.x, y),
                Vec2::new(-(scroll + MISSILE_CLOSING_SPEED), 0.0),
                MISSILE_SIZE,
                1,
            )
        }
        HazardClass::Hunter => {
            let y = state.rng.random_range(top..=bottom);
            let speed =
                (HUNTER_BASE_SPEED * state.profile.hunter_speed_multiplier).max(HUNTER_MIN_SPEED);
            (
                HazardKind::Hunter {
                    hold_x: state.field.x * HUNTER_HOLD_FRACTION,
                    anchor_y: y,
                    hover_phase: 0.0,
                    fire_timer: state.profile.hunter_shot_interval,
                    linger: HUNTER_LINGER,
                },
                Vec2::new(state.field.x + HUNTER_SIZE.x, y),
                Vec2::new(-speed, 0.0),
                HUNTER_SIZE,
                HUNTER_HEALTH,
            )
        }
        HazardClass::Bomber => {
            let y = state
                .rng
                .random_range(BOMBER_MIN_ALTITUDE..=BOMBER_MAX_ALTITUDE);
            (
                HazardKind::Bomber {
                    drop_timer: BOMBER_DROP_INTERVAL * 0.5,
                },
                Vec2::new(state.field.x + BOMBER_SIZE.x, y),
                Vec2::new(-BOMBER_SPEED, 0.0),
                BOMBER_SIZE,
                BOMBER_HEALTH,
            )
        }
    };

    let id = state.next_entity_id();
    log::debug!("Hazard {} spawned: {:?} at y {:.0}", id, class, pos.y);
    state.hazards.push(Hazard {
        id,
        kind,
        pos,
        vel,
        size,
        health,
    });
    state.events.push(GameEvent::HazardSpawned { class });
}

/// Move every hazard by its behavior, fire hunter shots and bomber drops,
/// and cull hazards that left the field
pub fn advance_hazards(state: &mut GameState, dt: f32) {
    let avatar_pos = state.avatar.pos;
    let field = state.field;
    let shot_interval = state.profile.hunter_shot_interval;
    let mut fired: Vec<(ProjectileKind, Vec2, Vec2, f32)> = Vec::new();

    for hazard in &mut state.hazards {
        match &mut hazard.kind {
            HazardKind::Drifter { base_y, phase } => {
                hazard.pos.x += hazard.vel.x * dt;
                *phase += DRIFTER_FREQUENCY * dt;
                hazard.pos.y = *base_y + phase.sin() * DRIFTER_AMPLITUDE;
            }
            HazardKind::Missile => {
                hazard.vel.y = ((avatar_pos.y - hazard.pos.y) * MISSILE_HOMING_GAIN)
                    .clamp(-MISSILE_MAX_VERTICAL_SPEED, MISSILE_MAX_VERTICAL_SPEED);
                hazard.pos += hazard.vel * dt;
            }
            HazardKind::Hunter {
                hold_x,
                anchor_y,
                hover_phase,
                fire_timer,
                linger,
            } => {
                if *linger <= 0.0 {
                    hazard.pos.x += hazard.vel.x * dt;
                } else if hazard.pos.x > *hold_x {
                    hazard.pos.x = (hazard.pos.x + hazard.vel.x * dt).max(*hold_x);
                } else {
                    *linger -= dt;
                    *hover_phase += HUNTER_HOVER_FREQUENCY * dt;
                    hazard.pos.y = *anchor_y + hover_phase.sin() * HUNTER_HOVER_AMPLITUDE;

                    *fire_timer -= dt;
                    if *fire_timer <= 0.0 {
                        *fire_timer = shot_interval;
                        let dir = direction_or(hazard.pos, avatar_pos, Vec2::NEG_X);
                        fired.push((
                            ProjectileKind::Bullet {
                                tier: BulletTier::Normal,
                            },
                            hazard.pos,
                            dir * HAZARD_BULLET_SPEED,
                            HAZARD_BULLET_RADIUS,
                        ));
                    }
                }
            }
            HazardKind::Bomber { drop_timer } => {
                hazard.pos += hazard.vel * dt;
                *drop_timer -= dt;
                if *drop_timer <= 0.0 {
                    *drop_timer = BOMBER_DROP_INTERVAL;
                    if hazard.pos.x > 0.0 && hazard.pos.x < field.x {
                        fired.push((
                            ProjectileKind::Bomb,
                            hazard.pos + Vec2::new(0.0, hazard.size.y / 2.0),
                            Vec2::new(hazard.vel.x, BOMB_DROP_SPEED),
                            BOMB_RADIUS,
                        ));
                    }
                }
            }
        }
    }

    state.hazards.retain(|h| {
        h.pos.x + h.size.x > -CULL_MARGIN
            && h.pos.x - h.size.x < field.x + CULL_MARGIN
            && h.pos.y > -CULL_MARGIN
            && h.pos.y < field.y + CULL_MARGIN
    });

    for (kind, pos, vel, radius) in fired {
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            kind,
            pos,
            vel,
            radius,
            from_player: false,
        });
    }
}

/// Integrate bullets and bombs and drop those that left the field
///
/// Bombs also fall under their own gravity and burst on the ground.
pub fn advance_projectiles(state: &mut GameState, dt: f32) {
    let field = state.field;
    let ground_y = state.ground_y();

    for projectile in &mut state.projectiles {
        if projectile.is_bomb() {
            projectile.vel.y += BOMB_GRAVITY * dt;
        }
        projectile.pos += projectile.vel * dt;
    }

    state.projectiles.retain(|p| {
        let r = p.radius;
        let inside_x = p.pos.x + r > 0.0 && p.pos.x - r < field.x;
        let above_floor = if p.is_bomb() {
            p.pos.y - r < ground_y
        } else {
            p.pos.y - r < field.y
        };
        inside_x && above_floor && p.pos.y + r > 0.0
    });
}

/// Resolve player bullets against hazards
///
/// A bullet hits the first live hazard it overlaps and is consumed. Hazards
/// brought to zero health are destroyed, counted as kills and pay the kill
/// bonus.
pub fn resolve_player_hits(state: &mut GameState) {
    let hazards = &mut state.hazards;
    state.projectiles.retain(|p| {
        if !p.from_player {
            return true;
        }
        let ProjectileKind::Bullet { tier } = p.kind else {
            return true;
        };
        for hazard in hazards.iter_mut() {
            if hazard.health > 0 && circle_aabb_overlap(p.pos, p.radius, &hazard.bounds()) {
                hazard.take_hit(tier);
                return false;
            }
        }
        true
    });

    let mut destroyed = Vec::new();
    state.hazards.retain(|h| {
        if h.health == 0 {
            destroyed.push(h.kind.class());
            false
        } else {
            true
        }
    });

    for class in destroyed {
        if state.is_playing() {
            state.totals.kills += 1;
        }
        state.award(state.profile.kill_bonus);
        log::debug!("Hazard destroyed: {:?} (kills {})", class, state.totals.kills);
        state.events.push(GameEvent::HazardDestroyed { class });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::SessionStatus;

    fn playing(profile: DifficultyProfile) -> GameState {
        let mut state = GameState::new(profile, 2024);
        state.jump();
        state.drain_events();
        state
    }

    fn player_bullet(state: &mut GameState, pos: Vec2, tier: BulletTier) {
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            kind: ProjectileKind::Bullet { tier },
            pos,
            vel: Vec2::new(500.0, 0.0),
            radius: 4.0,
            from_player: true,
        });
    }

    #[test]
    fn test_lethal_bullet_destroys_hunter() {
        let mut state = playing(DifficultyProfile::hard());
        spawn_hazard(&mut state, HazardClass::Hunter);
        assert_eq!(state.hazards[0].health, 3);
        let target = state.hazards[0].pos;

        player_bullet(&mut state, target, BulletTier::Lethal);
        resolve_player_hits(&mut state);

        assert!(state.hazards.is_empty());
        assert!(state.projectiles.is_empty());
        assert_eq!(state.totals.kills, 1);
        assert_eq!(state.totals.score, state.profile.kill_bonus);
    }

    #[test]
    fn test_normal_bullets_wear_down_health() {
        let mut state = playing(DifficultyProfile::hard());
        spawn_hazard(&mut state, HazardClass::Bomber);
        let target = state.hazards[0].pos;

        for hit in 1..BOMBER_HEALTH {
            player_bullet(&mut state, target, BulletTier::Normal);
            resolve_player_hits(&mut state);
            assert_eq!(state.hazards[0].health, BOMBER_HEALTH - hit);
            assert_eq!(state.totals.kills, 0);
        }
        player_bullet(&mut state, target, BulletTier::Normal);
        resolve_player_hits(&mut state);
        assert!(state.hazards.is_empty());
        assert_eq!(state.totals.kills, 1);
    }

    #[test]
    fn test_elevated_damage_overkill() {
        let mut hazard = Hazard {
            id: 1,
            kind: HazardKind::Missile,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: MISSILE_SIZE,
            health: 1,
        };
        assert!(hazard.take_hit(BulletTier::Elevated));
        assert_eq!(hazard.health, 0);
    }

    #[test]
    fn test_hazard_bullets_ignore_hazards() {
        let mut state = playing(DifficultyProfile::hard());
        spawn_hazard(&mut state, HazardClass::Drifter);
        let id = state.next_entity_id();
        let pos = state.hazards[0].pos;
        state.projectiles.push(Projectile {
            id,
            kind: ProjectileKind::Bullet {
                tier: BulletTier::Normal,
            },
            pos,
            vel: Vec2::ZERO,
            radius: 5.0,
            from_player: false,
        });
        resolve_player_hits(&mut state);
        assert_eq!(state.hazards.len(), 1);
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_advanced_interval_shrinks_to_floor() {
        let profile = DifficultyProfile::crazy();
        let at_threshold = advanced_spawn_interval(&profile, profile.advanced_hazard_score);
        let later = advanced_spawn_interval(&profile, profile.advanced_hazard_score + 10);
        let much_later = advanced_spawn_interval(&profile, profile.advanced_hazard_score + 10_000);
        assert_eq!(at_threshold, profile.advanced_spawn_interval);
        assert!(later < at_threshold);
        assert_eq!(much_later, profile.advanced_spawn_floor);
    }

    #[test]
    fn test_advanced_hazards_gated_by_score() {
        let profile = DifficultyProfile {
            hazard_spawn_interval: 1000.0,
            ..DifficultyProfile::crazy()
        };
        let mut state = playing(profile);
        for _ in 0..600 {
            update_hazard_spawns(&mut state, 1.0 / 30.0);
        }
        assert!(state.hazards.is_empty());

        state.totals.score = state.profile.advanced_hazard_score;
        for _ in 0..600 {
            update_hazard_spawns(&mut state, 1.0 / 30.0);
        }
        assert!(!state.hazards.is_empty());
        assert!(state.hazards.iter().all(|h| matches!(
            h.kind.class(),
            HazardClass::Hunter | HazardClass::Bomber
        )));
    }

    #[test]
    fn test_hazards_disabled() {
        let profile = DifficultyProfile {
            hazards_enabled: false,
            ..DifficultyProfile::crazy()
        };
        let mut state = playing(profile);
        state.totals.score = 1000;
        for _ in 0..1000 {
            update_hazard_spawns(&mut state, 1.0 / 30.0);
        }
        assert!(state.hazards.is_empty());
    }

    #[test]
    fn test_missile_homes_softly() {
        let mut state = playing(DifficultyProfile::hard());
        spawn_hazard(&mut state, HazardClass::Missile);
        state.hazards[0].pos.y = state.avatar.pos.y - 200.0;
        let start_y = state.hazards[0].pos.y;

        advance_hazards(&mut state, 0.1);
        let missile = &state.hazards[0];
        // Moves toward the avatar but capped per step
        assert!(missile.pos.y > start_y);
        assert!(missile.pos.y - start_y <= MISSILE_MAX_VERTICAL_SPEED * 0.1 + 1e-3);
        assert!(missile.pos.x < state.field.x + MISSILE_SIZE.x);
    }

    #[test]
    fn test_drifter_bobs_around_spawn_height() {
        let mut state = playing(DifficultyProfile::hard());
        spawn_hazard(&mut state, HazardClass::Drifter);
        let (base_y, start_phase) = match state.hazards[0].kind {
            HazardKind::Drifter { base_y, phase } => (base_y, phase),
            _ => unreachable!("spawned a drifter"),
        };
        let start_x = state.hazards[0].pos.x;
        let vel_x = state.hazards[0].vel.x;
        assert!(vel_x < 0.0);

        let dt = 0.05;
        let mut phase = start_phase;
        for step in 1..=40 {
            advance_hazards(&mut state, dt);
            phase += DRIFTER_FREQUENCY * dt;
            let drifter = &state.hazards[0];
            let expected_y = base_y + phase.sin() * DRIFTER_AMPLITUDE;
            assert!((drifter.pos.y - expected_y).abs() < 1e-2);
            assert!((drifter.pos.y - base_y).abs() <= DRIFTER_AMPLITUDE + 1e-3);
            assert!((drifter.pos.x - (start_x + vel_x * dt * step as f32)).abs() < 1e-2);
        }
    }

    #[test]
    fn test_hunter_parks_and_fires_at_avatar() {
        let mut state = playing(DifficultyProfile::crazy());
        spawn_hazard(&mut state, HazardClass::Hunter);
        let hold_x = state.field.x * HUNTER_HOLD_FRACTION;

        let mut t = 0.0;
        while t < 10.0 && state.projectiles.is_empty() {
            advance_hazards(&mut state, 1.0 / 30.0);
            t += 1.0 / 30.0;
        }
        assert_eq!(state.hazards[0].pos.x, hold_x);
        assert_eq!(state.projectiles.len(), 1);
        let shot = &state.projectiles[0];
        assert!(!shot.from_player);
        // Aimed leftward toward the avatar
        assert!(shot.vel.x < 0.0);
        assert!((shot.vel.length() - HAZARD_BULLET_SPEED).abs() < 1e-2);
    }

    #[test]
    fn test_hunter_shot_with_coincident_avatar() {
        let mut state = playing(DifficultyProfile::crazy());
        spawn_hazard(&mut state, HazardClass::Hunter);
        let hold_x = state.field.x * HUNTER_HOLD_FRACTION;
        if let HazardKind::Hunter { fire_timer, .. } = &mut state.hazards[0].kind {
            *fire_timer = 0.0;
        }
        state.hazards[0].pos.x = hold_x;
        state.avatar.pos = state.hazards[0].pos;
        advance_hazards(&mut state, 0.0);
        let shot = &state.projectiles[0];
        assert!(shot.vel.is_finite());
        assert!((shot.vel.length() - HAZARD_BULLET_SPEED).abs() < 1e-2);
    }

    #[test]
    fn test_bomber_drops_falling_bombs() {
        let mut state = playing(DifficultyProfile::hard());
        spawn_hazard(&mut state, HazardClass::Bomber);
        state.hazards[0].pos.x = state.field.x * 0.5;

        advance_hazards(&mut state, BOMBER_DROP_INTERVAL);
        let bombs: Vec<_> = state.projectiles.iter().filter(|p| p.is_bomb()).collect();
        assert_eq!(bombs.len(), 1);
        assert_eq!(bombs[0].vel, Vec2::new(-BOMBER_SPEED, BOMB_DROP_SPEED));

        let vy = state.projectiles[0].vel.y;
        advance_projectiles(&mut state, 0.1);
        assert!((state.projectiles[0].vel.y - (vy + BOMB_GRAVITY * 0.1)).abs() < 1e-3);
    }

    #[test]
    fn test_bombs_burst_on_ground() {
        let mut state = playing(DifficultyProfile::hard());
        let id = state.next_entity_id();
        let ground_y = state.ground_y();
        state.projectiles.push(Projectile {
            id,
            kind: ProjectileKind::Bomb,
            pos: Vec2::new(200.0, ground_y - 10.0),
            vel: Vec2::new(0.0, 300.0),
            radius: BOMB_RADIUS,
            from_player: false,
        });
        advance_projectiles(&mut state, 0.1);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_offscreen_hazards_culled() {
        let mut state = playing(DifficultyProfile::hard());
        spawn_hazard(&mut state, HazardClass::Drifter);
        state.hazards[0].pos.x = -CULL_MARGIN - DRIFTER_SIZE.x + 1.0;
        advance_hazards(&mut state, 0.1);
        assert!(state.hazards.is_empty());
        assert_eq!(state.status, SessionStatus::Playing);
    }
}
