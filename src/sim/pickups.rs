//! Pickup and upgrade system: scrolling collectibles, collection effects and
//! weapon auto-fire

use glam::Vec2;

use super::avatar::fire_interval;
use super::collision::circles_overlap;
use super::state::{
    BulletTier, GameEvent, GameState, PickupKind, Projectile, ProjectileKind,
};
use crate::consts::*;

/// Player bullet speed (px/s, rightward)
pub const PLAYER_BULLET_SPEED: f32 = 500.0;
pub const PLAYER_BULLET_RADIUS: f32 = 4.0;

/// Scroll pickups and collect the ones touching the avatar
///
/// Each pickup is collected at most once; collected and off-screen pickups
/// are dropped.
pub fn update_pickups(state: &mut GameState, dt: f32) {
    let scroll = state.profile.scroll_speed * dt;
    let avatar_pos = state.avatar.pos;
    let mut collected = Vec::new();

    for pickup in &mut state.pickups {
        pickup.pos.x -= scroll;
        if !pickup.collected
            && circles_overlap(avatar_pos, AVATAR_COLLECT_RADIUS, pickup.pos, pickup.radius)
        {
            pickup.collected = true;
            collected.push(pickup.kind);
        }
    }

    state
        .pickups
        .retain(|p| !p.collected && p.pos.x + p.radius > 0.0);

    for kind in collected {
        apply_pickup(state, kind);
    }
}

/// Apply a collected pickup's effect to the session
pub fn apply_pickup(state: &mut GameState, kind: PickupKind) {
    match kind {
        PickupKind::Coin(tier) => {
            let value = tier.value();
            if state.is_playing() {
                state.totals.coins += value;
            }
            state.award(value);
            state.events.push(GameEvent::CoinCollected { tier, value });
        }
        PickupKind::Shield => {
            state.avatar.grant_shield();
            log::debug!(
                "Shield collected: {:?} ({} hits)",
                state.avatar.shield,
                state.avatar.shield_hits
            );
            state.events.push(GameEvent::ShieldCollected {
                level: state.avatar.shield,
            });
        }
        PickupKind::Weapon { ammo } => {
            state.avatar.grant_weapon(ammo);
            log::debug!(
                "Weapon collected: level {} with {} ammo",
                state.avatar.weapon_level,
                state.avatar.weapon_ammo
            );
            state.events.push(GameEvent::WeaponCollected {
                level: state.avatar.weapon_level,
                ammo: state.avatar.weapon_ammo,
            });
        }
    }
}

/// Fire the avatar's weapon on its per-level cadence
///
/// Each shot costs one ammo; running dry disarms the weapon.
pub fn update_weapon(state: &mut GameState, dt: f32) {
    let avatar = &mut state.avatar;
    if avatar.weapon_level == 0 {
        return;
    }
    if avatar.weapon_ammo == 0 {
        avatar.weapon_level = 0;
        return;
    }

    avatar.fire_cooldown -= dt;
    if avatar.fire_cooldown > 0.0 {
        return;
    }

    let tier = BulletTier::for_weapon_level(avatar.weapon_level);
    let muzzle = avatar.pos + Vec2::new(avatar.size.x / 2.0, 0.0);
    avatar.weapon_ammo -= 1;
    avatar.fire_cooldown = fire_interval(avatar.weapon_level);
    let depleted = avatar.weapon_ammo == 0;
    if depleted {
        avatar.weapon_level = 0;
        avatar.fire_cooldown = 0.0;
    }

    let id = state.next_entity_id();
    state.projectiles.push(Projectile {
        id,
        kind: ProjectileKind::Bullet { tier },
        pos: muzzle,
        vel: Vec2::new(PLAYER_BULLET_SPEED, 0.0),
        radius: PLAYER_BULLET_RADIUS,
        from_player: true,
    });
    state.events.push(GameEvent::WeaponFired { tier });
    if depleted {
        log::debug!("Weapon out of ammo");
        state.events.push(GameEvent::WeaponDepleted);
    }
}
