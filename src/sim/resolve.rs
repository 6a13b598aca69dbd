//! Collision resolution: decides whether each lethal contact is absorbed by
//! the shield or ends the session
//!
//! Threats are gathered in a fixed order (obstacles, ground, hazard bodies,
//! hazard bullets, bombs) and then resolved one at a time, so several
//! simultaneous threats each cost one shield hit.

use super::collision::{box_hits_gap, circles_overlap};
use super::state::{GameEvent, GameState, ShieldLevel};
use crate::consts::*;

/// A lethal contact found this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Threat {
    Obstacle(u32),
    Ground,
    Hazard(u32),
    HazardBullet(u32),
    Bomb(u32),
}

/// Gather every lethal contact touching the avatar, in resolution order
pub fn detect_threats(state: &GameState) -> Vec<Threat> {
    let avatar = &state.avatar;
    let hitbox = avatar.hitbox();
    let mut threats = Vec::new();

    for o in &state.obstacles {
        if !o.breached && box_hits_gap(&hitbox, o.x, o.right(), o.top_height, o.bottom_y) {
            threats.push(Threat::Obstacle(o.id));
        }
    }

    if avatar.pos.y + avatar.size.y / 2.0 >= state.ground_y() {
        threats.push(Threat::Ground);
    }

    for h in &state.hazards {
        if hitbox.overlaps(&h.bounds()) {
            threats.push(Threat::Hazard(h.id));
        }
    }

    for p in state.projectiles.iter().filter(|p| !p.from_player && !p.is_bomb()) {
        if circles_overlap(avatar.pos, AVATAR_HIT_RADIUS, p.pos, p.radius) {
            threats.push(Threat::HazardBullet(p.id));
        }
    }

    for p in state.projectiles.iter().filter(|p| p.is_bomb()) {
        if circles_overlap(avatar.pos, AVATAR_HIT_RADIUS, p.pos, p.radius) {
            threats.push(Threat::Bomb(p.id));
        }
    }

    threats
}

/// Resolve this frame's lethal contacts
///
/// Each threat spends one shield hit and is neutralized; the first threat
/// met without a shield ends the session. Absorptions by an enhanced shield
/// also clear hazards and hostile projectiles near the avatar once the pass
/// is over.
pub fn resolve_collisions(state: &mut GameState) {
    if !state.is_playing() {
        return;
    }

    let mut enhanced_absorbed = false;
    for threat in detect_threats(state) {
        let level = state.avatar.shield;
        if !state.avatar.absorb_hit() {
            log::debug!("Lethal contact: {:?}", threat);
            state.end_session();
            return;
        }
        enhanced_absorbed |= level == ShieldLevel::Enhanced;
        neutralize(state, threat);

        let remaining = state.avatar.shield_hits;
        log::debug!("Shield absorbed {:?} ({} hits left)", threat, remaining);
        state.events.push(GameEvent::ShieldAbsorbed { remaining });
    }

    if enhanced_absorbed {
        sweep_nearby(state);
    }
}

/// Remove or defuse whatever triggered an absorbed threat
fn neutralize(state: &mut GameState, threat: Threat) {
    match threat {
        Threat::Obstacle(id) => {
            if let Some(o) = state.obstacles.iter_mut().find(|o| o.id == id) {
                o.breached = true;
            }
        }
        Threat::Ground => {
            let avatar = &mut state.avatar;
            avatar.pos.y = state.field.y - state.profile.ground_height - avatar.size.y / 2.0 - 1.0;
            avatar.velocity = state.profile.jump_impulse;
        }
        Threat::Hazard(id) => state.hazards.retain(|h| h.id != id),
        Threat::HazardBullet(id) | Threat::Bomb(id) => state.projectiles.retain(|p| p.id != id),
    }
}

/// Clear hazards and hostile projectiles within the absorb radius
fn sweep_nearby(state: &mut GameState) {
    let center = state.avatar.pos;
    let radius_sq = state.profile.shield_absorb_radius * state.profile.shield_absorb_radius;
    let before = state.hazards.len() + state.projectiles.len();

    state
        .hazards
        .retain(|h| h.pos.distance_squared(center) > radius_sq);
    state
        .projectiles
        .retain(|p| p.from_player || p.pos.distance_squared(center) > radius_sq);

    let cleared = before - state.hazards.len() - state.projectiles.len();
    if cleared > 0 {
        log::debug!("Shield pulse cleared {} nearby threats", cleared);
    }
}
