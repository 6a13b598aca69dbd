//! Avatar controller: jump impulses, gravity integration and upgrades

use glam::Vec2;

use super::collision::Aabb;
use super::state::{Avatar, ShieldLevel};
use crate::consts::*;

/// Fire interval (seconds) for each weapon level
pub fn fire_interval(level: u8) -> f32 {
    match level {
        0 | 1 => 0.3,
        2 => 0.2,
        _ => 0.12,
    }
}

impl Avatar {
    /// Fresh avatar at the fixed x, vertically centered
    pub fn spawn(field: Vec2) -> Self {
        Self {
            pos: Vec2::new(field.x * AVATAR_X_FRACTION, field.y / 2.0),
            velocity: 0.0,
            rotation: 0.0,
            size: Vec2::new(AVATAR_WIDTH, AVATAR_HEIGHT),
            shield: ShieldLevel::None,
            shield_hits: 0,
            weapon_level: 0,
            weapon_ammo: 0,
            fire_cooldown: 0.0,
            last_jump: None,
        }
    }

    /// Set vertical velocity to the jump impulse unless debounced
    pub fn apply_jump(&mut self, impulse: f32, now: f32) -> bool {
        if let Some(last) = self.last_jump {
            if now - last < JUMP_DEBOUNCE {
                return false;
            }
        }
        self.velocity = impulse;
        self.last_jump = Some(now);
        true
    }

    /// Advance gravity, clamp fall speed, move, and ease rotation toward
    /// a pitch derived from velocity
    pub fn integrate(&mut self, dt: f32, gravity: f32, max_fall_speed: f32) {
        self.velocity = (self.velocity + gravity * dt).min(max_fall_speed);
        self.pos.y += self.velocity * dt;

        let target = if self.velocity > 0.0 {
            (self.velocity / 8.0).min(MAX_DIVE_PITCH)
        } else {
            (self.velocity / 6.0).max(-MAX_CLIMB_PITCH)
        };
        self.rotation += (target - self.rotation) * ROTATION_SMOOTHING;
    }

    /// Keep the avatar inside the top of the field with a soft bounce
    ///
    /// Returns true if the ceiling was touched.
    pub fn clamp_to_ceiling(&mut self) -> bool {
        let half_h = self.size.y / 2.0;
        if self.pos.y - half_h <= 0.0 {
            self.pos.y = half_h;
            self.velocity = CEILING_BOUNCE_SPEED;
            true
        } else {
            false
        }
    }

    /// Padded hitbox used against obstacles and hazard bodies
    pub fn hitbox(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size).shrink(HITBOX_PADDING)
    }

    pub fn has_shield(&self) -> bool {
        self.shield != ShieldLevel::None
    }

    pub fn is_armed(&self) -> bool {
        self.weapon_level > 0 && self.weapon_ammo > 0
    }

    /// Collect a shield pickup: grant basic, or upgrade/refresh enhanced
    pub fn grant_shield(&mut self) {
        match self.shield {
            ShieldLevel::None => {
                self.shield = ShieldLevel::Basic;
                self.shield_hits = 1;
            }
            ShieldLevel::Basic | ShieldLevel::Enhanced => {
                self.shield = ShieldLevel::Enhanced;
                self.shield_hits = ENHANCED_SHIELD_HITS;
            }
        }
    }

    /// Collect a weapon pickup: arm at level 1, or level up and pool ammo
    pub fn grant_weapon(&mut self, ammo: u32) {
        if self.weapon_level == 0 {
            self.weapon_level = 1;
            self.weapon_ammo = ammo;
            self.fire_cooldown = 0.0;
        } else {
            self.weapon_level = (self.weapon_level + 1).min(MAX_WEAPON_LEVEL);
            self.weapon_ammo = self.weapon_ammo.saturating_add(ammo);
        }
    }

    /// Spend shield charge on a lethal contact
    ///
    /// Returns false when no shield was held (the contact is fatal).
    pub fn absorb_hit(&mut self) -> bool {
        match self.shield {
            ShieldLevel::None => false,
            ShieldLevel::Basic => {
                self.shield = ShieldLevel::None;
                self.shield_hits = 0;
                true
            }
            ShieldLevel::Enhanced => {
                self.shield_hits = self.shield_hits.saturating_sub(1);
                if self.shield_hits == 0 {
                    self.shield = ShieldLevel::None;
                }
                true
            }
        }
    }
}
