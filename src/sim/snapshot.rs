//! Read-only frame snapshot handed to renderers
//!
//! A flat sprite list plus the HUD values; nothing in here points back into
//! the live session.

use glam::Vec2;
use serde::Serialize;

use super::state::{
    BulletTier, CoinTier, GameState, HazardClass, PickupKind, ProjectileKind, SessionStatus,
    ShieldLevel,
};

/// What a sprite depicts, with the visual-state flags a renderer needs
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SpriteKind {
    Avatar { shield: ShieldLevel, weapon_level: u8 },
    ObstacleTop { moving: bool },
    ObstacleBottom { moving: bool },
    Coin(CoinTier),
    ShieldPickup,
    WeaponPickup,
    Hazard(HazardClass),
    PlayerBullet(BulletTier),
    HazardBullet,
    Bomb,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sprite {
    pub kind: SpriteKind,
    /// Centre in playfield coordinates
    pub pos: Vec2,
    pub size: Vec2,
    /// Degrees for the avatar, heading radians for projectiles and missiles
    pub rotation: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub status: SessionStatus,
    pub score: u64,
    pub coins: u64,
    pub kills: u32,
    pub ground_y: f32,
    pub sprites: Vec<Sprite>,
}

impl GameState {
    /// Capture everything a renderer needs for this frame
    pub fn snapshot(&self) -> Snapshot {
        let mut sprites = Vec::with_capacity(
            1 + self.obstacles.len() * 2
                + self.pickups.len()
                + self.hazards.len()
                + self.projectiles.len(),
        );
        let ground_y = self.ground_y();

        for o in &self.obstacles {
            let moving = o.oscillation.is_some();
            let center_x = o.x + o.width / 2.0;
            sprites.push(Sprite {
                kind: SpriteKind::ObstacleTop { moving },
                pos: Vec2::new(center_x, o.top_height / 2.0),
                size: Vec2::new(o.width, o.top_height),
                rotation: 0.0,
            });
            let bottom_h = (ground_y - o.bottom_y).max(0.0);
            sprites.push(Sprite {
                kind: SpriteKind::ObstacleBottom { moving },
                pos: Vec2::new(center_x, o.bottom_y + bottom_h / 2.0),
                size: Vec2::new(o.width, bottom_h),
                rotation: 0.0,
            });
        }

        for p in &self.pickups {
            let kind = match p.kind {
                PickupKind::Coin(tier) => SpriteKind::Coin(tier),
                PickupKind::Shield => SpriteKind::ShieldPickup,
                PickupKind::Weapon { .. } => SpriteKind::WeaponPickup,
            };
            sprites.push(Sprite {
                kind,
                pos: p.pos,
                size: Vec2::splat(p.radius * 2.0),
                rotation: 0.0,
            });
        }

        for h in &self.hazards {
            let class = h.kind.class();
            let rotation = match class {
                HazardClass::Missile => h.vel.y.atan2(h.vel.x),
                _ => 0.0,
            };
            sprites.push(Sprite {
                kind: SpriteKind::Hazard(class),
                pos: h.pos,
                size: h.size,
                rotation,
            });
        }

        for p in &self.projectiles {
            let kind = match p.kind {
                ProjectileKind::Bullet { tier } if p.from_player => SpriteKind::PlayerBullet(tier),
                ProjectileKind::Bullet { .. } => SpriteKind::HazardBullet,
                ProjectileKind::Bomb => SpriteKind::Bomb,
            };
            sprites.push(Sprite {
                kind,
                pos: p.pos,
                size: Vec2::splat(p.radius * 2.0),
                rotation: p.vel.y.atan2(p.vel.x),
            });
        }

        // Avatar last so it draws on top
        let a = &self.avatar;
        sprites.push(Sprite {
            kind: SpriteKind::Avatar {
                shield: a.shield,
                weapon_level: a.weapon_level,
            },
            pos: a.pos,
            size: a.size,
            rotation: a.rotation,
        });

        Snapshot {
            status: self.status,
            score: self.totals.score,
            coins: self.totals.coins,
            kills: self.totals.kills,
            ground_y,
            sprites,
        }
    }
}
