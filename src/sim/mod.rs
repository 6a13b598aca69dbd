//! Per-frame simulation module
//!
//! All gameplay logic lives here. This module stays pure:
//! - Clamped frame deltas only
//! - Seeded RNG only
//! - Stable iteration order (insertion order, ids ascending)
//! - No rendering, audio or storage dependencies

pub mod avatar;
pub mod collision;
pub mod hazards;
pub mod obstacles;
pub mod pickups;
pub mod resolve;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Aabb, box_hits_gap, circle_aabb_overlap, circles_overlap};
pub use resolve::{Threat, detect_threats, resolve_collisions};
pub use snapshot::{Snapshot, Sprite, SpriteKind};
pub use state::{
    Avatar, BulletTier, CoinTier, GameEvent, GameState, Hazard, HazardClass, HazardKind, Obstacle,
    Pickup, PickupKind, Projectile, ProjectileKind, SessionStatus, SessionSummary, SessionTotals,
    ShieldLevel,
};
pub use tick::{TickInput, clamp_frame_dt, tick};
