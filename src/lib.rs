//! Flapstorm - a side-scrolling flap-and-dodge arcade game
//!
//! Core modules:
//! - `sim`: Per-frame simulation (physics, spawning, power-ups, collisions, scoring)
//! - `profile`: Difficulty profiles (tunable constants and feature flags)
//! - `progression`: High scores and achievements fed by session summaries
//! - `error`: Errors raised while loading profiles or progress

pub mod error;
pub mod profile;
pub mod progression;
pub mod sim;

pub use error::GameError;
pub use profile::{Difficulty, DifficultyProfile};
pub use progression::{HighScores, Progress};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Largest frame step fed into integration (stalls are clamped to this)
    pub const MAX_FRAME_DT: f32 = 1.0 / 30.0;

    /// Default playfield dimensions
    pub const FIELD_WIDTH: f32 = 400.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Avatar geometry
    pub const AVATAR_X_FRACTION: f32 = 0.2;
    pub const AVATAR_WIDTH: f32 = 40.0;
    pub const AVATAR_HEIGHT: f32 = 30.0;
    /// Hitbox shrink on every side for fair obstacle/hazard contacts
    pub const HITBOX_PADDING: f32 = 5.0;
    /// Radius used for projectile contacts against the avatar
    pub const AVATAR_HIT_RADIUS: f32 = 14.0;
    /// Radius used for pickup collection
    pub const AVATAR_COLLECT_RADIUS: f32 = 20.0;

    /// Minimum time between two accepted jumps (seconds)
    pub const JUMP_DEBOUNCE: f32 = 0.05;
    /// Downward speed after touching the ceiling
    pub const CEILING_BOUNCE_SPEED: f32 = 50.0;

    /// Rotation (degrees) follows velocity with per-frame smoothing
    pub const ROTATION_SMOOTHING: f32 = 0.15;
    pub const MAX_DIVE_PITCH: f32 = 80.0;
    pub const MAX_CLIMB_PITCH: f32 = 30.0;

    /// Obstacle geometry
    pub const OBSTACLE_WIDTH: f32 = 70.0;
    pub const OBSTACLE_MIN_HEIGHT: f32 = 70.0;
    pub const OBSTACLE_MARGIN: f32 = 30.0;

    /// Pickup geometry
    pub const COIN_RADIUS: f32 = 12.0;
    pub const POWERUP_RADIUS: f32 = 15.0;

    /// Shield capacity per tier
    pub const ENHANCED_SHIELD_HITS: u32 = 3;
    /// Highest weapon level
    pub const MAX_WEAPON_LEVEL: u8 = 3;
}

/// Unit vector pointing from `from` toward `to`
///
/// Falls back to `fallback` when the points coincide (or the distance is not
/// finite) so callers never divide by zero or propagate NaN.
#[inline]
pub fn direction_or(from: Vec2, to: Vec2, fallback: Vec2) -> Vec2 {
    let delta = to - from;
    let len = delta.length();
    if len > f32::EPSILON && len.is_finite() {
        delta / len
    } else {
        fallback
    }
}
