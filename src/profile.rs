//! Difficulty profiles
//!
//! A profile is the bundle of tunables and feature flags that every part of
//! the simulation reads. Profiles are chosen at session start and never
//! mutated by the simulation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Named difficulty presets
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Hard,
    Crazy,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Hard, Difficulty::Crazy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Hard => "hard",
            Difficulty::Crazy => "crazy",
        }
    }

    /// The preset profile for this difficulty
    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile::easy(),
            Difficulty::Hard => DifficultyProfile::hard(),
            Difficulty::Crazy => DifficultyProfile::crazy(),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "hard" => Ok(Difficulty::Hard),
            "crazy" => Ok(Difficulty::Crazy),
            _ => Err(GameError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// Smallest gap an obstacle pair may have
pub const MIN_OBSTACLE_GAP: f32 = 60.0;
/// Smallest spawn interval for any timer (seconds)
pub const MIN_SPAWN_INTERVAL: f32 = 0.25;
/// Smallest terminal fall speed
pub const MIN_FALL_SPEED: f32 = 100.0;
/// Smallest hunter firing interval (seconds)
pub const MIN_SHOT_INTERVAL: f32 = 0.2;

/// Tunable constants and feature flags for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyProfile {
    // === Physics ===
    /// Downward acceleration (px/s²)
    pub gravity: f32,
    /// Vertical velocity set by a jump (negative = up)
    pub jump_impulse: f32,
    /// Terminal fall speed (px/s)
    pub max_fall_speed: f32,

    // === Obstacles ===
    /// Leftward scroll speed of the world (px/s)
    pub scroll_speed: f32,
    /// Seconds between obstacle pairs
    pub obstacle_spawn_interval: f32,
    /// Vertical gap between top and bottom obstacle
    pub obstacle_gap: f32,
    /// Height of the ground strip at the bottom of the field
    pub ground_height: f32,
    /// Whether some obstacle pairs oscillate vertically
    pub moving_obstacles: bool,
    /// Fraction of spawned pairs that oscillate
    pub moving_obstacle_chance: f32,
    /// Oscillation speed (px/s)
    pub obstacle_move_speed: f32,

    // === Pickups ===
    pub coins_enabled: bool,
    pub coin_spawn_chance: f32,
    pub shield_spawn_chance: f32,
    pub weapon_spawn_chance: f32,

    // === Hazards ===
    pub hazards_enabled: bool,
    /// Seconds between drifter/missile spawns
    pub hazard_spawn_interval: f32,
    /// Score at which hunters and bombers start appearing
    pub advanced_hazard_score: u64,
    /// Hunter/bomber spawn interval right at the threshold (seconds)
    pub advanced_spawn_interval: f32,
    /// Hunter/bomber spawn interval never drops below this
    pub advanced_spawn_floor: f32,
    /// Interval reduction per point scored past the threshold
    pub advanced_interval_step: f32,
    /// Multiplier on hunter approach speed
    pub hunter_speed_multiplier: f32,
    /// Seconds between hunter shots
    pub hunter_shot_interval: f32,

    // === Scoring / shields ===
    /// Score bonus for destroying a hazard
    pub kill_bonus: u64,
    /// Radius swept clear of hazards when the enhanced shield absorbs a hit
    pub shield_absorb_radius: f32,
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Self::easy()
    }
}

impl DifficultyProfile {
    /// Slow, forgiving preset: rare hazards, no shields
    pub fn easy() -> Self {
        Self {
            gravity: 1400.0,
            jump_impulse: -420.0,
            max_fall_speed: 500.0,

            scroll_speed: 150.0,
            obstacle_spawn_interval: 2.2,
            obstacle_gap: 200.0,
            ground_height: 80.0,
            moving_obstacles: false,
            moving_obstacle_chance: 0.0,
            obstacle_move_speed: 40.0,

            coins_enabled: true,
            coin_spawn_chance: 0.5,
            shield_spawn_chance: 0.0,
            weapon_spawn_chance: 0.25,

            hazards_enabled: true,
            hazard_spawn_interval: 15.0,
            advanced_hazard_score: 20,
            advanced_spawn_interval: 12.0,
            advanced_spawn_floor: 6.0,
            advanced_interval_step: 0.1,
            hunter_speed_multiplier: 0.35,
            hunter_shot_interval: 4.0,

            kill_bonus: 5,
            shield_absorb_radius: 90.0,
        }
    }

    pub fn hard() -> Self {
        Self {
            gravity: 2200.0,
            jump_impulse: -520.0,
            max_fall_speed: 750.0,

            scroll_speed: 220.0,
            obstacle_spawn_interval: 1.6,
            obstacle_gap: 160.0,
            ground_height: 80.0,
            moving_obstacles: false,
            moving_obstacle_chance: 0.0,
            obstacle_move_speed: 50.0,

            coins_enabled: true,
            coin_spawn_chance: 0.6,
            shield_spawn_chance: 0.12,
            weapon_spawn_chance: 0.18,

            hazards_enabled: true,
            hazard_spawn_interval: 6.0,
            advanced_hazard_score: 12,
            advanced_spawn_interval: 9.0,
            advanced_spawn_floor: 4.0,
            advanced_interval_step: 0.15,
            hunter_speed_multiplier: 0.5,
            hunter_shot_interval: 2.5,

            kill_bonus: 5,
            shield_absorb_radius: 90.0,
        }
    }

    /// Dense hazards and oscillating obstacles
    pub fn crazy() -> Self {
        Self {
            gravity: 2400.0,
            jump_impulse: -550.0,
            max_fall_speed: 800.0,

            scroll_speed: 260.0,
            obstacle_spawn_interval: 1.4,
            obstacle_gap: 155.0,
            ground_height: 80.0,
            moving_obstacles: true,
            moving_obstacle_chance: 0.35,
            obstacle_move_speed: 60.0,

            coins_enabled: true,
            coin_spawn_chance: 0.7,
            shield_spawn_chance: 0.15,
            weapon_spawn_chance: 0.12,

            hazards_enabled: true,
            hazard_spawn_interval: 2.0,
            advanced_hazard_score: 15,
            advanced_spawn_interval: 7.0,
            advanced_spawn_floor: 2.5,
            advanced_interval_step: 0.2,
            hunter_speed_multiplier: 0.8,
            hunter_shot_interval: 1.5,

            kill_bonus: 5,
            shield_absorb_radius: 90.0,
        }
    }

    /// Parse a profile from JSON; missing fields fall back to the easy preset
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let profile: DifficultyProfile = serde_json::from_str(json)?;
        Ok(profile.sanitized())
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Clamp values that would produce degenerate geometry or timers
    pub fn sanitized(mut self) -> Self {
        clamp_min(&mut self.obstacle_gap, MIN_OBSTACLE_GAP, "obstacle_gap");
        clamp_min(
            &mut self.obstacle_spawn_interval,
            MIN_SPAWN_INTERVAL,
            "obstacle_spawn_interval",
        );
        clamp_min(
            &mut self.hazard_spawn_interval,
            MIN_SPAWN_INTERVAL,
            "hazard_spawn_interval",
        );
        clamp_min(
            &mut self.advanced_spawn_floor,
            MIN_SPAWN_INTERVAL,
            "advanced_spawn_floor",
        );
        clamp_min(
            &mut self.advanced_spawn_interval,
            self.advanced_spawn_floor,
            "advanced_spawn_interval",
        );
        clamp_min(&mut self.advanced_interval_step, 0.0, "advanced_interval_step");
        clamp_min(&mut self.max_fall_speed, MIN_FALL_SPEED, "max_fall_speed");
        clamp_min(&mut self.gravity, 0.0, "gravity");
        clamp_min(&mut self.ground_height, 0.0, "ground_height");
        clamp_min(&mut self.scroll_speed, 0.0, "scroll_speed");
        clamp_min(&mut self.obstacle_move_speed, 0.0, "obstacle_move_speed");
        clamp_min(
            &mut self.hunter_shot_interval,
            MIN_SHOT_INTERVAL,
            "hunter_shot_interval",
        );
        clamp_min(
            &mut self.hunter_speed_multiplier,
            0.0,
            "hunter_speed_multiplier",
        );
        clamp_min(&mut self.shield_absorb_radius, 0.0, "shield_absorb_radius");

        if self.jump_impulse.is_nan() || self.jump_impulse > -1.0 {
            log::warn!(
                "Profile jump_impulse {} must point upward, using -1",
                self.jump_impulse
            );
            self.jump_impulse = -1.0;
        }

        for (value, name) in [
            (&mut self.moving_obstacle_chance, "moving_obstacle_chance"),
            (&mut self.coin_spawn_chance, "coin_spawn_chance"),
            (&mut self.shield_spawn_chance, "shield_spawn_chance"),
            (&mut self.weapon_spawn_chance, "weapon_spawn_chance"),
        ] {
            let clamped = if value.is_finite() {
                value.clamp(0.0, 1.0)
            } else {
                0.0
            };
            if clamped != *value {
                log::warn!("Profile {} {} clamped to {}", name, value, clamped);
                *value = clamped;
            }
        }

        self
    }
}

/// Raise `value` to `min` (NaN counts as below)
fn clamp_min(value: &mut f32, min: f32, name: &str) {
    if value.is_nan() || *value < min {
        log::warn!("Profile {} {} clamped to {}", name, value, min);
        *value = min;
    }
}
