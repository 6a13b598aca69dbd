//! Game state and core simulation types
//!
//! Every live entity of a session is owned here; the renderer and the
//! progression layer only ever see snapshots and one-shot payloads.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::profile::DifficultyProfile;

/// Current status of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Waiting for the first jump
    Idle,
    /// Active gameplay
    Playing,
    /// Run ended; frozen until reset
    GameOver,
}

/// Protective shield tier held by the avatar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShieldLevel {
    #[default]
    None,
    /// Absorbs a single hit
    Basic,
    /// Absorbs `ENHANCED_SHIELD_HITS` hits
    Enhanced,
}

/// The player-controlled avatar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    /// Centre of the avatar
    pub pos: Vec2,
    /// Vertical velocity (positive = falling)
    pub velocity: f32,
    /// Pitch in degrees (positive = nose down)
    pub rotation: f32,
    pub size: Vec2,
    pub shield: ShieldLevel,
    pub shield_hits: u32,
    /// 0 = unarmed, 1..=3 armed
    pub weapon_level: u8,
    pub weapon_ammo: u32,
    /// Seconds until the weapon may fire again
    pub fire_cooldown: f32,
    /// Session clock of the last accepted jump
    pub last_jump: Option<f32>,
}

/// Coin value tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoinTier {
    Silver,
    Gold,
    Diamond,
}

impl CoinTier {
    pub fn value(&self) -> u64 {
        match self {
            CoinTier::Silver => 1,
            CoinTier::Gold => 3,
            CoinTier::Diamond => 5,
        }
    }
}

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    Coin(CoinTier),
    Shield,
    Weapon { ammo: u32 },
}

/// A collectible pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub kind: PickupKind,
    pub pos: Vec2,
    pub radius: f32,
    pub collected: bool,
}

/// Vertical oscillation of a moving obstacle pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oscillation {
    /// +1 moves the gap down, -1 moves it up
    pub direction: f32,
    pub speed: f32,
    pub original_top_height: f32,
}

/// A top/bottom obstacle pair with a gap between them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    /// Bottom edge of the top obstacle
    pub top_height: f32,
    /// Top edge of the bottom obstacle (`top_height + gap`)
    pub bottom_y: f32,
    pub width: f32,
    pub gap: f32,
    /// Trailing edge has passed the avatar (scored)
    pub passed: bool,
    /// A shield absorbed contact with this pair; it no longer harms
    pub breached: bool,
    pub oscillation: Option<Oscillation>,
}

impl Obstacle {
    pub fn new(id: u32, x: f32, top_height: f32, gap: f32) -> Self {
        Self {
            id,
            x,
            top_height,
            bottom_y: top_height + gap,
            width: OBSTACLE_WIDTH,
            gap,
            passed: false,
            breached: false,
            oscillation: None,
        }
    }

    /// Right (trailing) edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Hazard classes, without per-behavior state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardClass {
    Drifter,
    Missile,
    Hunter,
    Bomber,
}

/// Hazard behavior with the state each one needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HazardKind {
    /// Leftward flight with a sinusoidal bob around `base_y`
    Drifter { base_y: f32, phase: f32 },
    /// Closes in while softly tracking the avatar's height
    Missile,
    /// Parks at `hold_x`, hovers and fires aimed shots
    Hunter {
        hold_x: f32,
        anchor_y: f32,
        hover_phase: f32,
        fire_timer: f32,
        /// Seconds left before the hunter leaves
        linger: f32,
    },
    /// Crosses at altitude dropping bombs
    Bomber { drop_timer: f32 },
}

impl HazardKind {
    pub fn class(&self) -> HazardClass {
        match self {
            HazardKind::Drifter { .. } => HazardClass::Drifter,
            HazardKind::Missile => HazardClass::Missile,
            HazardKind::Hunter { .. } => HazardClass::Hunter,
            HazardKind::Bomber { .. } => HazardClass::Bomber,
        }
    }
}

/// A hostile actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    pub kind: HazardKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub health: u32,
}

/// Bullet damage classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletTier {
    Normal,
    Elevated,
    /// Destroys any hazard outright
    Lethal,
}

impl BulletTier {
    /// Tier fired by a weapon level (1..=3)
    pub fn for_weapon_level(level: u8) -> Self {
        match level {
            0 | 1 => BulletTier::Normal,
            2 => BulletTier::Elevated,
            _ => BulletTier::Lethal,
        }
    }

    /// Nominal damage; lethal bullets ignore health entirely
    pub fn damage(&self) -> u32 {
        match self {
            BulletTier::Normal => 1,
            BulletTier::Elevated => 2,
            BulletTier::Lethal => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    Bullet { tier: BulletTier },
    /// Falls under its own gravity
    Bomb,
}

/// A bullet or bomb in flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub kind: ProjectileKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub from_player: bool,
}

impl Projectile {
    pub fn is_bomb(&self) -> bool {
        matches!(self.kind, ProjectileKind::Bomb)
    }
}

/// Running tallies for the current session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTotals {
    pub score: u64,
    pub coins: u64,
    pub kills: u32,
}

/// One-shot payload handed to the progression layer at game over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub final_score: u64,
    pub coins_collected: u64,
    pub kill_count: u32,
}

/// Things that happened during a frame (for audio, HUD and effects)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Jumped,
    ObstaclePassed { score: u64 },
    CoinCollected { tier: CoinTier, value: u64 },
    ShieldCollected { level: ShieldLevel },
    ShieldAbsorbed { remaining: u32 },
    WeaponCollected { level: u8, ammo: u32 },
    WeaponFired { tier: BulletTier },
    WeaponDepleted,
    HazardSpawned { class: HazardClass },
    HazardDestroyed { class: HazardClass },
    GameOver(SessionSummary),
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Sanitized profile the session runs with; change it via `set_profile`
    pub(crate) profile: DifficultyProfile,
    /// Playfield width and height
    pub field: Vec2,
    /// Seed the spawn RNG restarts from on reset
    pub seed: u64,
    pub rng: Pcg32,
    pub status: SessionStatus,
    pub totals: SessionTotals,
    /// Seconds of simulated play
    pub clock: f32,
    pub avatar: Avatar,
    pub obstacles: Vec<Obstacle>,
    pub pickups: Vec<Pickup>,
    pub hazards: Vec<Hazard>,
    pub projectiles: Vec<Projectile>,
    pub obstacle_timer: f32,
    pub hazard_timer: f32,
    pub advanced_timer: f32,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    summary: Option<SessionSummary>,
    next_id: u32,
}

impl GameState {
    /// Create a session on the default playfield
    pub fn new(profile: DifficultyProfile, seed: u64) -> Self {
        Self::with_field(profile, seed, FIELD_WIDTH, FIELD_HEIGHT)
    }

    /// Create a session on a playfield of the given size
    pub fn with_field(profile: DifficultyProfile, seed: u64, width: f32, height: f32) -> Self {
        let field = Vec2::new(width.max(1.0), height.max(1.0));
        Self {
            profile: profile.sanitized(),
            field,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            status: SessionStatus::Idle,
            totals: SessionTotals::default(),
            clock: 0.0,
            avatar: Avatar::spawn(field),
            obstacles: Vec::new(),
            pickups: Vec::new(),
            hazards: Vec::new(),
            projectiles: Vec::new(),
            obstacle_timer: 0.0,
            hazard_timer: 0.0,
            advanced_timer: 0.0,
            events: Vec::new(),
            summary: None,
            next_id: 1,
        }
    }

    /// Abort the current run and reinitialize everything from the profile
    pub fn reset(&mut self) {
        *self = Self::with_field(self.profile.clone(), self.seed, self.field.x, self.field.y);
    }

    /// Reset with a fresh spawn seed
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.reset();
    }

    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    /// Swap the profile (sanitized) and reset
    pub fn set_profile(&mut self, profile: DifficultyProfile) {
        self.profile = profile;
        self.reset();
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Y coordinate of the ground surface
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.field.y - self.profile.ground_height
    }

    pub fn is_playing(&self) -> bool {
        self.status == SessionStatus::Playing
    }

    /// Add points to the score (ignored unless playing)
    pub fn award(&mut self, points: u64) {
        if self.is_playing() {
            self.totals.score = self.totals.score.saturating_add(points);
        }
    }

    /// Jump command from the player
    ///
    /// The first jump starts the session; later ones are debounced against
    /// the session clock. Returns whether the jump was applied.
    pub fn jump(&mut self) -> bool {
        match self.status {
            SessionStatus::Idle => {
                self.status = SessionStatus::Playing;
                self.avatar.velocity = self.profile.jump_impulse;
                self.avatar.last_jump = Some(self.clock);
                log::info!(
                    "Session started (seed {}, gravity {}, gap {})",
                    self.seed,
                    self.profile.gravity,
                    self.profile.obstacle_gap
                );
                self.events.push(GameEvent::Started);
                self.events.push(GameEvent::Jumped);
                true
            }
            SessionStatus::Playing => {
                let applied = self.avatar.apply_jump(self.profile.jump_impulse, self.clock);
                if applied {
                    self.events.push(GameEvent::Jumped);
                }
                applied
            }
            SessionStatus::GameOver => false,
        }
    }

    /// Terminate the run, capturing the summary (only the first call counts)
    pub fn end_session(&mut self) {
        if !self.is_playing() {
            return;
        }
        let summary = SessionSummary {
            final_score: self.totals.score,
            coins_collected: self.totals.coins,
            kill_count: self.totals.kills,
        };
        self.status = SessionStatus::GameOver;
        self.summary = Some(summary);
        self.events.push(GameEvent::GameOver(summary));
        log::info!(
            "Game over: score {}, coins {}, kills {} after {:.1}s",
            summary.final_score,
            summary.coins_collected,
            summary.kill_count,
            self.clock
        );
    }

    /// The session-end payload, handed out exactly once
    pub fn take_summary(&mut self) -> Option<SessionSummary> {
        self.summary.take()
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
