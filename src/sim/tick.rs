//! Per-frame simulation update
//!
//! One call advances a session by a clamped frame delta, always in the same
//! order: avatar physics, obstacles, hazards and projectiles, pickups,
//! weapon fire, and finally collision resolution.

use super::hazards::{
    advance_hazards, advance_projectiles, resolve_player_hits, update_hazard_spawns,
};
use super::obstacles::{advance_obstacles, update_spawner};
use super::pickups::{update_pickups, update_weapon};
use super::resolve::resolve_collisions;
use super::state::GameState;
use crate::consts::MAX_FRAME_DT;

/// Input commands for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Jump (also starts an idle session)
    pub jump: bool,
    /// Abort the run and reinitialize from the profile
    pub reset: bool,
}

/// Clamp a raw frame delta into `[0, MAX_FRAME_DT]` (NaN counts as zero)
pub fn clamp_frame_dt(dt: f32) -> f32 {
    if dt.is_nan() {
        0.0
    } else {
        dt.clamp(0.0, MAX_FRAME_DT)
    }
}

/// Apply a frame's input, then advance the session
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.reset {
        state.reset();
    }
    if input.jump {
        state.jump();
    }
    state.update(dt);
}

impl GameState {
    /// Advance the session by one frame
    ///
    /// Does nothing unless the session is playing.
    pub fn update(&mut self, dt: f32) {
        if !self.is_playing() {
            return;
        }
        let dt = clamp_frame_dt(dt);
        self.clock += dt;

        self.avatar
            .integrate(dt, self.profile.gravity, self.profile.max_fall_speed);
        self.avatar.clamp_to_ceiling();

        update_spawner(self, dt);
        advance_obstacles(self, dt);

        update_hazard_spawns(self, dt);
        advance_hazards(self, dt);
        advance_projectiles(self, dt);
        resolve_player_hits(self);

        update_pickups(self, dt);
        update_weapon(self, dt);

        resolve_collisions(self);
    }
}
