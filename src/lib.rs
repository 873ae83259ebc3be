//! Park Dash - a small arena arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, movement, spawning, energy, scenes)
//! - `input`: Keyboard/touch input folded into one movement vector
//! - `tuning`: Data-driven game balance

pub mod input;
pub mod sim;
pub mod tuning;

pub use input::InputState;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena dimensions (logical units)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Player movement speed (units/second)
    pub const PLAYER_SPEED: f32 = 320.0;
    pub const PLAYER_RADIUS: f32 = 24.0;

    /// Energy and lives
    pub const MAX_ENERGY: f32 = 100.0;
    pub const START_LIVES: u8 = 3;
    /// Energy lost once per decay interval
    pub const ENERGY_DECAY: f32 = 2.0;
    pub const ENERGY_DECAY_INTERVAL: f32 = 1.0;

    /// Item populations
    pub const POWERUP_TARGET: usize = 3;
    pub const HAZARD_TARGET: usize = 3;
    pub const MAINTENANCE_INTERVAL: f32 = 1.0;
    pub const ITEM_RADIUS: f32 = 16.0;
    pub const ITEM_MIN_SPEED: f32 = 100.0;
    pub const ITEM_MAX_SPEED: f32 = 200.0;
    /// Spawn positions keep at least this far inside the arena
    pub const SPAWN_EDGE_MARGIN: f32 = 50.0;
    /// Items wander: heading re-drawn after a delay in this range (seconds)
    pub const WANDER_MIN_DELAY: f32 = 2.0;
    pub const WANDER_MAX_DELAY: f32 = 4.0;

    /// Ambient rain
    pub const RAIN_INTERVAL: f32 = 0.1;
    pub const RAIN_PER_BURST: u32 = 4;
    pub const RAIN_FALL_SPEED: f32 = 420.0;
    pub const RAIN_CULL_MARGIN: f32 = 20.0;

    /// Touch input
    pub const TOUCH_DEAD_ZONE: f32 = 8.0;
    pub const TOUCH_FULL_DEFLECTION: f32 = 60.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Wrap a coordinate that left `[0, extent]` onto the opposite edge.
///
/// Only a single crossing is handled: `-1` becomes `extent`, `extent + 1`
/// becomes `0`. Values already inside are returned unchanged.
#[inline]
pub fn wrap_coord(v: f32, extent: f32) -> f32 {
    if v < 0.0 {
        extent
    } else if v > extent {
        0.0
    } else {
        v
    }
}

/// Clamp each component of `v` to [-1, 1]
#[inline]
pub fn clamp_unit(v: Vec2) -> Vec2 {
    v.clamp(Vec2::splat(-1.0), Vec2::splat(1.0))
}
