//! Boomerang Platformer - a single-screen 2D platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, session state)
//! - `renderer`: Canvas 2D drawing of the simulation's sprites
//! - `platform`: Browser input mapping
//! - `tuning`: Data-driven physics constants
//! - `settings`: Player preferences persisted in LocalStorage

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;

    /// Arena dimensions (canvas pixels)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 500.0;
}

/// Unit vector pointing along `delta`, or `None` when it has no usable direction.
///
/// Zero-length and non-finite inputs are rejected instead of producing NaN.
#[inline]
pub fn direction(delta: Vec2) -> Option<Vec2> {
    let len = delta.length();
    if !len.is_finite() || len <= f32::EPSILON {
        return None;
    }
    Some(delta / len)
}

/// True when both components of the vector are finite
#[inline]
pub fn is_finite_vec(v: Vec2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}
