//! Data-driven game balance
//!
//! Every physics constant the simulation reads lives in [`Tuning`]. The
//! defaults reproduce the reference feel; a JSON document can override any
//! subset of fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// Errors produced while loading tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Physics and gameplay constants, in pixels and pixels-per-tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Added to vertical velocity every tick
    pub gravity: f32,
    /// Horizontal velocity multiplier applied to the player every tick
    pub damping: f32,
    /// Extra depth below a platform's bottom edge that still counts as a landing
    pub landing_slack: f32,

    pub player_width: f32,
    pub player_height: f32,
    /// Horizontal speed cap for input acceleration
    pub player_speed: f32,
    /// Velocity change per tick while a direction is held
    pub player_accel: f32,
    /// Vertical velocity set on jump (negative is up)
    pub jump_velocity: f32,
    pub starting_lives: u8,

    pub enemy_width: f32,
    pub enemy_height: f32,
    /// Wander speed magnitude range `[min, max)`
    pub enemy_speed_min: f32,
    pub enemy_speed_max: f32,
    /// Per-tick chance of reversing direction
    pub enemy_reverse_chance: f64,
    /// Per-tick chance of jumping while grounded
    pub enemy_jump_chance: f64,
    /// Jump impulse magnitude range `[min, max)`
    pub enemy_jump_min: f32,
    pub enemy_jump_max: f32,

    pub boomerang_size: f32,
    pub boomerang_speed: f32,
    /// Distance to the player centre at which a returning boomerang is caught
    pub return_epsilon: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.6,
            damping: 0.8,
            landing_slack: 0.0,

            player_width: 50.0,
            player_height: 50.0,
            player_speed: 4.0,
            player_accel: 1.0,
            jump_velocity: -12.0,
            starting_lives: 3,

            enemy_width: 50.0,
            enemy_height: 50.0,
            enemy_speed_min: 0.3,
            enemy_speed_max: 1.5,
            enemy_reverse_chance: 0.01,
            enemy_jump_chance: 0.005,
            enemy_jump_min: 10.0,
            enemy_jump_max: 15.0,

            boomerang_size: 30.0,
            boomerang_speed: 10.0,
            return_epsilon: 20.0,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document over the defaults and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let finite = [
            ("gravity", self.gravity),
            ("damping", self.damping),
            ("landing_slack", self.landing_slack),
            ("player_speed", self.player_speed),
            ("player_accel", self.player_accel),
            ("jump_velocity", self.jump_velocity),
            ("enemy_speed_min", self.enemy_speed_min),
            ("enemy_speed_max", self.enemy_speed_max),
            ("enemy_jump_min", self.enemy_jump_min),
            ("enemy_jump_max", self.enemy_jump_max),
            ("boomerang_speed", self.boomerang_speed),
            ("return_epsilon", self.return_epsilon),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be finite",
                });
            }
        }

        let sizes = [
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("enemy_width", self.enemy_width),
            ("enemy_height", self.enemy_height),
            ("boomerang_size", self.boomerang_size),
        ];
        for (field, value) in sizes {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be positive",
                });
            }
        }

        // Bodies must leave room to move, and scattered spawns need a non-empty x range
        let fits = [
            ("player_width", self.player_width, ARENA_WIDTH),
            ("player_height", self.player_height, ARENA_HEIGHT),
            ("enemy_width", self.enemy_width, ARENA_WIDTH),
            ("enemy_height", self.enemy_height, ARENA_HEIGHT),
            ("boomerang_size", self.boomerang_size, ARENA_WIDTH.min(ARENA_HEIGHT)),
        ];
        for (field, value, limit) in fits {
            if value >= limit {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be smaller than the arena",
                });
            }
        }

        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(TuningError::Invalid {
                field: "damping",
                reason: "must be between 0 and 1 exclusive",
            });
        }
        if self.landing_slack < 0.0 {
            return Err(TuningError::Invalid {
                field: "landing_slack",
                reason: "must not be negative",
            });
        }
        for (field, chance) in [
            ("enemy_reverse_chance", self.enemy_reverse_chance),
            ("enemy_jump_chance", self.enemy_jump_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be a probability in [0, 1]",
                });
            }
        }
        if !(self.enemy_speed_min >= 0.0 && self.enemy_speed_min < self.enemy_speed_max) {
            return Err(TuningError::Invalid {
                field: "enemy_speed_min",
                reason: "must be non-negative and below enemy_speed_max",
            });
        }
        if !(self.enemy_jump_min >= 0.0 && self.enemy_jump_min < self.enemy_jump_max) {
            return Err(TuningError::Invalid {
                field: "enemy_jump_min",
                reason: "must be non-negative and below enemy_jump_max",
            });
        }
        if self.boomerang_speed <= 0.0 {
            return Err(TuningError::Invalid {
                field: "boomerang_speed",
                reason: "must be positive",
            });
        }
        // The catch radius must exceed one step, or a homing boomerang can orbit forever
        if self.return_epsilon <= self.boomerang_speed / 2.0 {
            return Err(TuningError::Invalid {
                field: "return_epsilon",
                reason: "must exceed half of boomerang_speed",
            });
        }
        if self.starting_lives == 0 {
            return Err(TuningError::Invalid {
                field: "starting_lives",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}
