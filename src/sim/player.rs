//! Player controller

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::KinematicBody;
use super::collision::land_on_platforms;
use super::entity::{Drawable, Sprite, SpriteKind, Updatable, World};
use crate::tuning::Tuning;

/// Movement intents held during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerIntent {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: KinematicBody,
    /// Horizontal speed cap reachable by holding a direction
    pub speed: f32,
    /// Set by the session when the last life is lost
    pub dead: bool,
}

impl Player {
    pub fn new(spawn: Vec2, tuning: &Tuning) -> Self {
        Self {
            body: KinematicBody::new(spawn, Vec2::new(tuning.player_width, tuning.player_height)),
            speed: tuning.player_speed,
            dead: false,
        }
    }

    /// Back to the spawn point at rest
    pub fn respawn(&mut self, spawn: Vec2) {
        self.body.teleport(spawn);
    }

    /// Where the boomerang rests and returns to
    #[inline]
    pub fn hand(&self) -> Vec2 {
        self.body.center()
    }

    /// Accelerate toward the held direction, one step per tick
    fn steer(&mut self, intent: PlayerIntent, accel: f32) {
        if intent.left && self.body.vel.x > -self.speed {
            self.body.vel.x -= accel;
        }
        if intent.right && self.body.vel.x < self.speed {
            self.body.vel.x += accel;
        }
    }
}

impl Updatable for Player {
    type Context<'a> = PlayerIntent;
    type Outcome = ();

    fn update(&mut self, world: &World<'_>, intent: PlayerIntent) {
        if self.dead {
            return;
        }
        let tuning = world.tuning;

        self.steer(intent, tuning.player_accel);
        if intent.jump {
            self.body.try_jump(tuning.jump_velocity);
        }

        self.body.step(tuning.gravity, Some(tuning.damping), world.arena);
        land_on_platforms(&mut self.body, world.platforms, tuning.landing_slack);
    }
}

impl Drawable for Player {
    fn sprite(&self) -> Option<Sprite> {
        Some(Sprite {
            rect: self.body.rect(),
            kind: SpriteKind::Player,
        })
    }
}
