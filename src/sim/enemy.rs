//! Wandering enemies
//!
//! Enemies drift at a constant horizontal speed, bounce off the side walls,
//! randomly turn around and randomly hop while standing on something. All
//! randomness comes from the session RNG so runs replay exactly.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{KinematicBody, Side};
use super::collision::land_on_platforms;
use super::entity::{Drawable, Sprite, SpriteKind, Updatable, World};
use crate::tuning::Tuning;

/// A wandering enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub body: KinematicBody,
    /// Dead enemies keep their slot but skip update, draw and collision
    pub alive: bool,
}

impl Enemy {
    /// An inert enemy slot; `respawn` brings it to life
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            body: KinematicBody::new(Vec2::ZERO, Vec2::new(tuning.enemy_width, tuning.enemy_height)),
            alive: false,
        }
    }

    /// Revive at `pos` with a fresh random wander velocity
    pub fn respawn(&mut self, pos: Vec2, rng: &mut Pcg32, tuning: &Tuning) {
        self.body.teleport(pos);
        self.body.vel.x = wander_speed(rng, tuning);
        self.alive = true;
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }
}

/// Random signed wander speed with magnitude in `[enemy_speed_min, enemy_speed_max)`
pub fn wander_speed(rng: &mut Pcg32, tuning: &Tuning) -> f32 {
    let sign = if rng.random_bool(0.5) { -1.0 } else { 1.0 };
    sign * rng.random_range(tuning.enemy_speed_min..tuning.enemy_speed_max)
}

impl Updatable for Enemy {
    type Context<'a> = &'a mut Pcg32;
    type Outcome = ();

    fn update(&mut self, world: &World<'_>, rng: &mut Pcg32) {
        if !self.alive {
            return;
        }
        let tuning = world.tuning;

        // Enemies keep their wander speed: no damping
        match self.body.step(tuning.gravity, None, world.arena) {
            Some(Side::Left) => self.body.vel.x = self.body.vel.x.abs(),
            Some(Side::Right) => self.body.vel.x = -self.body.vel.x.abs(),
            None => {}
        }
        land_on_platforms(&mut self.body, world.platforms, tuning.landing_slack);

        if self.body.on_ground && rng.random_bool(tuning.enemy_jump_chance) {
            let impulse = rng.random_range(tuning.enemy_jump_min..tuning.enemy_jump_max);
            self.body.try_jump(-impulse);
        }
        if rng.random_bool(tuning.enemy_reverse_chance) {
            self.body.vel.x = -self.body.vel.x;
        }
    }
}

impl Drawable for Enemy {
    fn sprite(&self) -> Option<Sprite> {
        self.alive.then(|| Sprite {
            rect: self.body.rect(),
            kind: SpriteKind::Enemy,
        })
    }
}
