//! Boomerang flight state machine
//!
//! ```text
//! Idle --throw--> Outbound --hit wall/platform--> Returning --near player--> Idle
//!   ^                 |                               |
//!   +----------- hit enemy (consumed) <---------------+
//! ```
//!
//! Outbound flight is ballistic at a fixed speed with no gravity. The first
//! obstacle reflects one velocity axis (axis-aware: vertical hits flip `vy`,
//! side hits flip `vx`; arena corners flip both) and starts the return.
//! Returning flight homes on the player every tick and ignores platforms.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::KinematicBody;
use super::collision::{arena_bounce, first_platform_bounce};
use super::enemy::Enemy;
use super::entity::{Drawable, Sprite, SpriteKind, Updatable, World};
use super::player::Player;
use crate::direction;
use crate::tuning::Tuning;

/// Flight phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Flight {
    /// Held in the player's hand
    #[default]
    Idle,
    /// Thrown, has not hit anything yet
    Outbound,
    /// Bounced once, homing back to the player
    Returning,
}

/// The player's boomerang
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boomerang {
    pub body: KinematicBody,
    pub flight: Flight,
}

/// Entities the boomerang interacts with during a tick
pub struct Targets<'a> {
    /// Thrower; read only, to follow and home on
    pub player: &'a Player,
    pub enemies: &'a mut [Enemy],
}

/// What happened to the boomerang during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlightReport {
    /// Hit a wall or platform and started returning
    pub bounced: bool,
    /// Reached the player and went idle
    pub caught: bool,
    /// Index of the enemy it killed
    pub killed: Option<usize>,
}

impl Boomerang {
    pub fn new(hand: Vec2, tuning: &Tuning) -> Self {
        let size = Vec2::splat(tuning.boomerang_size);
        Self {
            body: KinematicBody::new(hand - size / 2.0, size),
            flight: Flight::Idle,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.flight != Flight::Idle
    }

    #[inline]
    pub fn is_returning(&self) -> bool {
        self.flight == Flight::Returning
    }

    /// Bouncing is what starts the return, so the two flags always agree
    #[inline]
    pub fn has_bounced(&self) -> bool {
        self.flight == Flight::Returning
    }

    /// Centre the boomerang on `hand`
    pub fn follow(&mut self, hand: Vec2) {
        self.body.pos = hand - self.body.size / 2.0;
    }

    /// Throw from `hand` toward `target` at `speed`
    ///
    /// Ignored while already in flight, and when the target sits exactly on
    /// the hand (no direction to fly in). Returns whether a throw happened.
    pub fn throw(&mut self, hand: Vec2, target: Vec2, speed: f32) -> bool {
        if self.is_active() {
            return false;
        }
        let Some(dir) = direction(target - hand) else {
            return false;
        };
        self.follow(hand);
        self.body.vel = dir * speed;
        self.flight = Flight::Outbound;
        true
    }

    /// Stop flying: clears all flight state
    pub fn recall(&mut self) {
        self.flight = Flight::Idle;
        self.body.vel = Vec2::ZERO;
    }

    fn fly_outbound(&mut self, world: &World<'_>, report: &mut FlightReport) {
        let prev = self.body.rect();
        self.body.pos += self.body.vel;
        let current = self.body.rect();

        let mut bounce = arena_bounce(&current, world.arena);
        if !bounce.any() {
            if let Some((_, hit)) = first_platform_bounce(&prev, &current, world.platforms) {
                bounce = hit;
            }
        }
        if !bounce.any() {
            return;
        }

        self.body.vel = bounce.apply(self.body.vel);
        // Step back out of the obstacle on the reflected axis
        if bounce.flip_x {
            self.body.pos.x = prev.x;
        }
        if bounce.flip_y {
            self.body.pos.y = prev.y;
        }
        self.flight = Flight::Returning;
        report.bounced = true;
    }

    fn fly_home(&mut self, hand: Vec2, tuning: &Tuning, report: &mut FlightReport) {
        let to_hand = hand - self.body.center();
        let dir = match direction(to_hand) {
            Some(dir) if to_hand.length() >= tuning.return_epsilon => dir,
            _ => {
                self.recall();
                report.caught = true;
                return;
            }
        };
        self.body.vel = dir * tuning.boomerang_speed;
        self.body.pos += self.body.vel;
    }

    /// Kill the first live enemy the boomerang overlaps; the boomerang is spent
    fn strike(&mut self, enemies: &mut [Enemy], report: &mut FlightReport) {
        let rect = self.body.rect();
        let hit = enemies
            .iter_mut()
            .enumerate()
            .find(|(_, enemy)| enemy.alive && enemy.body.rect().overlaps(&rect));
        if let Some((index, enemy)) = hit {
            enemy.kill();
            self.recall();
            report.killed = Some(index);
        }
    }
}

impl Updatable for Boomerang {
    type Context<'a> = Targets<'a>;
    type Outcome = FlightReport;

    fn update(&mut self, world: &World<'_>, targets: Targets<'_>) -> FlightReport {
        let mut report = FlightReport::default();
        let hand = targets.player.hand();

        match self.flight {
            Flight::Idle => {
                self.follow(hand);
                return report;
            }
            Flight::Outbound => self.fly_outbound(world, &mut report),
            Flight::Returning => self.fly_home(hand, world.tuning, &mut report),
        }

        if self.is_active() {
            self.strike(targets.enemies, &mut report);
        }
        report
    }
}

impl Drawable for Boomerang {
    fn sprite(&self) -> Option<Sprite> {
        Some(Sprite {
            rect: self.body.rect(),
            kind: SpriteKind::Boomerang,
        })
    }
}
