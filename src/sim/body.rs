//! Kinematic body shared by the player, enemies and the boomerang

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use crate::is_finite_vec;

/// Arena wall touched during a horizontal clamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Position, velocity and ground state of a box-shaped entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KinematicBody {
    /// Top-left corner
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub size: Vec2,
    /// Recomputed every step; only valid right after `step` + platform resolution
    pub on_ground: bool,
    pub jumping: bool,
}

impl KinematicBody {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            on_ground: false,
            jumping: false,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Place the body at `pos` at rest, airborne
    pub fn teleport(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.on_ground = false;
        self.jumping = false;
    }

    /// Apply gravity, optional horizontal damping, then move by the velocity
    pub fn integrate(&mut self, gravity: f32, damping: Option<f32>) {
        self.vel.y += gravity;
        if let Some(factor) = damping {
            self.vel.x *= factor;
        }
        self.pos += self.vel;
    }

    /// Keep the body horizontally inside `[0, arena_width - w]`
    ///
    /// Returns the wall that was touched, if any.
    pub fn clamp_x(&mut self, arena_width: f32) -> Option<Side> {
        if self.pos.x <= 0.0 {
            self.pos.x = 0.0;
            Some(Side::Left)
        } else if self.pos.x + self.size.x >= arena_width {
            self.pos.x = arena_width - self.size.x;
            Some(Side::Right)
        } else {
            None
        }
    }

    /// Snap onto the arena floor if the body sank below it
    ///
    /// Sets `on_ground` either way; the platform pass may only turn it back on.
    pub fn settle_on_floor(&mut self, arena_height: f32) {
        if self.bottom() > arena_height {
            self.pos.y = arena_height - self.size.y;
            self.land();
        } else {
            self.on_ground = false;
        }
    }

    /// Full per-tick step: integrate, clamp to the side walls, settle on the floor
    pub fn step(&mut self, gravity: f32, damping: Option<f32>, arena: Vec2) -> Option<Side> {
        self.integrate(gravity, damping);
        let side = self.clamp_x(arena.x);
        self.settle_on_floor(arena.y);
        side
    }

    /// Stop vertical motion and mark the body as resting on something
    #[inline]
    pub fn land(&mut self) {
        self.vel.y = 0.0;
        self.on_ground = true;
        self.jumping = false;
    }

    /// Apply a jump impulse if the body is resting and not already mid-jump
    pub fn try_jump(&mut self, velocity: f32) -> bool {
        if self.on_ground && !self.jumping {
            self.vel.y = velocity;
            self.on_ground = false;
            self.jumping = true;
            true
        } else {
            false
        }
    }

    /// True when position and velocity are both finite
    #[inline]
    pub fn is_finite(&self) -> bool {
        is_finite_vec(self.pos) && is_finite_vec(self.vel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

    const ARENA: Vec2 = Vec2::new(ARENA_WIDTH, ARENA_HEIGHT);

    fn body_at(x: f32, y: f32) -> KinematicBody {
        KinematicBody::new(Vec2::new(x, y), Vec2::new(50.0, 50.0))
    }

    #[test]
    fn test_integrate_applies_gravity_then_moves() {
        let mut body = body_at(100.0, 100.0);
        body.vel = Vec2::new(4.0, 0.0);
        body.integrate(0.5, Some(0.8));
        assert!((body.vel.y - 0.5).abs() < 1e-6);
        assert!((body.vel.x - 3.2).abs() < 1e-6);
        // Position uses the updated velocity on both axes
        assert!((body.pos.x - 103.2).abs() < 1e-4);
        assert!((body.pos.y - 100.5).abs() < 1e-4);
    }

    #[test]
    fn test_no_damping_keeps_horizontal_speed() {
        let mut body = body_at(100.0, 100.0);
        body.vel = Vec2::new(1.25, 0.0);
        body.integrate(0.6, None);
        assert_eq!(body.vel.x, 1.25);
    }

    #[test]
    fn test_clamp_reports_side() {
        let mut body = body_at(-5.0, 0.0);
        assert_eq!(body.clamp_x(ARENA_WIDTH), Some(Side::Left));
        assert_eq!(body.pos.x, 0.0);

        let mut body = body_at(ARENA_WIDTH - 10.0, 0.0);
        assert_eq!(body.clamp_x(ARENA_WIDTH), Some(Side::Right));
        assert_eq!(body.pos.x, ARENA_WIDTH - 50.0);

        let mut body = body_at(300.0, 0.0);
        assert_eq!(body.clamp_x(ARENA_WIDTH), None);
    }

    #[test]
    fn test_floor_snap() {
        let mut body = body_at(100.0, ARENA_HEIGHT - 40.0);
        body.vel.y = 6.0;
        body.jumping = true;
        body.settle_on_floor(ARENA_HEIGHT);
        assert_eq!(body.bottom(), ARENA_HEIGHT);
        assert_eq!(body.vel.y, 0.0);
        assert!(body.on_ground);
        assert!(!body.jumping);
    }

    #[test]
    fn test_airborne_clears_ground_flag() {
        let mut body = body_at(100.0, 100.0);
        body.on_ground = true;
        body.step(0.6, None, ARENA);
        assert!(!body.on_ground);
    }

    #[test]
    fn test_jump_requires_ground() {
        let mut body = body_at(100.0, 100.0);
        assert!(!body.try_jump(-12.0));
        body.on_ground = true;
        assert!(body.try_jump(-12.0));
        assert_eq!(body.vel.y, -12.0);
        assert!(body.jumping);
        assert!(!body.on_ground);
        // Cannot double jump
        body.on_ground = true;
        assert!(!body.try_jump(-12.0));
    }

    #[test]
    fn test_non_finite_detected() {
        let mut body = body_at(0.0, 0.0);
        assert!(body.is_finite());
        body.vel.x = f32::NAN;
        assert!(!body.is_finite());
    }
}
