//! Collision detection and response for boxes
//!
//! Walkers (player and enemies) only ever collide with the *top* of a
//! platform: there is no side or ceiling resolution, so bodies jump up
//! through platforms and walk off their sides freely. The landing window is
//! the platform's own thickness plus `slack`; a body falling faster than that
//! per tick can tunnel through a thin platform. That is a known limitation of
//! the discrete step, not something the resolver tries to repair.

use glam::Vec2;

use super::body::KinematicBody;
use super::geom::Rect;
use super::layout::Platform;

/// Which velocity components a bounce flips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounce {
    pub flip_x: bool,
    pub flip_y: bool,
}

impl Bounce {
    pub const X: Bounce = Bounce {
        flip_x: true,
        flip_y: false,
    };
    pub const Y: Bounce = Bounce {
        flip_x: false,
        flip_y: true,
    };

    #[inline]
    pub fn any(&self) -> bool {
        self.flip_x || self.flip_y
    }

    /// Reflect the flagged velocity components
    #[inline]
    pub fn apply(&self, vel: Vec2) -> Vec2 {
        Vec2::new(
            if self.flip_x { -vel.x } else { vel.x },
            if self.flip_y { -vel.y } else { vel.y },
        )
    }
}

/// True if a falling body's bottom edge sits inside the platform's landing window
#[inline]
pub fn is_landing(body: &KinematicBody, platform: &Rect, slack: f32) -> bool {
    let rect = body.rect();
    rect.overlaps_x(platform)
        && rect.bottom() > platform.y
        && rect.bottom() < platform.bottom() + slack
        && body.vel.y >= 0.0
}

/// Land the body on any platform whose top it is falling through
///
/// Returns the index of the last platform landed on. Never clears
/// `on_ground`; the floor check earlier in the step owns that.
pub fn land_on_platforms(body: &mut KinematicBody, platforms: &[Platform], slack: f32) -> Option<usize> {
    let mut landed = None;
    for (i, platform) in platforms.iter().enumerate() {
        if is_landing(body, &platform.rect, slack) {
            body.pos.y = platform.rect.y - body.size.y;
            body.land();
            landed = Some(i);
        }
    }
    landed
}

/// Bounce off the arena bounds: each axis that left the arena flips
pub fn arena_bounce(rect: &Rect, arena: Vec2) -> Bounce {
    Bounce {
        flip_x: rect.x < 0.0 || rect.right() > arena.x,
        flip_y: rect.y < 0.0 || rect.bottom() > arena.y,
    }
}

/// Axis-aware bounce of a moving box against a platform
///
/// `prev` is the box before this tick's move. If it was entirely above or
/// below the platform the hit is vertical and `vy` flips; otherwise the box
/// came in from the side and `vx` flips.
pub fn platform_bounce(prev: &Rect, current: &Rect, platform: &Rect) -> Option<Bounce> {
    if !current.overlaps(platform) {
        return None;
    }
    let from_above = prev.bottom() <= platform.y;
    let from_below = prev.y >= platform.bottom();
    if from_above || from_below {
        Some(Bounce::Y)
    } else {
        Some(Bounce::X)
    }
}

/// First platform the box hits this tick, with the bounce it produces
pub fn first_platform_bounce(prev: &Rect, current: &Rect, platforms: &[Platform]) -> Option<(usize, Bounce)> {
    platforms
        .iter()
        .enumerate()
        .find_map(|(i, p)| platform_bounce(prev, current, &p.rect).map(|b| (i, b)))
}
