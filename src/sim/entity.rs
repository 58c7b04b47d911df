//! Capabilities shared by simulated entities
//!
//! `Updatable` entities advance one tick against the static [`World`];
//! `Drawable` entities expose a rectangle for the renderer. Platforms are
//! drawable only.

use glam::Vec2;
use serde::Serialize;

use super::geom::Rect;
use super::layout::Platform;
use crate::tuning::Tuning;

/// Static surroundings every entity steps against
#[derive(Debug, Clone, Copy)]
pub struct World<'a> {
    /// Arena width and height
    pub arena: Vec2,
    pub platforms: &'a [Platform],
    pub tuning: &'a Tuning,
}

/// Something that advances one fixed tick
pub trait Updatable {
    /// Per-entity inputs beyond the world (intents, RNG, targets)
    type Context<'a>;
    /// What the tick reports back to the session
    type Outcome;

    fn update(&mut self, world: &World<'_>, ctx: Self::Context<'_>) -> Self::Outcome;
}

/// What a sprite represents, for colour lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpriteKind {
    Platform,
    Player,
    Enemy,
    Boomerang,
}

/// Read-only view of one entity for a single frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sprite {
    pub rect: Rect,
    pub kind: SpriteKind,
}

/// Something the renderer can draw
pub trait Drawable {
    /// `None` when the entity is currently hidden
    fn sprite(&self) -> Option<Sprite>;
}

impl Drawable for Platform {
    fn sprite(&self) -> Option<Sprite> {
        Some(Sprite {
            rect: self.rect,
            kind: SpriteKind::Platform,
        })
    }
}
