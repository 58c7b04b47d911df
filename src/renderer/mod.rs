//! Canvas 2D rendering module
//!
//! Every entity is a filled rectangle; the renderer only needs the sprite
//! list and a colour per sprite kind.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use crate::sim::SpriteKind;

/// Frame clear colour
pub const BACKGROUND: &str = "#87CEEB";

/// CSS fill colour for a sprite kind
pub fn fill_style(kind: SpriteKind) -> &'static str {
    match kind {
        SpriteKind::Platform => "#444",
        SpriteKind::Player => "#0000FF",
        SpriteKind::Enemy => "#008000",
        SpriteKind::Boomerang => "#FFA500",
    }
}
