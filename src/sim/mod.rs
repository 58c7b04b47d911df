//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (collection index)
//! - No rendering or platform dependencies

pub mod body;
pub mod boomerang;
pub mod collision;
pub mod enemy;
pub mod entity;
pub mod geom;
pub mod layout;
pub mod player;
pub mod state;
pub mod tick;

pub use body::{KinematicBody, Side};
pub use boomerang::{Boomerang, Flight, FlightReport, Targets};
pub use collision::{Bounce, land_on_platforms};
pub use enemy::Enemy;
pub use entity::{Drawable, Sprite, SpriteKind, Updatable, World};
pub use geom::Rect;
pub use layout::{Layout, LayoutPreset, Platform, UnknownLayout};
pub use player::{Player, PlayerIntent};
pub use state::{GameEvent, GamePhase, Session, Snapshot};
pub use tick::{TickInput, tick};
