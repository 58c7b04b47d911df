//! Platform abstraction layer
//!
//! Browser input mapping. Kept free of `web-sys` types so the mapping can be
//! tested natively; `main.rs` feeds it raw DOM key names and pointer
//! coordinates.

pub mod input;

pub use input::{Action, InputTracker, client_to_arena};
