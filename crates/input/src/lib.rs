//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events 1:1 onto [`crate::types::GameCommand`].
//! There is no key-repeat or auto-shift handling; every press is one command.

pub mod map;

pub use tui_blockfall_types as types;

pub use map::{map_key, should_quit};
