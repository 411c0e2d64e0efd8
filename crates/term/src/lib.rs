//! Terminal "game renderer" module.
//!
//! Draws sessions into a simple framebuffer and flushes it to the terminal
//! with crossterm. [`TerminalRenderer`] implements the engine's
//! [`Renderer`](crate::engine::Renderer) seam, so the run loop never touches
//! the terminal directly.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_blockfall_core as core;
pub use tui_blockfall_engine as engine;
pub use tui_blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
