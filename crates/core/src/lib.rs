//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the game rules and session state. It has no
//! dependencies on terminals, timers or I/O: time enters only as calls to
//! [`GameState::tick`], and randomness only through a [`PieceSource`].
//!
//! # Module Structure
//!
//! - [`board`]: Playfield grid with placement checks and line clearing
//! - [`config`]: Validated board dimensions
//! - [`game_state`]: Session state machine, commands and the lock sequence
//! - [`pieces`]: Piece catalog and clockwise shape rotation
//! - [`rng`]: Piece sources (uniform random or scripted)
//! - [`scoring`]: Points, levels and gravity intervals
//! - [`snapshot`]: Read-only views for renderers
//!
//! # Game Rules
//!
//! - Pieces spawn centered at the top and rotate clockwise without wall kicks.
//! - Clearing `n` lines scores `n * 100 * level`; soft drop scores 1 per row
//!   and hard drop 2 per row.
//! - The level rises every 10 lines and gravity speeds up by 100ms per level
//!   down to 100ms.
//! - The game ends when a freshly spawned piece does not fit.
//!
//! # Example
//!
//! ```
//! use tui_blockfall_core::{BoardConfig, GameState, SequenceSource};
//! use tui_blockfall_core::types::{GameCommand, PieceKind};
//!
//! let mut game = GameState::new(BoardConfig::default(), SequenceSource::repeat(PieceKind::O));
//! game.start();
//!
//! game.apply_command(GameCommand::MoveRight);
//! game.apply_command(GameCommand::HardDrop);
//!
//! // Hard drop awards 2 points per row
//! assert_eq!(game.score(), 36);
//! ```

pub mod board;
pub mod config;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tui_blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::{BoardConfig, ConfigError};
pub use game_state::{ActivePiece, GameState, LockEvent, StepOutcome};
pub use pieces::{base_shape, catalog, CatalogPiece, Shape};
pub use rng::{PieceSource, SequenceSource, UniformSource};
pub use scoring::{drop_score, level_for_lines, line_clear_score, tick_interval_ms};
pub use snapshot::{ActiveSnapshot, GameSnapshot, NextSnapshot};
