//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! All types are plain data with no game logic, so they can be shared by the
//! engine core, the loop controller, the key mapper and the renderer.
//!
//! # Board Dimensions
//!
//! Default playfield dimensions (configurable per session):
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! # Timing and Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_TICK_MS` | 1000 | Gravity interval at level 1 |
//! | `TICK_STEP_MS` | 100 | Interval reduction per level |
//! | `MIN_TICK_MS` | 100 | Fastest gravity interval |
//! | `LINES_PER_LEVEL` | 10 | Cleared lines needed per level |
//! | `LINE_CLEAR_POINTS` | 100 | Points per cleared line, times level |
//!
//! # Examples
//!
//! ```
//! use tui_blockfall_types::{GameCommand, PieceKind, PieceColor, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! let piece = PieceKind::T;
//! assert_eq!(PieceKind::from_str("t"), Some(piece));
//! assert_eq!(piece.color(), PieceColor::Purple);
//!
//! assert_eq!(GameCommand::from_str("hardDrop"), Some(GameCommand::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Default board width in cells (10 columns)
pub const BOARD_WIDTH: usize = 10;

/// Default board height in cells (20 rows)
pub const BOARD_HEIGHT: usize = 20;

/// Gravity interval at level 1 (1000ms = 1 second per row)
pub const BASE_TICK_MS: u32 = 1000;

/// Gravity interval reduction per level gained
pub const TICK_STEP_MS: u32 = 100;

/// Fastest gravity interval
pub const MIN_TICK_MS: u32 = 100;

/// Cleared lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Points per cleared line at level 1 (multiplied by the level)
pub const LINE_CLEAR_POINTS: u32 = 100;

/// Points per row for a soft drop
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per row for a hard drop
pub const HARD_DROP_POINTS: u32 = 2;

/// Particle count emitted per cell of a cleared row
pub const LINE_CLEAR_BURST: u8 = 3;

/// Particle count emitted per cell of a hard-dropped piece at its landing spot
pub const HARD_DROP_BURST: u8 = 2;

/// The seven tetromino piece kinds
///
/// Each kind has a fixed base shape and color:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **L**: Orange
/// - **J**: Blue
/// - **S**: Green
/// - **Z**: Red
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    O,
    T,
    L,
    J,
    S,
    Z,
}

impl PieceKind {
    /// All kinds in catalog order. `PieceKind::ALL[k.index()] == k`.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Position of this kind in [`PieceKind::ALL`].
    pub const fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::L => 3,
            PieceKind::J => 4,
            PieceKind::S => 5,
            PieceKind::Z => 6,
        }
    }

    /// Color associated with this kind in the catalog.
    pub const fn color(self) -> PieceColor {
        match self {
            PieceKind::I => PieceColor::Cyan,
            PieceKind::O => PieceColor::Yellow,
            PieceKind::T => PieceColor::Purple,
            PieceKind::L => PieceColor::Orange,
            PieceKind::J => PieceColor::Blue,
            PieceKind::S => PieceColor::Green,
            PieceKind::Z => PieceColor::Red,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::S => "s",
            PieceKind::Z => "z",
        }
    }
}

/// Colors of the piece catalog.
///
/// This is a closed set: a board cell can only ever hold one of these, so no
/// color outside the catalog can appear on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceColor {
    Cyan,
    Yellow,
    Purple,
    Orange,
    Blue,
    Green,
    Red,
}

impl PieceColor {
    /// CSS-style hex string, e.g. `"#00f0f0"`.
    pub fn hex(&self) -> &'static str {
        match self {
            PieceColor::Cyan => "#00f0f0",
            PieceColor::Yellow => "#f0f000",
            PieceColor::Purple => "#a000f0",
            PieceColor::Orange => "#f0a000",
            PieceColor::Blue => "#0000f0",
            PieceColor::Green => "#00f000",
            PieceColor::Red => "#f00000",
        }
    }

    /// Red, green and blue components.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            PieceColor::Cyan => (0x00, 0xf0, 0xf0),
            PieceColor::Yellow => (0xf0, 0xf0, 0x00),
            PieceColor::Purple => (0xa0, 0x00, 0xf0),
            PieceColor::Orange => (0xf0, 0xa0, 0x00),
            PieceColor::Blue => (0x00, 0x00, 0xf0),
            PieceColor::Green => (0x00, 0xf0, 0x00),
            PieceColor::Red => (0xf0, 0x00, 0x00),
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceColor)`: Cell filled by a locked piece of that color
pub type Cell = Option<PieceColor>;

/// Discrete commands accepted by the game session.
///
/// Each maps 1:1 from a physical key in the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameCommand {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down (+1 point per row)
    SoftDrop,
    /// Rotate piece 90° clockwise, without wall kicks
    Rotate,
    /// Drop piece to its resting row and lock it (+2 points per row)
    HardDrop,
    /// Start a fresh game after game over
    Restart,
}

impl GameCommand {
    /// Parse command from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_blockfall_types::GameCommand;
    ///
    /// assert_eq!(GameCommand::from_str("moveLeft"), Some(GameCommand::MoveLeft));
    /// assert_eq!(GameCommand::from_str("rotate"), Some(GameCommand::Rotate));
    /// assert_eq!(GameCommand::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameCommand::MoveLeft),
            "moveright" => Some(GameCommand::MoveRight),
            "softdrop" => Some(GameCommand::SoftDrop),
            "rotate" => Some(GameCommand::Rotate),
            "harddrop" => Some(GameCommand::HardDrop),
            "restart" => Some(GameCommand::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameCommand::MoveLeft => "moveLeft",
            GameCommand::MoveRight => "moveRight",
            GameCommand::SoftDrop => "softDrop",
            GameCommand::Rotate => "rotate",
            GameCommand::HardDrop => "hardDrop",
            GameCommand::Restart => "restart",
        }
    }
}

/// Lifecycle phase of a game session.
///
/// `Locking` is transient: it is entered and left within a single step, and
/// is the only phase in which a piece may be written into the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    NoPiece,
    Falling,
    Locking,
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::NoPiece => "no_piece",
            Phase::Falling => "falling",
            Phase::Locking => "locking",
            Phase::GameOver => "game_over",
        }
    }
}

/// Cosmetic event for the renderer, in board cell coordinates.
///
/// Emitted per cell on line clear and on hard-drop landing; consumed once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticleBurst {
    pub x: i32,
    pub y: i32,
    pub color: PieceColor,
    pub count: u8,
}
