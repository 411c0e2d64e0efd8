//! Board configuration, validated once at session construction.

use std::fmt;

use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Narrowest board that still fits every catalog piece (the I piece is 4 wide).
pub const MIN_BOARD_WIDTH: usize = 4;

/// Largest accepted board dimension.
pub const MAX_BOARD_DIM: usize = 64;

/// Rejected configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    ZeroWidth,
    ZeroHeight,
    TooNarrow { width: usize },
    TooLarge { width: usize, height: usize },
    /// A setting that could not be parsed.
    Invalid { var: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroWidth => write!(f, "board width must be positive"),
            ConfigError::ZeroHeight => write!(f, "board height must be positive"),
            ConfigError::TooNarrow { width } => write!(
                f,
                "board width {} is too narrow, need at least {}",
                width, MIN_BOARD_WIDTH
            ),
            ConfigError::TooLarge { width, height } => write!(
                f,
                "board {}x{} exceeds the maximum of {}x{}",
                width, height, MAX_BOARD_DIM, MAX_BOARD_DIM
            ),
            ConfigError::Invalid { var, value } => {
                write!(f, "invalid value {:?} for {}", value, var)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Dimensions of the playfield.
///
/// Only constructible through [`BoardConfig::new`] (or `Default`), so every
/// value in circulation has already been validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    width: usize,
    height: usize,
}

impl BoardConfig {
    /// Validate and build a configuration.
    ///
    /// ```
    /// use tui_blockfall_core::config::{BoardConfig, ConfigError};
    ///
    /// assert!(BoardConfig::new(10, 20).is_ok());
    /// assert_eq!(BoardConfig::new(0, 20), Err(ConfigError::ZeroWidth));
    /// ```
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        if width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        if width < MIN_BOARD_WIDTH {
            return Err(ConfigError::TooNarrow { width });
        }
        if width > MAX_BOARD_DIM || height > MAX_BOARD_DIM {
            return Err(ConfigError::TooLarge { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
        }
    }
}
