//! Loop configuration from the environment.

use std::str::FromStr;

use tui_blockfall_core::rng::UniformSource;
use tui_blockfall_core::{BoardConfig, ConfigError};

use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Session settings for one run of the game loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopConfig {
    pub width: usize,
    pub height: usize,
    /// Piece source seed; random when `None`.
    pub seed: Option<u64>,
    /// JSON-lines event log; disabled when `None`.
    pub log_path: Option<String>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            seed: None,
            log_path: None,
        }
    }
}

impl LoopConfig {
    /// Create from environment variables
    ///
    /// - `BLOCKFALL_WIDTH`, `BLOCKFALL_HEIGHT`: board size
    /// - `BLOCKFALL_SEED`: piece source seed
    /// - `BLOCKFALL_LOG_PATH`: event log file
    ///
    /// Unset variables take the defaults. A value that does not parse is an
    /// error; size validation happens in [`LoopConfig::board_config`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`LoopConfig::from_env`] with a custom variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let width = parse_var(&lookup, "BLOCKFALL_WIDTH")?.unwrap_or(defaults.width);
        let height = parse_var(&lookup, "BLOCKFALL_HEIGHT")?.unwrap_or(defaults.height);
        let seed = parse_var(&lookup, "BLOCKFALL_SEED")?;

        let log_path = lookup("BLOCKFALL_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Ok(Self {
            width,
            height,
            seed,
            log_path,
        })
    }

    /// Validated board dimensions.
    pub fn board_config(&self) -> Result<BoardConfig, ConfigError> {
        BoardConfig::new(self.width, self.height)
    }

    /// Seeded source when a seed is configured, OS-seeded otherwise.
    pub fn piece_source(&self) -> UniformSource {
        match self.seed {
            Some(seed) => UniformSource::seeded(seed),
            None => UniformSource::from_os(),
        }
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    match raw.trim().parse() {
        Ok(value) => Ok(Some(value)),
        Err(_) => Err(ConfigError::Invalid { var, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_empty_environment_gives_defaults() {
        let config = LoopConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, LoopConfig::default());
        assert_eq!(config.board_config(), Ok(BoardConfig::default()));
    }

    #[test]
    fn test_reads_every_variable() {
        let config = LoopConfig::from_lookup(lookup_from(&[
            ("BLOCKFALL_WIDTH", "12"),
            ("BLOCKFALL_HEIGHT", " 24 "),
            ("BLOCKFALL_SEED", "777"),
            ("BLOCKFALL_LOG_PATH", "/tmp/blockfall.jsonl"),
        ]))
        .unwrap();

        assert_eq!(config.width, 12);
        assert_eq!(config.height, 24);
        assert_eq!(config.seed, Some(777));
        assert_eq!(config.log_path.as_deref(), Some("/tmp/blockfall.jsonl"));
    }

    #[test]
    fn test_blank_log_path_disables_logging() {
        let config =
            LoopConfig::from_lookup(lookup_from(&[("BLOCKFALL_LOG_PATH", "  ")])).unwrap();
        assert_eq!(config.log_path, None);
    }

    #[test]
    fn test_unparseable_numbers_are_rejected() {
        assert_eq!(
            LoopConfig::from_lookup(lookup_from(&[("BLOCKFALL_WIDTH", "-5")])),
            Err(ConfigError::Invalid {
                var: "BLOCKFALL_WIDTH",
                value: "-5".to_string()
            })
        );
        assert_eq!(
            LoopConfig::from_lookup(lookup_from(&[("BLOCKFALL_HEIGHT", "tall")])),
            Err(ConfigError::Invalid {
                var: "BLOCKFALL_HEIGHT",
                value: "tall".to_string()
            })
        );
        assert_eq!(
            LoopConfig::from_lookup(lookup_from(&[
                ("BLOCKFALL_WIDTH", "12"),
                ("BLOCKFALL_SEED", "abc"),
            ])),
            Err(ConfigError::Invalid {
                var: "BLOCKFALL_SEED",
                value: "abc".to_string()
            })
        );
    }

    #[test]
    fn test_invalid_size_is_reported_by_board_config() {
        let config = LoopConfig {
            width: 2,
            ..LoopConfig::default()
        };
        assert_eq!(
            config.board_config(),
            Err(ConfigError::TooNarrow { width: 2 })
        );
    }
}
