//! Rule configuration loaded from TOML.
//!
//! Only the draw thresholds are configurable; piece movement is fixed.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Half-moves between two moves of the same side that repeat the same
/// (from, to) pair: the side moves, the opponent replies, the side moves
/// back, the opponent replies, and the side plays the pair again.
pub const REPETITION_STRIDE: usize = 4;

/// Errors that can occur when loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Draw thresholds used by the game status evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Half-moves without a capture or pawn move after which the game is
    /// drawn.
    pub halfmove_limit: u32,
    /// How many times the same move must recur for a repetition draw.
    pub repetition_count: usize,
    /// Number of most recent half-moves searched for the repetition.
    pub repetition_window: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            halfmove_limit: 50,
            repetition_count: 3,
            repetition_window: 9,
        }
    }
}

impl RulesConfig {
    /// Parses and validates a TOML document. Missing keys keep their
    /// defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: RulesConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Checks that the window can hold `repetition_count` repeated moves.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.repetition_count < 2 {
            return Err(ConfigError::Invalid(format!(
                "repetition_count must be at least 2, got {}",
                self.repetition_count
            )));
        }
        let needed = self.repetition_span();
        if self.repetition_window < needed {
            return Err(ConfigError::Invalid(format!(
                "repetition_window {} cannot hold {} repeated moves (needs {})",
                self.repetition_window, self.repetition_count, needed
            )));
        }
        Ok(())
    }

    /// Half-moves from the first to the last of the repeated moves,
    /// inclusive.
    pub(crate) fn repetition_span(&self) -> usize {
        self.repetition_count.saturating_sub(1) * REPETITION_STRIDE + 1
    }
}
