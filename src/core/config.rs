//! Game configuration.
//!
//! A session is configured once at construction: board size, opponent
//! difficulty, and an optional RNG seed for reproducible games. Malformed
//! construction input is the only fatal error in the crate; everything
//! else is reported through boolean legality queries.

use serde::{Deserialize, Serialize};

/// Minimum supported board size.
pub const MIN_BOARD_SIZE: usize = 6;

/// Opponent difficulty selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiLevel {
    /// Uniformly random legal play.
    Random,
    /// Complete-or-block three-in-a-row, falling back to random play.
    Heuristic,
}

impl AiLevel {
    /// Map a numeric difficulty selector: 0 is random, anything else is
    /// the heuristic.
    #[must_use]
    pub fn from_level(level: u8) -> Self {
        if level == 0 {
            AiLevel::Random
        } else {
            AiLevel::Heuristic
        }
    }
}

/// Error raised for malformed construction input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Board size is odd or below the minimum.
    InvalidBoardSize(usize),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidBoardSize(size) => write!(
                f,
                "board size must be an even integer >= {MIN_BOARD_SIZE}, got {size}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Session configuration: board size, AI difficulty, optional seed.
///
/// ## Example
///
/// ```
/// use oxono_core::core::{AiLevel, GameConfig};
///
/// let config = GameConfig::new(6, AiLevel::Random).unwrap().with_seed(42);
/// assert_eq!(config.board_size, 6);
///
/// assert!(GameConfig::new(7, AiLevel::Random).is_err());
/// assert!(GameConfig::new(4, AiLevel::Random).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the square board. Even, at least 6.
    pub board_size: usize,
    /// Opponent difficulty.
    pub ai_level: AiLevel,
    /// RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Create a configuration, rejecting invalid board sizes.
    pub fn new(board_size: usize, ai_level: AiLevel) -> Result<Self, ConfigError> {
        if board_size < MIN_BOARD_SIZE || board_size % 2 != 0 {
            return Err(ConfigError::InvalidBoardSize(board_size));
        }
        Ok(Self {
            board_size,
            ai_level,
            seed: None,
        })
    }

    /// Fix the RNG seed for a reproducible session.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
