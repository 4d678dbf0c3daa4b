//! Core value types: pieces, players, configuration, and RNG.

pub mod config;
pub mod piece;
pub mod player;
pub mod rng;

pub use config::{AiLevel, ConfigError, GameConfig, MIN_BOARD_SIZE};
pub use piece::{Color, Piece, Shape, Token};
pub use player::{Player, TOKENS_PER_SHAPE};
pub use rng::GameRng;
