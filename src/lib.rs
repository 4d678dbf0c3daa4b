//! # oxono-core
//!
//! Rules engine for Oxono, a two-phase abstract strategy game for two
//! players. Each turn a player relocates one of the two shared totems,
//! then places a token of the totem's shape; four aligned tokens of one
//! color or one shape win.
//!
//! ## Design
//!
//! - **Engine only**: no rendering, input handling, or persistence. A
//!   presentation shell drives the engine through legality queries and
//!   command methods, and re-renders from observer notifications.
//! - **Queries before commands**: illegal moves are reported as `false`
//!   from legality predicates, never as errors; commands assume
//!   pre-validated input.
//! - **Reversible by construction**: every board mutation is a tagged
//!   command record carrying its own inverse data, kept on undo/redo
//!   stacks.
//! - **Deterministic**: a seeded session reproduces the same totem
//!   arrangement and the same computer-opponent play.
//!
//! ## Modules
//!
//! - `core`: colors, shapes, tokens, player inventories, config, RNG
//! - `board`: the grid, the totems, adjacency queries
//! - `game`: the session - rules engine, phase machine, observers
//! - `history`: reversible command records and the undo/redo stacks
//! - `ai`: pluggable opponent policies (random and block-or-win)
//!
//! ## Example
//!
//! ```
//! use oxono_core::{AiLevel, Game, GameConfig, GamePhase, Pos, Shape};
//!
//! let config = GameConfig::new(6, AiLevel::Random).unwrap().with_seed(42);
//! let mut game = Game::new(config);
//!
//! let totem = game.totem_pos(Shape::Cross);
//! let target = Pos::new(totem.x, totem.y - 1);
//! assert!(game.is_move_totem_possible(target, Shape::Cross));
//!
//! game.move_totem(target, Shape::Cross);
//! assert_eq!(game.phase(), GamePhase::Insert);
//! ```

pub mod ai;
pub mod board;
pub mod core;
pub mod game;
pub mod history;

// Re-export commonly used types
pub use crate::ai::{policy_for_level, HeuristicPolicy, OpponentPolicy, RandomPolicy};
pub use crate::board::{Board, Pos};
pub use crate::core::{
    AiLevel, Color, ConfigError, GameConfig, GameRng, Piece, Player, Shape, Token,
};
pub use crate::game::{Game, GamePhase, ObserverId};
pub use crate::history::{Command, History};
