//! Turn/phase state machine.

use serde::{Deserialize, Serialize};

/// The phase governing which operation is currently legal.
///
/// The machine starts in `Move`. A totem relocation advances to `Insert`,
/// a token placement back to `Move`, unless victory or token exhaustion
/// ends the game in the terminal `Choice` phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// A totem must be relocated.
    Move,
    /// A token must be placed.
    Insert,
    /// Terminal: game over or awaiting restart.
    Choice,
}

impl GamePhase {
    /// Check whether this phase is terminal.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Choice)
    }
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GamePhase::Move => write!(f, "move"),
            GamePhase::Insert => write!(f, "insert"),
            GamePhase::Choice => write!(f, "choice"),
        }
    }
}
