//! Reversible command history.
//!
//! Every state mutation that must survive undo/redo is recorded as a
//! `Command`: a tagged record carrying the data needed to invert itself
//! exactly, captured at construction rather than recomputed later. The
//! `History` keeps the two LIFO stacks; the `Game` owns applying and
//! inverting the records against its board and players.

use serde::{Deserialize, Serialize};

use crate::board::Pos;
use crate::core::{Shape, Token};

/// A reversible mutation record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// A totem relocation. `prev_last_moved` restores the
    /// most-recently-moved marker on undo.
    MoveTotem {
        shape: Shape,
        from: Pos,
        to: Pos,
        prev_last_moved: Option<Shape>,
    },
    /// A token placement. The token identifies the owning player for the
    /// inventory refund on undo; `prev_last_placed` restores the
    /// last-placed-token coordinate.
    PlaceToken {
        pos: Pos,
        token: Token,
        prev_last_placed: Option<Pos>,
    },
}

/// Undo/redo stacks.
///
/// Recording a new command invalidates any previously undone branch by
/// clearing the redo stack.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    undo: Vec<Command>,
    redo: Vec<Command>,
}

impl History {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly executed command and drop the redo branch.
    pub fn record(&mut self, command: Command) {
        self.undo.push(command);
        self.redo.clear();
    }

    /// Pop the most recent command for undoing, if any.
    pub fn pop_undo(&mut self) -> Option<Command> {
        self.undo.pop()
    }

    /// Pop the most recently undone command for redoing, if any.
    pub fn pop_redo(&mut self) -> Option<Command> {
        self.redo.pop()
    }

    /// Push an undone command onto the redo stack.
    pub fn push_redo(&mut self, command: Command) {
        self.redo.push(command);
    }

    /// Push a redone command back onto the undo stack.
    pub fn push_undo(&mut self, command: Command) {
        self.undo.push(command);
    }

    /// Check whether an undo is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Check whether a redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Drop both stacks (fresh game).
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
