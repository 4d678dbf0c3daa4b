//! Heuristic opponent: complete or block three-in-a-row.
//!
//! Scans the board for runs of exactly three consecutive same-color or
//! same-shape tokens, then tries to park a totem next to a boundary cell
//! of such a run and place the winning token there. Falls back to random
//! play when no such opportunity exists.

use tracing::debug;

use super::{OpponentPolicy, RandomPolicy};
use crate::board::{Board, Pos};
use crate::core::{GameRng, Shape, Token};
use crate::game::Game;

/// Block-or-win policy with a random fallback.
#[derive(Clone, Debug)]
pub struct HeuristicPolicy {
    fallback: RandomPolicy,
}

impl HeuristicPolicy {
    /// Create a policy with its own RNG (used by the fallback).
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self {
            fallback: RandomPolicy::new(rng),
        }
    }

    /// The shape the player is forced to use, when exactly one shape is
    /// still supplied. `None` leaves the choice open (circle tried first).
    fn forced_totem(game: &Game) -> Option<Shape> {
        let can_cross = game.current_player_token_count(Shape::Cross) > 0;
        let can_circle = game.current_player_token_count(Shape::Circle) > 0;

        match (can_cross, can_circle) {
            (true, false) => Some(Shape::Cross),
            (false, true) => Some(Shape::Circle),
            _ => None,
        }
    }

    /// Try every (boundary cell, adjacent totem destination, totem)
    /// combination; accept the first whose move is legal and whose trial
    /// placement wins the alignment scan.
    fn try_strategic_move(game: &mut Game, targets: &[Pos], forced: Option<Shape>) -> bool {
        for &place_pos in targets {
            for move_pos in game.get_free_adjacent_cells(place_pos) {
                let shapes: &[Shape] = match forced {
                    Some(ref shape) => std::slice::from_ref(shape),
                    None => &[Shape::Circle, Shape::Cross],
                };
                for &shape in shapes {
                    if Self::attempt(game, move_pos, place_pos, shape) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Execute the move and placement when the combination is usable:
    /// the shape must still be supplied, the totem move legal, and the
    /// trial placement winning.
    fn attempt(game: &mut Game, move_pos: Pos, place_pos: Pos, shape: Shape) -> bool {
        if game.has_token_shape(shape)
            && game.is_move_totem_possible(move_pos, shape)
            && game.placement_wins(place_pos, shape)
        {
            debug!(totem = %shape, to = %move_pos, place = %place_pos, "strategic move");
            game.move_totem(move_pos, shape);
            game.place_token(place_pos, shape);
            return true;
        }
        false
    }
}

impl OpponentPolicy for HeuristicPolicy {
    fn play(&mut self, game: &mut Game) {
        let forced = Self::forced_totem(game);
        let targets = alignment_targets(game.board());

        if !targets.is_empty() && Self::try_strategic_move(game, &targets, forced) {
            return;
        }

        debug!("no strategic opportunity, falling back to random play");
        self.fallback.play(game);
    }
}

/// Collect the empty boundary cells of every run of exactly three
/// consecutive same-color or same-shape tokens, row by row and column by
/// column. Duplicates are possible and harmless.
fn alignment_targets(board: &Board) -> Vec<Pos> {
    let size = board.size() as i32;
    let mut targets = Vec::new();

    for x in 0..size {
        let column: Vec<Pos> = (0..size).map(|y| Pos::new(x, y)).collect();
        line_targets(board, &column, Pos::new(0, 1), true, &mut targets);
        line_targets(board, &column, Pos::new(0, 1), false, &mut targets);
    }
    for y in 0..size {
        let row: Vec<Pos> = (0..size).map(|x| Pos::new(x, y)).collect();
        line_targets(board, &row, Pos::new(1, 0), true, &mut targets);
        line_targets(board, &row, Pos::new(1, 0), false, &mut targets);
    }

    targets
}

/// Scan one line for the first run of three by the given property and
/// push its in-bounds empty boundary cells.
fn line_targets(board: &Board, cells: &[Pos], step: Pos, by_color: bool, out: &mut Vec<Pos>) {
    let mut count = 0u32;
    let mut reference: Option<Token> = None;
    let mut start: Option<Pos> = None;

    for &pos in cells {
        let token = match board.piece_at(pos).and_then(|p| p.as_token()) {
            Some(token) => token,
            None => {
                count = 0;
                reference = None;
                start = None;
                continue;
            }
        };

        let matches = reference.map_or(false, |r| {
            if by_color {
                r.color == token.color
            } else {
                r.shape == token.shape
            }
        });

        if !matches {
            count = 1;
            reference = Some(token);
            start = Some(pos);
        } else {
            count += 1;
            if count == 3 {
                if let Some(start) = start {
                    let before = Pos::new(start.x - step.x, start.y - step.y);
                    let after = Pos::new(pos.x + step.x, pos.y + step.y);
                    if board.is_cell_empty(before) {
                        out.push(before);
                    }
                    if board.is_cell_empty(after) {
                        out.push(after);
                    }
                }
                break;
            }
        }
    }
}
