//! Baseline opponent: uniformly random legal play.

use tracing::debug;

use super::OpponentPolicy;
use crate::board::Pos;
use crate::core::{GameRng, Shape};
use crate::game::Game;

/// Random baseline policy.
///
/// Chooses a movable totem uniformly among the shapes the player can
/// still supply, draws empty-cell candidates in random order without
/// replacement until a legal move is found, then places the token on a
/// free adjacent cell - or on a uniformly random empty cell when the
/// totem ended up enclaved.
#[derive(Clone, Debug)]
pub struct RandomPolicy {
    rng: GameRng,
}

impl RandomPolicy {
    /// Create a policy with its own RNG.
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }

    /// Pick a totem the player can still supply a token for.
    fn choose_totem(&mut self, game: &Game) -> Option<Shape> {
        let can_cross = game.current_player_token_count(Shape::Cross) > 0;
        let can_circle = game.current_player_token_count(Shape::Circle) > 0;

        match (can_cross, can_circle) {
            (true, true) => Some(if self.rng.gen_bool(0.5) {
                Shape::Cross
            } else {
                Shape::Circle
            }),
            (true, false) => Some(Shape::Cross),
            (false, true) => Some(Shape::Circle),
            (false, false) => None,
        }
    }

    /// Move the totem to a random legal cell. Returns the destination, or
    /// `None` when no empty cell admits a legal move.
    fn move_totem(&mut self, game: &mut Game, shape: Shape) -> Option<Pos> {
        let mut candidates = game.board().empty_cells();
        while !candidates.is_empty() {
            let i = self.rng.gen_range_usize(0..candidates.len());
            let candidate = candidates.swap_remove(i);
            if game.is_move_totem_possible(candidate, shape) {
                game.move_totem(candidate, shape);
                return Some(candidate);
            }
        }
        None
    }

    /// Place the token: enclaved totems place anywhere, otherwise on the
    /// first accepting adjacent cell.
    fn place_token(&mut self, game: &mut Game, shape: Shape, moved_to: Pos) {
        if game.is_totem_enclaved(shape) {
            let empty = game.board().empty_cells();
            if let Some(&cell) = self.rng.choose(&empty) {
                game.place_token(cell, shape);
            }
            return;
        }

        for pos in game.get_free_adjacent_cells(moved_to) {
            if game.can_place_token(pos, shape) {
                game.place_token(pos, shape);
                break;
            }
        }
    }
}

impl OpponentPolicy for RandomPolicy {
    fn play(&mut self, game: &mut Game) {
        let Some(shape) = self.choose_totem(game) else {
            debug!("no totem can be supplied, skipping turn");
            return;
        };
        let Some(moved_to) = self.move_totem(game, shape) else {
            debug!(totem = %shape, "no legal totem move, skipping turn");
            return;
        };
        self.place_token(game, shape, moved_to);
    }
}
