//! Computer-opponent policies.
//!
//! A policy drives one full computer turn through the same command API a
//! human shell uses: exactly one legal totem move followed by exactly one
//! legal token placement. When no totem can legally move, the policy
//! leaves the game untouched; callers must tolerate that edge case.

mod heuristic;
mod random;

use crate::core::{AiLevel, GameRng};
use crate::game::Game;

pub use heuristic::HeuristicPolicy;
pub use random::RandomPolicy;

/// A pluggable opponent strategy.
pub trait OpponentPolicy {
    /// Play one full turn for the player to act.
    fn play(&mut self, game: &mut Game);
}

/// Build the policy for a difficulty level.
#[must_use]
pub fn policy_for_level(level: AiLevel, rng: GameRng) -> Box<dyn OpponentPolicy> {
    match level {
        AiLevel::Random => Box::new(RandomPolicy::new(rng)),
        AiLevel::Heuristic => Box::new(HeuristicPolicy::new(rng)),
    }
}
