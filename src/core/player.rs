//! Player inventories.
//!
//! Each player starts with 4 tokens of each shape in their color. Placing
//! a token consumes one from the inventory; undoing a placement returns it.

use serde::{Deserialize, Serialize};

use super::piece::{Color, Shape, Token};

/// Tokens of each shape a player starts with.
pub const TOKENS_PER_SHAPE: u8 = 4;

/// A player: a color plus a per-shape count of remaining tokens.
///
/// Counts never go below zero; `take_token` refuses when the shape is
/// exhausted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    color: Color,
    /// Remaining tokens, indexed by `Shape::index()`.
    remaining: [u8; 2],
}

impl Player {
    /// Create a player with a full inventory.
    #[must_use]
    pub fn new(color: Color) -> Self {
        Self {
            color,
            remaining: [TOKENS_PER_SHAPE; 2],
        }
    }

    /// The player's color.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Number of remaining tokens of the given shape.
    #[must_use]
    pub fn token_count(&self, shape: Shape) -> u8 {
        self.remaining[shape.index()]
    }

    /// Check whether the player still holds a token of the given shape.
    #[must_use]
    pub fn has_shape(&self, shape: Shape) -> bool {
        self.token_count(shape) > 0
    }

    /// Check whether the player holds no tokens of either shape.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        Shape::ALL.iter().all(|&shape| !self.has_shape(shape))
    }

    /// Take a token of the given shape out of the inventory.
    ///
    /// Returns `None` when no token of that shape remains.
    pub fn take_token(&mut self, shape: Shape) -> Option<Token> {
        if !self.has_shape(shape) {
            return None;
        }
        self.remaining[shape.index()] -= 1;
        Some(Token::new(self.color, shape))
    }

    /// Return a token to the inventory (placement undo).
    pub fn return_token(&mut self, token: Token) {
        debug_assert_eq!(token.color, self.color);
        self.remaining[token.shape.index()] += 1;
    }

    /// Refill the inventory for a fresh game.
    pub fn reset(&mut self) {
        self.remaining = [TOKENS_PER_SHAPE; 2];
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_inventory() {
        let player = Player::new(Color::Pink);
        assert_eq!(player.token_count(Shape::Cross), 4);
        assert_eq!(player.token_count(Shape::Circle), 4);
        assert!(player.has_shape(Shape::Cross));
        assert!(!player.is_exhausted());
    }

    #[test]
    fn test_take_token_decrements() {
        let mut player = Player::new(Color::Black);
        let token = player.take_token(Shape::Circle).unwrap();

        assert_eq!(token.color, Color::Black);
        assert_eq!(token.shape, Shape::Circle);
        assert_eq!(player.token_count(Shape::Circle), 3);
        assert_eq!(player.token_count(Shape::Cross), 4);
    }

    #[test]
    fn test_take_token_refuses_when_exhausted() {
        let mut player = Player::new(Color::Pink);
        for _ in 0..4 {
            assert!(player.take_token(Shape::Cross).is_some());
        }
        assert!(player.take_token(Shape::Cross).is_none());
        assert_eq!(player.token_count(Shape::Cross), 0);
        assert!(!player.is_exhausted());
    }

    #[test]
    fn test_exhausted_both_shapes() {
        let mut player = Player::new(Color::Pink);
        for shape in Shape::ALL {
            for _ in 0..4 {
                player.take_token(shape);
            }
        }
        assert!(player.is_exhausted());
    }

    #[test]
    fn test_return_token_round_trip() {
        let mut player = Player::new(Color::Pink);
        let token = player.take_token(Shape::Cross).unwrap();
        player.return_token(token);
        assert_eq!(player.token_count(Shape::Cross), 4);
    }

    #[test]
    fn test_reset() {
        let mut player = Player::new(Color::Black);
        player.take_token(Shape::Cross);
        player.take_token(Shape::Circle);
        player.reset();
        assert_eq!(player.token_count(Shape::Cross), 4);
        assert_eq!(player.token_count(Shape::Circle), 4);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Player::new(Color::Pink)), "Player Pink");
        assert_eq!(format!("{}", Player::new(Color::Black)), "Player Black");
    }
}
