//! Core piece types: colors, shapes, tokens, and board occupants.
//!
//! A cell on the board holds an `Option<Piece>`: `None` for an empty cell,
//! `Piece::Token` for a placed player token, `Piece::Totem` for one of the
//! two shared totems. Totems are identified purely by shape - they carry
//! no player color and never count toward an alignment.

use serde::{Deserialize, Serialize};

/// Player color. Pink always opens the game; Black is the computer side
/// when an opponent policy is configured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Pink,
    Black,
}

impl Color {
    /// Get the opposing color.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Color::Pink => Color::Black,
            Color::Black => Color::Pink,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Pink => write!(f, "Pink"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// Token shape. Each shape has a matching totem: a token may only be
/// placed after the totem of its shape has moved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    Cross,
    Circle,
}

impl Shape {
    /// Both shapes, in a fixed order.
    pub const ALL: [Shape; 2] = [Shape::Cross, Shape::Circle];

    /// Get the opposing shape.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Shape::Cross => Shape::Circle,
            Shape::Circle => Shape::Cross,
        }
    }

    /// Dense index for per-shape storage (0 for cross, 1 for circle).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Shape::Cross => 0,
            Shape::Circle => 1,
        }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shape::Cross => write!(f, "X"),
            Shape::Circle => write!(f, "O"),
        }
    }
}

/// An immutable player token: a color/shape pair.
///
/// Tokens are never mutated once placed - they are only added to the board
/// or removed again when a placement is undone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub color: Color,
    pub shape: Shape,
}

impl Token {
    /// Create a new token.
    #[must_use]
    pub const fn new(color: Color, shape: Shape) -> Self {
        Self { color, shape }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.color, self.shape)
    }
}

/// A board occupant: either a placed player token or a shared totem.
///
/// Victory scanning matches on the variant: `Totem` breaks a run the same
/// way an empty cell does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Piece {
    Token(Token),
    Totem(Shape),
}

impl Piece {
    /// Check whether this occupant is a totem.
    #[must_use]
    pub const fn is_totem(self) -> bool {
        matches!(self, Piece::Totem(_))
    }

    /// Get the player token, if this occupant is one.
    #[must_use]
    pub const fn as_token(self) -> Option<Token> {
        match self {
            Piece::Token(token) => Some(token),
            Piece::Totem(_) => None,
        }
    }

    /// Get the shape of the occupant (tokens and totems both have one).
    #[must_use]
    pub const fn shape(self) -> Shape {
        match self {
            Piece::Token(token) => token.shape,
            Piece::Totem(shape) => shape,
        }
    }
}
