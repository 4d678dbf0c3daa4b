//! Board storage: the square grid and the two totems.
//!
//! The board is pure storage plus grid mechanics - bounds checks, occupancy
//! queries, and raw placement/removal. No game rule lives here; legality is
//! the rules engine's job. Placement and totem movement are guarded no-ops
//! when the target cell is occupied, as a safety net under pre-validated
//! commands.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{GameRng, Piece, Shape, Token};

/// A cell coordinate.
///
/// Signed so that neighbor arithmetic at the border stays representable;
/// `Board::is_valid_position` is the bounds check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another position.
    #[must_use]
    pub const fn manhattan(self, other: Pos) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// The four orthogonal neighbors, in the fixed probe order
    /// down, right, up, left.
    #[must_use]
    pub const fn neighbors(self) -> [Pos; 4] {
        [
            Pos::new(self.x, self.y + 1),
            Pos::new(self.x + 1, self.y),
            Pos::new(self.x, self.y - 1),
            Pos::new(self.x - 1, self.y),
        ]
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The game board: a size x size grid of optional occupants plus the two
/// totem positions and the most-recently-moved totem marker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    /// Row-major cells, indexed `x * size + y`.
    cells: Vec<Option<Piece>>,
    /// Totem positions, indexed by `Shape::index()`.
    totems: [Pos; 2],
    last_moved_totem: Option<Shape>,
}

impl Board {
    /// Create an empty board with the totems at the two central cells.
    ///
    /// Which shape takes which of `(half-1, half-1)` and `(half, half)` is
    /// decided by a coin flip.
    #[must_use]
    pub fn new(size: usize, rng: &mut GameRng) -> Self {
        let half = size as i32 / 2;
        let (cross_pos, circle_pos) = if rng.gen_bool(0.5) {
            (Pos::new(half - 1, half - 1), Pos::new(half, half))
        } else {
            (Pos::new(half, half), Pos::new(half - 1, half - 1))
        };
        Self::with_totems(size, cross_pos, circle_pos)
    }

    /// Create an empty board with explicit totem positions.
    ///
    /// The positions must be distinct and in bounds.
    #[must_use]
    pub fn with_totems(size: usize, cross_pos: Pos, circle_pos: Pos) -> Self {
        assert_ne!(cross_pos, circle_pos, "totems cannot overlap");
        let mut board = Self {
            size,
            cells: vec![None; size * size],
            totems: [cross_pos, circle_pos],
            last_moved_totem: None,
        };
        assert!(board.is_valid_position(cross_pos) && board.is_valid_position(circle_pos));
        let cross_idx = board.index(cross_pos);
        board.cells[cross_idx] = Some(Piece::Totem(Shape::Cross));
        let circle_idx = board.index(circle_pos);
        board.cells[circle_idx] = Some(Piece::Totem(Shape::Circle));
        board
    }

    fn index(&self, pos: Pos) -> usize {
        pos.x as usize * self.size + pos.y as usize
    }

    /// Side length of the board.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Check whether the coordinates are within the board.
    #[must_use]
    pub fn is_valid_position(&self, pos: Pos) -> bool {
        let size = self.size as i32;
        pos.x >= 0 && pos.x < size && pos.y >= 0 && pos.y < size
    }

    /// Check whether a cell is empty. Out-of-bounds cells are not empty.
    #[must_use]
    pub fn is_cell_empty(&self, pos: Pos) -> bool {
        self.is_valid_position(pos) && self.cells[self.index(pos)].is_none()
    }

    /// The occupant at the given position, if any.
    #[must_use]
    pub fn piece_at(&self, pos: Pos) -> Option<Piece> {
        if !self.is_valid_position(pos) {
            return None;
        }
        self.cells[self.index(pos)]
    }

    /// Place a token on an empty cell. No-op if the cell is occupied.
    pub fn place_token(&mut self, pos: Pos, token: Token) {
        if self.is_cell_empty(pos) {
            let idx = self.index(pos);
            self.cells[idx] = Some(Piece::Token(token));
        }
    }

    /// Remove whatever occupies a cell. No-op out of bounds.
    pub fn remove_token(&mut self, pos: Pos) {
        if self.is_valid_position(pos) {
            let idx = self.index(pos);
            self.cells[idx] = None;
        }
    }

    /// Move a totem to a new cell. No-op if the target is occupied.
    pub fn move_totem(&mut self, shape: Shape, to: Pos) {
        if !self.is_cell_empty(to) {
            return;
        }
        let from = self.totems[shape.index()];
        let from_idx = self.index(from);
        self.cells[from_idx] = None;
        self.totems[shape.index()] = to;
        let to_idx = self.index(to);
        self.cells[to_idx] = Some(Piece::Totem(shape));
    }

    /// Current position of the totem with the given shape.
    #[must_use]
    pub fn totem_pos(&self, shape: Shape) -> Pos {
        self.totems[shape.index()]
    }

    /// The totem that moved most recently, if any.
    #[must_use]
    pub fn last_moved_totem(&self) -> Option<Shape> {
        self.last_moved_totem
    }

    /// Record (or clear) the most-recently-moved totem marker.
    pub fn set_last_moved_totem(&mut self, shape: Option<Shape>) {
        self.last_moved_totem = shape;
    }

    /// All empty cells, in row-major scan order.
    ///
    /// The AI policies enumerate move candidates from this list.
    #[must_use]
    pub fn empty_cells(&self) -> Vec<Pos> {
        let mut cells = Vec::new();
        for x in 0..self.size as i32 {
            for y in 0..self.size as i32 {
                let pos = Pos::new(x, y);
                if self.is_cell_empty(pos) {
                    cells.push(pos);
                }
            }
        }
        cells
    }

    /// Number of currently empty cells.
    #[must_use]
    pub fn empty_cell_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Number of occupied cells (placed tokens plus the two totems).
    #[must_use]
    pub fn occupied_cell_count(&self) -> usize {
        self.size * self.size - self.empty_cell_count()
    }

    /// In-bounds empty orthogonal neighbors of a position, in the fixed
    /// probe order down, right, up, left.
    #[must_use]
    pub fn free_adjacent_cells(&self, pos: Pos) -> SmallVec<[Pos; 4]> {
        pos.neighbors()
            .into_iter()
            .filter(|&n| self.is_cell_empty(n))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Color;

    fn board6() -> Board {
        Board::with_totems(6, Pos::new(2, 2), Pos::new(3, 3))
    }

    #[test]
    fn test_new_places_totems_in_center() {
        let mut rng = GameRng::new(42);
        let board = Board::new(6, &mut rng);

        let cross = board.totem_pos(Shape::Cross);
        let circle = board.totem_pos(Shape::Circle);
        let centers = [Pos::new(2, 2), Pos::new(3, 3)];

        assert!(centers.contains(&cross));
        assert!(centers.contains(&circle));
        assert_ne!(cross, circle);
        assert_eq!(board.piece_at(cross), Some(Piece::Totem(Shape::Cross)));
        assert_eq!(board.piece_at(circle), Some(Piece::Totem(Shape::Circle)));
        assert_eq!(board.occupied_cell_count(), 2);
    }

    #[test]
    fn test_bounds() {
        let board = board6();
        assert!(board.is_valid_position(Pos::new(0, 0)));
        assert!(board.is_valid_position(Pos::new(5, 5)));
        assert!(!board.is_valid_position(Pos::new(-1, 0)));
        assert!(!board.is_valid_position(Pos::new(0, 6)));
        assert!(!board.is_cell_empty(Pos::new(-1, 0)));
    }

    #[test]
    fn test_place_token_on_occupied_cell_is_noop() {
        let mut board = board6();
        let pink = Token::new(Color::Pink, Shape::Cross);
        let black = Token::new(Color::Black, Shape::Circle);

        board.place_token(Pos::new(0, 0), pink);
        board.place_token(Pos::new(0, 0), black);

        assert_eq!(board.piece_at(Pos::new(0, 0)), Some(Piece::Token(pink)));
    }

    #[test]
    fn test_remove_token() {
        let mut board = board6();
        let token = Token::new(Color::Pink, Shape::Circle);

        board.place_token(Pos::new(1, 1), token);
        board.remove_token(Pos::new(1, 1));

        assert!(board.is_cell_empty(Pos::new(1, 1)));
        // out of bounds is a no-op
        board.remove_token(Pos::new(-1, -1));
    }

    #[test]
    fn test_move_totem() {
        let mut board = board6();
        board.move_totem(Shape::Cross, Pos::new(2, 0));

        assert_eq!(board.totem_pos(Shape::Cross), Pos::new(2, 0));
        assert!(board.is_cell_empty(Pos::new(2, 2)));
        assert_eq!(board.piece_at(Pos::new(2, 0)), Some(Piece::Totem(Shape::Cross)));
        assert_eq!(board.occupied_cell_count(), 2);
    }

    #[test]
    fn test_move_totem_to_occupied_cell_is_noop() {
        let mut board = board6();
        board.move_totem(Shape::Cross, Pos::new(3, 3));

        assert_eq!(board.totem_pos(Shape::Cross), Pos::new(2, 2));
        assert_eq!(board.piece_at(Pos::new(3, 3)), Some(Piece::Totem(Shape::Circle)));
    }

    #[test]
    fn test_empty_cells_row_major_order() {
        let board = board6();
        let cells = board.empty_cells();

        assert_eq!(cells.len(), 34);
        assert_eq!(cells[0], Pos::new(0, 0));
        assert_eq!(cells[1], Pos::new(0, 1));
        assert!(!cells.contains(&Pos::new(2, 2)));
        assert!(!cells.contains(&Pos::new(3, 3)));
    }

    #[test]
    fn test_free_adjacent_cells_probe_order() {
        let board = board6();
        let free = board.free_adjacent_cells(Pos::new(2, 2));

        // down, right, up, left
        assert_eq!(
            free.as_slice(),
            &[Pos::new(2, 3), Pos::new(3, 2), Pos::new(2, 1), Pos::new(1, 2)]
        );
    }

    #[test]
    fn test_free_adjacent_cells_at_corner() {
        let board = board6();
        let free = board.free_adjacent_cells(Pos::new(0, 0));

        assert_eq!(free.as_slice(), &[Pos::new(0, 1), Pos::new(1, 0)]);
    }

    #[test]
    fn test_last_moved_totem_marker() {
        let mut board = board6();
        assert_eq!(board.last_moved_totem(), None);

        board.set_last_moved_totem(Some(Shape::Circle));
        assert_eq!(board.last_moved_totem(), Some(Shape::Circle));

        board.set_last_moved_totem(None);
        assert_eq!(board.last_moved_totem(), None);
    }

    #[test]
    fn test_serialization_round_trip() {
        let mut board = board6();
        board.place_token(Pos::new(0, 5), Token::new(Color::Black, Shape::Cross));

        let json = serde_json::to_string(&board).unwrap();
        let deserialized: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(board, deserialized);
    }
}
