//! The game session and its rules engine.
//!
//! `Game` owns the board, the two players, the phase machine, the command
//! history, and the opponent policy. All mutation goes through its command
//! methods; all rule legality is answered by its query methods. Queries are
//! pure; commands assume pre-validated input (an illegal command is at
//! worst a board-level no-op) and notify observers once they complete.

pub mod observer;
pub mod phase;

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::ai::{policy_for_level, OpponentPolicy};
use crate::board::{Board, Pos};
use crate::core::{Color, GameConfig, GameRng, Piece, Player, Shape, Token};
use crate::history::{Command, History};

pub use observer::{ObserverId, Observers};
pub use phase::GamePhase;

/// A single game session.
pub struct Game {
    config: GameConfig,
    board: Board,
    /// Indexed 0 = Pink, 1 = Black.
    players: [Player; 2],
    current: Color,
    phase: GamePhase,
    game_over: bool,
    winner: Option<Color>,
    last_placed_token: Option<Pos>,
    history: History,
    rng: GameRng,
    /// Taken out of the slot while it drives a turn, to allow it mutable
    /// access to the game.
    policy: Option<Box<dyn OpponentPolicy>>,
    observers: Observers,
}

impl Game {
    /// Create a session from a validated configuration.
    ///
    /// Pink opens; Black is the computer side driven by the configured
    /// policy. The totem arrangement is drawn from the config seed (or
    /// entropy when unseeded).
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        let board = Board::new(config.board_size, &mut rng);
        Self::from_parts(config, board, rng)
    }

    /// Create a session over an explicit board arrangement.
    ///
    /// Useful for tests and for presenting fixed opening positions; the
    /// board must be the configured size.
    #[must_use]
    pub fn with_board(config: GameConfig, board: Board) -> Self {
        assert_eq!(board.size(), config.board_size, "board size mismatch");
        let rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        Self::from_parts(config, board, rng)
    }

    fn from_parts(config: GameConfig, board: Board, rng: GameRng) -> Self {
        let policy_rng = GameRng::new(rng.seed().wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self {
            config,
            board,
            players: [Player::new(Color::Pink), Player::new(Color::Black)],
            current: Color::Pink,
            phase: GamePhase::Move,
            game_over: false,
            winner: None,
            last_placed_token: None,
            history: History::new(),
            rng,
            policy: Some(policy_for_level(config.ai_level, policy_rng)),
            observers: Observers::new(),
        }
    }

    fn player(&self, color: Color) -> &Player {
        match color {
            Color::Pink => &self.players[0],
            Color::Black => &self.players[1],
        }
    }

    fn player_mut(&mut self, color: Color) -> &mut Player {
        match color {
            Color::Pink => &mut self.players[0],
            Color::Black => &mut self.players[1],
        }
    }

    // === Queries ===

    /// The session configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Read access to the board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side length of the board.
    #[must_use]
    pub fn board_size(&self) -> usize {
        self.board.size()
    }

    /// Check whether the coordinates are within the board.
    #[must_use]
    pub fn is_valid_position(&self, pos: Pos) -> bool {
        self.board.is_valid_position(pos)
    }

    /// Check whether a cell is empty.
    #[must_use]
    pub fn is_cell_empty(&self, pos: Pos) -> bool {
        self.board.is_cell_empty(pos)
    }

    /// The occupant at a position, if any.
    #[must_use]
    pub fn piece_at(&self, pos: Pos) -> Option<Piece> {
        self.board.piece_at(pos)
    }

    /// Number of currently empty cells.
    #[must_use]
    pub fn empty_cell_count(&self) -> usize {
        self.board.empty_cell_count()
    }

    /// Current position of the totem with the given shape.
    #[must_use]
    pub fn totem_pos(&self, shape: Shape) -> Pos {
        self.board.totem_pos(shape)
    }

    /// The totem that moved most recently, if any.
    #[must_use]
    pub fn last_moved_totem(&self) -> Option<Shape> {
        self.board.last_moved_totem()
    }

    /// Coordinate of the most recently placed token, if any.
    #[must_use]
    pub fn last_placed_token(&self) -> Option<Pos> {
        self.last_placed_token
    }

    /// The current phase.
    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Check whether the game has ended.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// The winning color, if the game ended in a victory.
    #[must_use]
    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    /// Display name of the winner, if any.
    #[must_use]
    pub fn winner_name(&self) -> Option<String> {
        self.winner.map(|color| self.player(color).to_string())
    }

    /// Color of the player to act.
    #[must_use]
    pub fn current_player_color(&self) -> Color {
        self.current
    }

    /// Display name of the player to act.
    #[must_use]
    pub fn current_player_name(&self) -> String {
        self.player(self.current).to_string()
    }

    /// Display name of the waiting player.
    #[must_use]
    pub fn opponent_player_name(&self) -> String {
        self.player(self.current.other()).to_string()
    }

    /// Remaining tokens of a shape held by the player to act.
    #[must_use]
    pub fn current_player_token_count(&self, shape: Shape) -> u8 {
        self.player(self.current).token_count(shape)
    }

    /// Remaining tokens of a shape held by the waiting player.
    #[must_use]
    pub fn opponent_token_count(&self, shape: Shape) -> u8 {
        self.player(self.current.other()).token_count(shape)
    }

    /// Check whether the player to act still holds a token of the shape.
    #[must_use]
    pub fn has_token_shape(&self, shape: Shape) -> bool {
        self.player(self.current).has_shape(shape)
    }

    /// In-bounds empty orthogonal neighbors of a position, probed in the
    /// order down, right, up, left.
    #[must_use]
    pub fn get_free_adjacent_cells(&self, pos: Pos) -> SmallVec<[Pos; 4]> {
        self.board.free_adjacent_cells(pos)
    }

    /// Check whether a totem has no free orthogonal neighbor.
    ///
    /// Out-of-bounds neighbors do not count as free.
    #[must_use]
    pub fn is_totem_enclaved(&self, shape: Shape) -> bool {
        self.get_free_adjacent_cells(self.board.totem_pos(shape))
            .is_empty()
    }

    /// Check whether the totem's entire row AND entire column are fully
    /// occupied. When they are, the totem may relocate to any empty cell.
    #[must_use]
    pub fn are_rows_and_columns_occupied(&self, shape: Shape) -> bool {
        let pos = self.board.totem_pos(shape);
        let size = self.board.size() as i32;

        for i in 0..size {
            if self.board.is_cell_empty(Pos::new(i, pos.y)) {
                return false;
            }
        }
        for j in 0..size {
            if self.board.is_cell_empty(Pos::new(pos.x, j)) {
                return false;
            }
        }
        true
    }

    /// Totem-move legality, evaluated as an ordered rule cascade - the
    /// first satisfied rule wins:
    ///
    /// 1. out-of-bounds, occupied, or current-position targets are illegal;
    /// 2. diagonal targets are illegal unless the totem's row and column
    ///    are both fully occupied;
    /// 3. a row-and-column-enclosed totem may relocate to any empty cell;
    /// 4. with a free adjacent cell available: the adjacent cells
    ///    themselves are legal, and a straight move is legal when every
    ///    strictly intermediate cell is empty;
    /// 5. with no free adjacent cell: a straight move is legal when the
    ///    strictly intermediate cells are uniformly empty or uniformly
    ///    occupied - a mixed path is illegal.
    #[must_use]
    pub fn is_move_totem_possible(&self, to: Pos, shape: Shape) -> bool {
        let current = self.board.totem_pos(shape);

        if !self.board.is_valid_position(to) || !self.board.is_cell_empty(to) {
            return false;
        }
        if to == current {
            return false;
        }

        let enclosed = self.are_rows_and_columns_occupied(shape);
        if to.x != current.x && to.y != current.y && !enclosed {
            return false;
        }
        if enclosed {
            // Target emptiness was already established above.
            return true;
        }

        let free_adjacent = self.get_free_adjacent_cells(current);
        if !free_adjacent.is_empty() {
            if free_adjacent.contains(&to) {
                return true;
            }
            // Straight move past the adjacent cells: the path must be clear.
            return self.is_straight_path_empty(current, to);
        }

        trace!(totem = %shape, from = %current, to = %to, "no free adjacent cell, checking uniform path");
        self.is_uniform_path_move(current, to)
    }

    /// Check that every cell strictly between two aligned positions is
    /// empty.
    fn is_straight_path_empty(&self, from: Pos, to: Pos) -> bool {
        for cell in between_cells(from, to) {
            if !self.board.is_cell_empty(cell) {
                return false;
            }
        }
        true
    }

    /// Fallback when the totem has no free adjacent cell: the strictly
    /// intermediate cells must be uniformly empty or uniformly occupied.
    fn is_uniform_path_move(&self, from: Pos, to: Pos) -> bool {
        let all_empty = between_cells(from, to).all(|cell| self.board.is_cell_empty(cell));
        if all_empty {
            return true;
        }
        between_cells(from, to).all(|cell| !self.board.is_cell_empty(cell))
    }

    /// Placement legality when the totem is enclaved: any empty cell, as
    /// long as the player to act still holds a token of the totem's shape.
    #[must_use]
    pub fn can_place_token_anywhere(&self, pos: Pos, shape: Shape) -> bool {
        self.has_token_shape(shape) && self.board.is_cell_empty(pos)
    }

    /// Regular placement legality: the cell must additionally be
    /// orthogonally adjacent (Manhattan distance 1) to the totem.
    #[must_use]
    pub fn can_place_token(&self, pos: Pos, shape: Shape) -> bool {
        if pos.manhattan(self.board.totem_pos(shape)) != 1 || !self.board.is_cell_empty(pos) {
            return false;
        }
        self.can_place_token_anywhere(pos, shape)
    }

    /// Victory detection around the just-placed token.
    ///
    /// Scans the full row and the full column through `pos`. Each pass
    /// keeps two independent run counters - by color and by shape - that
    /// reset to 0 on an empty cell or a totem, reset to 1 when the
    /// property changes, and win at 4. Callers must always pass the
    /// coordinate of the most recent placement; the scan is local by
    /// design, not as an optimization.
    #[must_use]
    pub fn check_victory(&self, pos: Pos) -> bool {
        self.scan_line(pos, true) || self.scan_line(pos, false)
    }

    fn scan_line(&self, pos: Pos, horizontal: bool) -> bool {
        let mut color_count = 0u32;
        let mut shape_count = 0u32;
        let mut color_ref: Option<Color> = None;
        let mut shape_ref: Option<Shape> = None;

        for i in 0..self.board.size() as i32 {
            let cell = if horizontal {
                Pos::new(i, pos.y)
            } else {
                Pos::new(pos.x, i)
            };

            let token = match self.board.piece_at(cell).and_then(|p| p.as_token()) {
                Some(token) => token,
                None => {
                    // Empty cell or totem: both runs are broken.
                    color_count = 0;
                    shape_count = 0;
                    color_ref = None;
                    shape_ref = None;
                    continue;
                }
            };

            if color_ref != Some(token.color) {
                color_count = 1;
                color_ref = Some(token.color);
            } else {
                color_count += 1;
                if color_count == 4 {
                    return true;
                }
            }

            if shape_ref != Some(token.shape) {
                shape_count = 1;
                shape_ref = Some(token.shape);
            } else {
                shape_count += 1;
                if shape_count == 4 {
                    return true;
                }
            }
        }

        false
    }

    /// Trial placement for the heuristic policy: place a token of the
    /// player to act, scan, and remove it again. Returns whether the
    /// placement would win. No observable state change.
    #[must_use]
    pub fn placement_wins(&mut self, pos: Pos, shape: Shape) -> bool {
        if !self.board.is_cell_empty(pos) {
            return false;
        }
        self.board.place_token(pos, Token::new(self.current, shape));
        let wins = self.check_victory(pos);
        self.board.remove_token(pos);
        wins
    }

    // === Commands ===

    /// Relocate a totem. Precondition: the move was validated with
    /// `is_move_totem_possible`. Advances the phase to `Insert`.
    pub fn move_totem(&mut self, to: Pos, shape: Shape) {
        let command = Command::MoveTotem {
            shape,
            from: self.board.totem_pos(shape),
            to,
            prev_last_moved: self.board.last_moved_totem(),
        };
        self.apply(command);
        self.history.record(command);
        self.phase = GamePhase::Insert;
        self.notify();
    }

    /// Place a token of the given shape for the player to act.
    /// Precondition: validated with `can_place_token` (or the anywhere
    /// variant when the totem is enclaved). Runs victory detection at the
    /// placed coordinate; a win ends the game, otherwise the phase returns
    /// to `Move`.
    pub fn place_token(&mut self, pos: Pos, shape: Shape) {
        let command = Command::PlaceToken {
            pos,
            token: Token::new(self.current, shape),
            prev_last_placed: self.last_placed_token,
        };
        self.apply(command);
        self.history.record(command);

        if self.check_victory(pos) {
            debug!(winner = %self.current, at = %pos, "victory");
            self.winner = Some(self.current);
            self.game_over = true;
            self.phase = GamePhase::Choice;
        } else {
            self.phase = GamePhase::Move;
        }
        self.notify();
    }

    /// Hand the turn to the other player.
    pub fn switch_player(&mut self) {
        self.current = self.current.other();
        self.notify();
    }

    /// Token-exhaustion check. Returns `false` and forces a terminal,
    /// winnerless end iff both players simultaneously hold zero tokens of
    /// both shapes. A player who alone holds none is skipped by the
    /// presentation layer, not by the engine.
    pub fn still_has_tokens(&mut self) -> bool {
        let current_exhausted = self.player(self.current).is_exhausted();
        let other_exhausted = self.player(self.current.other()).is_exhausted();

        if current_exhausted && other_exhausted {
            debug!("both players out of tokens, ending game");
            self.abandon_game();
            return false;
        }
        true
    }

    /// Invoke the opponent policy when it is the computer's turn (Black).
    ///
    /// The policy performs one legal totem move and one legal placement
    /// through the same command API a human shell uses, or leaves the
    /// state untouched when no totem can move.
    pub fn play_opponent_turn(&mut self) {
        if self.current == Color::Black {
            if let Some(mut policy) = self.policy.take() {
                policy.play(self);
                self.policy = Some(policy);
            }
        }
        self.notify();
    }

    /// Undo the most recent command. No-op on an empty history. The phase
    /// is re-derived from the reverted command: undoing a totem move
    /// returns to `Move`, undoing a placement to `Insert`.
    pub fn undo(&mut self) {
        if let Some(command) = self.history.pop_undo() {
            self.invert(command);
            self.phase = match command {
                Command::MoveTotem { .. } => GamePhase::Move,
                Command::PlaceToken { .. } => GamePhase::Insert,
            };
            self.history.push_redo(command);
            self.notify();
        }
    }

    /// Redo the most recently undone command. No-op when nothing was
    /// undone.
    pub fn redo(&mut self) {
        if let Some(command) = self.history.pop_redo() {
            self.apply(command);
            self.phase = match command {
                Command::MoveTotem { .. } => GamePhase::Insert,
                Command::PlaceToken { .. } => GamePhase::Move,
            };
            self.history.push_undo(command);
            self.notify();
        }
    }

    /// Reset to the initial state: fresh board of the configured size,
    /// full inventories, empty history, Pink to move.
    pub fn start(&mut self) {
        self.board = Board::new(self.config.board_size, &mut self.rng);
        for player in &mut self.players {
            player.reset();
        }
        self.current = Color::Pink;
        self.phase = GamePhase::Move;
        self.game_over = false;
        self.winner = None;
        self.last_placed_token = None;
        self.history.clear();
        self.notify();
    }

    /// Force a terminal phase without a winner.
    pub fn abandon_game(&mut self) {
        self.game_over = true;
        self.phase = GamePhase::Choice;
        self.notify();
    }

    // === Observer registration ===

    /// Register an observer callback, invoked after every externally
    /// visible mutation. Returns a handle for `remove_observer`.
    pub fn add_observer(&mut self, callback: Box<dyn FnMut()>) -> ObserverId {
        self.observers.add(callback)
    }

    /// Unregister an observer. Unknown handles are ignored.
    pub fn remove_observer(&mut self, id: ObserverId) {
        self.observers.remove(id);
    }

    fn notify(&mut self) {
        self.observers.notify_all();
    }

    // === Command application ===

    fn apply(&mut self, command: Command) {
        match command {
            Command::MoveTotem { shape, to, .. } => {
                self.board.set_last_moved_totem(Some(shape));
                self.board.move_totem(shape, to);
            }
            Command::PlaceToken { pos, token, .. } => {
                self.player_mut(token.color).take_token(token.shape);
                self.board.place_token(pos, token);
                self.last_placed_token = Some(pos);
            }
        }
    }

    fn invert(&mut self, command: Command) {
        match command {
            Command::MoveTotem {
                shape,
                from,
                prev_last_moved,
                ..
            } => {
                self.board.set_last_moved_totem(prev_last_moved);
                self.board.move_totem(shape, from);
            }
            Command::PlaceToken {
                pos,
                token,
                prev_last_placed,
            } => {
                self.board.remove_token(pos);
                self.player_mut(token.color).return_token(token);
                self.last_placed_token = prev_last_placed;
            }
        }
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("config", &self.config)
            .field("current", &self.current)
            .field("phase", &self.phase)
            .field("game_over", &self.game_over)
            .field("winner", &self.winner)
            .field("observers", &self.observers)
            .finish_non_exhaustive()
    }
}

/// Iterate the cells strictly between two aligned positions.
///
/// `from` and `to` must share a row or a column; the endpoints themselves
/// are excluded.
fn between_cells(from: Pos, to: Pos) -> impl Iterator<Item = Pos> {
    let vertical = from.x == to.x;
    let (min, max) = if vertical {
        (from.y.min(to.y), from.y.max(to.y))
    } else {
        (from.x.min(to.x), from.x.max(to.x))
    };
    let fixed = if vertical { from.x } else { from.y };

    (min + 1..max).map(move |i| {
        if vertical {
            Pos::new(fixed, i)
        } else {
            Pos::new(i, fixed)
        }
    })
}
