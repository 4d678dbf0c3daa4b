//! Undo/redo integration tests: exact reversibility of totem moves and
//! token placements.

use oxono_core::{AiLevel, Board, Color, Game, GameConfig, GamePhase, Pos, Shape};

fn game6() -> Game {
    let config = GameConfig::new(6, AiLevel::Random).unwrap().with_seed(42);
    Game::with_board(
        config,
        Board::with_totems(6, Pos::new(2, 2), Pos::new(3, 3)),
    )
}

#[test]
fn test_undo_restores_totem_position_and_marker() {
    let mut game = game6();

    game.move_totem(Pos::new(2, 0), Shape::Cross);
    game.place_token(Pos::new(2, 1), Shape::Cross);
    game.move_totem(Pos::new(3, 0), Shape::Circle);
    assert_eq!(game.last_moved_totem(), Some(Shape::Circle));

    game.undo();
    assert_eq!(game.totem_pos(Shape::Circle), Pos::new(3, 3));
    // The marker reverts to the previously moved totem.
    assert_eq!(game.last_moved_totem(), Some(Shape::Cross));
    assert_eq!(game.phase(), GamePhase::Move);
}

#[test]
fn test_undo_first_move_clears_marker() {
    let mut game = game6();

    game.move_totem(Pos::new(2, 0), Shape::Cross);
    game.undo();

    assert_eq!(game.totem_pos(Shape::Cross), Pos::new(2, 2));
    assert_eq!(game.last_moved_totem(), None);
}

#[test]
fn test_undo_placement_refunds_inventory_and_clears_cell() {
    let mut game = game6();

    game.move_totem(Pos::new(2, 0), Shape::Cross);
    game.place_token(Pos::new(2, 1), Shape::Cross);
    assert_eq!(game.current_player_token_count(Shape::Cross), 3);
    assert_eq!(game.last_placed_token(), Some(Pos::new(2, 1)));

    game.undo();

    assert!(game.is_cell_empty(Pos::new(2, 1)));
    assert_eq!(game.current_player_token_count(Shape::Cross), 4);
    assert_eq!(game.last_placed_token(), None);
    assert_eq!(game.phase(), GamePhase::Insert);
}

#[test]
fn test_undo_redo_round_trip_is_exact() {
    let mut game = game6();

    game.move_totem(Pos::new(2, 0), Shape::Cross);
    game.place_token(Pos::new(1, 0), Shape::Cross);
    game.switch_player();
    game.move_totem(Pos::new(3, 1), Shape::Circle);
    game.place_token(Pos::new(4, 1), Shape::Circle);

    let board_snapshot = game.board().clone();
    let last_placed = game.last_placed_token();
    let last_moved = game.last_moved_totem();
    let phase = game.phase();

    game.undo();
    assert_ne!(game.board(), &board_snapshot);
    game.redo();

    assert_eq!(game.board(), &board_snapshot);
    assert_eq!(game.last_placed_token(), last_placed);
    assert_eq!(game.last_moved_totem(), last_moved);
    assert_eq!(game.phase(), phase);
}

#[test]
fn test_undo_chain_back_to_initial_board() {
    let mut game = game6();
    let initial = game.board().clone();

    game.move_totem(Pos::new(2, 0), Shape::Cross);
    game.place_token(Pos::new(2, 1), Shape::Cross);
    game.move_totem(Pos::new(3, 0), Shape::Circle);
    game.place_token(Pos::new(4, 0), Shape::Circle);

    for _ in 0..4 {
        game.undo();
    }

    assert_eq!(game.board(), &initial);
    assert_eq!(game.current_player_token_count(Shape::Cross), 4);
    assert_eq!(game.current_player_token_count(Shape::Circle), 4);
    assert_eq!(game.last_placed_token(), None);
    assert_eq!(game.last_moved_totem(), None);
}

#[test]
fn test_new_command_invalidates_redo_branch() {
    let mut game = game6();

    game.move_totem(Pos::new(2, 0), Shape::Cross);
    game.undo();
    game.move_totem(Pos::new(2, 4), Shape::Cross);

    let after_branch = game.board().clone();
    game.redo(); // no-op: the branch was discarded
    assert_eq!(game.board(), &after_branch);
    assert_eq!(game.totem_pos(Shape::Cross), Pos::new(2, 4));
}

#[test]
fn test_undo_redo_on_empty_history_are_noops() {
    let mut game = game6();
    let initial = game.board().clone();

    game.undo();
    game.redo();

    assert_eq!(game.board(), &initial);
    assert_eq!(game.phase(), GamePhase::Move);
    assert_eq!(game.current_player_color(), Color::Pink);
}

#[test]
fn test_redo_placement_consumes_inventory_again() {
    let mut game = game6();

    game.move_totem(Pos::new(2, 0), Shape::Cross);
    game.place_token(Pos::new(2, 1), Shape::Cross);
    game.undo();
    assert_eq!(game.current_player_token_count(Shape::Cross), 4);

    game.redo();
    assert_eq!(game.current_player_token_count(Shape::Cross), 3);
    assert!(!game.is_cell_empty(Pos::new(2, 1)));
    assert_eq!(game.phase(), GamePhase::Move);
}
