//! Integration tests for a full game session

use tui_blockfall::core::{Board, BoardConfig, GameState, SequenceSource, UniformSource};
use tui_blockfall::types::{GameCommand, Phase, PieceColor, PieceKind, BOARD_WIDTH};

fn fill_row_except(board: &mut Board, y: i32, gaps: &[i32]) {
    for x in 0..BOARD_WIDTH as i32 {
        if !gaps.contains(&x) {
            board.set(x, y, Some(PieceColor::Green));
        }
    }
}

/// Rotate the spawned I upright and slide it to column `x`.
fn stand_i_at(game: &mut GameState<SequenceSource>, x: i32) {
    assert!(game.apply_command(GameCommand::Rotate).accepted);
    let start = game.active().unwrap().x;
    let (cmd, steps) = if x < start {
        (GameCommand::MoveLeft, start - x)
    } else {
        (GameCommand::MoveRight, x - start)
    };
    for _ in 0..steps {
        assert!(game.apply_command(cmd).accepted);
    }
    assert_eq!(game.active().unwrap().x, x);
}

#[test]
fn test_game_lifecycle() {
    let mut game = GameState::new(BoardConfig::default(), UniformSource::seeded(12345));
    assert_eq!(game.phase(), Phase::NoPiece);
    assert!(!game.started());

    game.start();
    assert!(game.started());
    assert_eq!(game.phase(), Phase::Falling);
    assert!(game.active().is_some());
    assert!(!game.game_over());
}

#[test]
fn test_same_seed_same_game() {
    let play = |seed| {
        let mut game = GameState::new(BoardConfig::default(), UniformSource::seeded(seed));
        game.start();
        let mut kinds = Vec::new();
        for _ in 0..20 {
            kinds.push(game.active().unwrap().kind);
            game.apply_command(GameCommand::HardDrop);
            if game.game_over() {
                break;
            }
        }
        (kinds, game.score(), game.board().clone())
    };

    assert_eq!(play(2024), play(2024));
}

#[test]
fn test_o_piece_locks_at_bottom_center() {
    let mut game = GameState::new(BoardConfig::default(), SequenceSource::repeat(PieceKind::O));
    game.start();
    assert_eq!(game.active().unwrap().x, 4);

    let outcome = game.apply_command(GameCommand::HardDrop);
    let lock = outcome.lock.unwrap();
    assert_eq!(lock.lines_cleared, 0);

    let board = game.board();
    for y in 0..20 {
        for x in 0..10 {
            let expected = (y == 18 || y == 19) && (x == 4 || x == 5);
            assert_eq!(board.is_occupied(x, y), expected, "({}, {})", x, y);
        }
    }
    assert_eq!(game.lines(), 0);
}

#[test]
fn test_single_row_clear() {
    let mut board = Board::default();
    fill_row_except(&mut board, 19, &[0]);
    let mut game = GameState::with_board(board, SequenceSource::repeat(PieceKind::I));
    game.start();

    stand_i_at(&mut game, 0);
    let outcome = game.apply_command(GameCommand::HardDrop);

    let lock = outcome.lock.unwrap();
    assert_eq!(lock.lines_cleared, 1);
    assert_eq!(lock.line_clear_score, 100);
    assert_eq!(lock.drop_score, 32);
    assert_eq!(game.lines(), 1);
    assert_eq!(game.score(), 132);

    let board = game.board();
    assert!(board.row(0).unwrap().iter().all(|c| c.is_none()));
    // The rest of the I column slid down one row.
    for y in 17..20 {
        assert!(board.is_occupied(0, y));
    }
    assert_eq!(board.occupied_count(), 3);
}

#[test]
fn test_hard_drop_scores_two_per_row() {
    let mut board = Board::default();
    board.set(4, 17, Some(PieceColor::Red));
    let mut game = GameState::with_board(board, SequenceSource::repeat(PieceKind::O));
    game.start();

    let outcome = game.apply_command(GameCommand::HardDrop);
    assert_eq!(outcome.lock.unwrap().drop_score, 30);
    assert_eq!(game.score(), 30);
    assert!(game.board().is_occupied(4, 15));
    assert!(game.board().is_occupied(5, 16));
}

#[test]
fn test_soft_drop_and_gravity() {
    let mut game = GameState::new(BoardConfig::default(), SequenceSource::repeat(PieceKind::T));
    game.start();

    game.apply_command(GameCommand::SoftDrop);
    game.tick();
    game.apply_command(GameCommand::SoftDrop);

    assert_eq!(game.active().unwrap().y, 3);
    // Gravity is free; only the two soft drops score.
    assert_eq!(game.score(), 2);
}

#[test]
fn test_multi_clear_across_level_boundary() {
    let mut board = Board::default();
    for y in 9..20 {
        let gaps: &[i32] = if y <= 10 { &[0, 9] } else { &[0] };
        fill_row_except(&mut board, y, gaps);
    }
    let mut game = GameState::with_board(board, SequenceSource::repeat(PieceKind::I));
    game.start();

    let mut cleared = Vec::new();
    for column in [0, 0, 0] {
        stand_i_at(&mut game, column);
        let outcome = game.apply_command(GameCommand::HardDrop);
        cleared.push(outcome.lock.unwrap().lines_cleared);
        assert_eq!(outcome.interval_changed, None);
    }
    assert_eq!(cleared, vec![4, 4, 1]);
    assert_eq!(game.lines(), 9);
    assert_eq!(game.level(), 1);
    let score_before = game.score();

    stand_i_at(&mut game, 9);
    let outcome = game.apply_command(GameCommand::HardDrop);

    let lock = outcome.lock.unwrap();
    assert_eq!(lock.lines_cleared, 2);
    assert_eq!(lock.line_clear_score, 200);
    assert_eq!(lock.level, 1);
    assert_eq!(game.score(), score_before + lock.drop_score + 200);
    assert_eq!(game.lines(), 11);
    assert_eq!(game.level(), 2);
    assert_eq!(game.tick_interval_ms(), 900);
    assert_eq!(outcome.interval_changed, Some(900));
}

#[test]
fn test_failed_spawn_leaves_board_as_locked() {
    let mut board = Board::default();
    for y in 2..20 {
        board.set(4, y, Some(PieceColor::Blue));
        board.set(5, y, Some(PieceColor::Blue));
    }
    let mut game = GameState::with_board(board.clone(), SequenceSource::repeat(PieceKind::O));
    game.start();

    let outcome = game.apply_command(GameCommand::HardDrop);
    assert!(outcome.lock.is_some());
    assert!(outcome.game_over);
    assert_eq!(game.phase(), Phase::GameOver);

    let o = tui_blockfall::core::base_shape(PieceKind::O);
    board.lock(&o, PieceColor::Yellow, 4, 0);
    assert_eq!(game.board(), &board);

    // Nothing but Restart moves the session on.
    let score = game.score();
    assert!(!game.apply_command(GameCommand::HardDrop).accepted);
    assert!(!game.apply_command(GameCommand::MoveLeft).accepted);
    assert!(!game.tick().accepted);
    assert_eq!(game.board(), &board);
    assert_eq!(game.score(), score);
}

#[test]
fn test_restart_resets_session() {
    let mut board = Board::default();
    board.set(4, 1, Some(PieceColor::Blue));
    let mut game = GameState::with_board(board, SequenceSource::repeat(PieceKind::O));
    game.start();
    assert!(game.game_over());

    let outcome = game.apply_command(GameCommand::Restart);
    assert!(outcome.accepted && outcome.restarted);
    assert_eq!(game.phase(), Phase::Falling);
    assert_eq!(game.score(), 0);
    assert_eq!(game.lines(), 0);
    assert_eq!(game.level(), 1);
    assert_eq!(game.tick_interval_ms(), 1000);
    assert_eq!(game.board().occupied_count(), 0);
    assert_eq!(game.episode_id(), 1);

    // A second restart while playing is ignored.
    assert!(!game.apply_command(GameCommand::Restart).accepted);
}

#[test]
fn test_snapshot_serializes() {
    let mut game = GameState::new(BoardConfig::default(), SequenceSource::repeat(PieceKind::S));
    game.start();

    let json = serde_json::to_value(game.snapshot()).unwrap();
    assert_eq!(json["active"]["kind"], "s");
    assert_eq!(json["phase"], "falling");
    assert_eq!(json["tick_interval_ms"], 1000);
    assert_eq!(json["game_over"], false);
}
