//! Search tests to verify the engine finds correct moves in various positions.

use std::time::{Duration, Instant};

use xiangqi_engine::board::{move_to_iccs, Move, Position, SearchEngine, SearchStatus, WIN_VALUE};

fn best_move(fen: &str, depth: u32) -> (Position, Move) {
    let mut pos = Position::from_fen(fen);
    let mut engine = SearchEngine::new(16);
    let mv = engine.search_main(&mut pos, depth, 30_000);
    (pos, mv)
}

/// Test that the engine finds a simple mate in 1
#[test]
fn finds_mate_in_one_back_rank() {
    let (_, mv) = best_move("4k4/R8/9/9/9/9/9/9/9/1R1K5 w", 4);
    assert_eq!(move_to_iccs(mv), "B0B9", "Should find the rook mate on the back rank");
}

/// Same mate with colours reversed
#[test]
fn finds_mate_in_one_for_black() {
    let (_, mv) = best_move("5k1r1/9/9/9/9/9/9/9/8r/4K4 b", 4);
    assert_eq!(move_to_iccs(mv), "H9H0");
}

/// Test that the engine takes a rook left en prise
#[test]
fn captures_hanging_rook() {
    // No check along the back rank is available, so taking is the only win.
    let (_, mv) = best_move("5k3/9/9/9/9/r8/9/9/9/R3K4 w", 3);
    assert_eq!(move_to_iccs(mv), "A0A4");
}

/// Test that the engine returns a legal move from the starting position
#[test]
fn startpos_depth_one_returns_legal_move() {
    let (pos, mv) = best_move(Position::STARTPOS, 1);
    assert!(!mv.is_null());
    assert!(pos.legal_move(mv));
}

/// Test that a mated side gets the null move back
#[test]
fn mated_position_returns_null() {
    let (_, mv) = best_move("1R2k4/R8/9/9/9/9/9/9/9/3K5 b", 6);
    assert!(mv.is_null());
}

/// Repeated searches on an unmodified position and an emptied table agree
#[test]
fn repeated_search_is_deterministic() {
    let mut pos = Position::new();
    let mut engine = SearchEngine::new(16);

    let first = engine.search(&mut pos, 4, 60_000);
    engine.clear();
    let second = engine.search(&mut pos, 4, 60_000);

    assert_eq!(first.best_move, second.best_move);
    assert_eq!(first.score, second.score);
    assert_eq!(first.depth, second.depth);
}

/// A tiny time budget is honoured and still yields a legal move
#[test]
fn tiny_time_budget_is_respected() {
    let mut pos = Position::new();
    let mut engine = SearchEngine::new(16);

    let start = Instant::now();
    let result = engine.search(&mut pos, 64, 5);
    let elapsed = start.elapsed();

    assert!(pos.legal_move(result.best_move));
    assert_eq!(result.status, SearchStatus::Aborted);
    assert!(elapsed < Duration::from_millis(5 + 500), "search took {elapsed:?}");
}

/// Longer budgets go deeper
#[test]
fn more_time_searches_deeper() {
    let mut pos = Position::new();
    let shallow = SearchEngine::new(16).search(&mut pos, 64, 10);
    let deep = SearchEngine::new(16).search(&mut pos, 64, 300);
    assert!(deep.depth >= shallow.depth);
    assert!(deep.nodes > shallow.nodes);
}

/// The engine does not walk into a flying-general loss or an immediate mate
#[test]
fn search_score_stays_out_of_mate_band_in_quiet_opening() {
    let mut pos = Position::new();
    let result = SearchEngine::new(16).search(&mut pos, 4, 60_000);
    assert!(result.score.abs() < WIN_VALUE, "score {}", result.score);
}
