//! Static evaluation and score constants.

use crate::board::{
    Position, Side, ADVANCED_VALUE, BAN_VALUE, DRAW_VALUE, LIMIT_DEPTH, MATE_VALUE, WIN_VALUE,
};

#[test]
fn test_score_bands_are_ordered() {
    assert!(MATE_VALUE > BAN_VALUE);
    assert!(BAN_VALUE > WIN_VALUE);
    assert!(WIN_VALUE > DRAW_VALUE);
    // Mate scores stay distinguishable at the deepest distance.
    assert!(MATE_VALUE - LIMIT_DEPTH as i32 > BAN_VALUE);
    assert!(BAN_VALUE - LIMIT_DEPTH as i32 > WIN_VALUE);
}

#[test]
fn test_startpos_is_balanced() {
    let pos = Position::new();
    assert_eq!(pos.material(Side::Red), pos.material(Side::Black));
    assert_eq!(pos.evaluate(), ADVANCED_VALUE);
}

#[test]
fn test_rotated_position_scores_the_same() {
    let red = Position::from_fen("3k5/9/9/9/9/4R4/9/9/9/5K3 w");
    let black = Position::from_fen("3k5/9/9/9/4r4/9/9/9/9/5K3 b");
    assert_eq!(red.evaluate(), black.evaluate());
    assert!(red.evaluate() > 0);
}

#[test]
fn test_evaluation_is_from_side_to_move() {
    let red_to_move = Position::from_fen("3k5/9/9/9/9/4R4/9/9/9/5K3 w");
    let black_to_move = Position::from_fen("3k5/9/9/9/9/4R4/9/9/9/5K3 b");
    assert!(red_to_move.evaluate() > 0);
    assert!(black_to_move.evaluate() < 0);
}

#[test]
fn test_capture_swings_material() {
    let mut pos = Position::new();
    let before = pos.material(Side::Black);
    let mv = pos.parse_move("h2h9").unwrap();
    assert!(pos.make_move(mv));
    assert!(pos.material(Side::Black) < before);
    // Black, to move, is a horse down.
    assert!(pos.evaluate() < 0);
}

#[test]
fn test_distance_scores() {
    let mut pos = Position::new();
    assert_eq!(pos.mate_value(), -MATE_VALUE);
    assert_eq!(pos.ban_value(), -BAN_VALUE);
    assert_eq!(pos.draw_value(), -DRAW_VALUE);

    let mv = pos.parse_move("h2e2").unwrap();
    assert!(pos.make_move(mv));
    assert_eq!(pos.distance(), 1);
    assert_eq!(pos.mate_value(), 1 - MATE_VALUE);
    assert_eq!(pos.ban_value(), 1 - BAN_VALUE);
    assert_eq!(pos.draw_value(), DRAW_VALUE);
}

#[test]
fn test_evaluation_below_win_band() {
    // Everything Red owns against a bare General.
    let pos = Position::from_fen("4k4/9/9/9/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w");
    let score = pos.evaluate();
    assert!(score > 0 && score < WIN_VALUE);
}
