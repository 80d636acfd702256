//! Repetition detection and perpetual check / chase adjudication.

use crate::board::{Position, RepStatus, WIN_VALUE};

fn play(pos: &mut Position, moves: &[&str]) {
    for text in moves {
        let mv = pos.parse_move(text).unwrap_or_else(|e| panic!("{text}: {e}"));
        assert!(pos.make_move(mv), "{text} rejected");
    }
}

fn play_cycles(pos: &mut Position, cycle: &[&str], times: usize) {
    for _ in 0..times {
        play(pos, cycle);
    }
}

#[test]
fn test_no_repetition_at_start() {
    let mut pos = Position::new();
    assert_eq!(pos.rep_status(1), RepStatus::NONE);
    play(&mut pos, &["h2e2", "h9g7"]);
    assert!(!pos.rep_status(1).is_repetition());
}

#[test]
fn test_single_repetition_detected() {
    let mut pos = Position::new();
    play(&mut pos, &["h0g2", "h9g7", "g2h0", "g7h9"]);
    let status = pos.rep_status(1);
    assert!(status.is_repetition());
    assert!(!pos.rep_status(2).is_repetition());
}

#[test]
fn test_horse_shuffle_is_draw() {
    let mut pos = Position::new();
    play_cycles(&mut pos, &["h0g2", "h9g7", "g2h0", "g7h9"], 3);

    let status = pos.rep_status(3);
    assert!(status.is_repetition());
    assert!(!status.self_perpetual_check());
    assert!(!status.opp_perpetual_check());
    assert!(!status.self_perpetual_chase());
    assert!(!status.opp_perpetual_chase());

    let value = pos.rep_value(status);
    assert!(value > -WIN_VALUE && value < WIN_VALUE);
    assert_eq!(value, pos.draw_value());
}

#[test]
fn test_perpetual_check_loses() {
    let mut pos = Position::from_fen("4k4/7R1/9/9/9/9/9/9/9/3K5 w");
    play_cycles(&mut pos, &["h8h9", "e9e8", "h9h8", "e8e9"], 3);

    let status = pos.rep_status(3);
    assert_eq!(status.bits(), 1 | 2);
    assert!(status.self_perpetual_check());

    // Red, to move, is the checking side and loses.
    let value = pos.rep_value(status);
    assert!(value < -WIN_VALUE, "value {value}");
}

#[test]
fn test_perpetual_chase_loses() {
    let mut pos = Position::from_fen("5k3/9/9/9/c8/1R7/9/9/9/4K4 w");
    play_cycles(&mut pos, &["b4a4", "a5b5", "a4b4", "b5a5"], 3);

    let status = pos.rep_status(3);
    assert_eq!(status.bits(), 1 | 8);
    assert!(status.self_perpetual_chase());
    assert!(!status.opp_perpetual_chase());
    assert!(pos.rep_value(status) < -WIN_VALUE);
}

#[test]
fn test_rep_status_restores_position() {
    let mut pos = Position::from_fen("5k3/9/9/9/c8/1R7/9/9/9/4K4 w");
    play_cycles(&mut pos, &["b4a4", "a5b5", "a4b4", "b5a5"], 3);
    let before = pos.clone();
    let distance = pos.distance();
    let history: Vec<_> = pos.history().to_vec();

    pos.rep_status(3);

    assert_eq!(pos, before);
    assert_eq!(pos.distance(), distance);
    assert_eq!(pos.history(), history.as_slice());
    assert!(pos.is_consistent());
}

#[test]
fn test_opponent_perpetual_check_wins_for_side_to_move() {
    let mut pos = Position::from_fen("4k4/7R1/9/9/9/9/9/9/9/3K5 w");
    play_cycles(&mut pos, &["h8h9", "e9e8", "h9h8", "e8e9"], 2);
    play(&mut pos, &["h8h9", "e9e8", "h9h8"]);

    // Black to move; it is Red who keeps checking.
    let status = pos.rep_status(2);
    assert!(status.opp_perpetual_check());
    assert!(pos.rep_value(status) > WIN_VALUE);
}

#[test]
fn test_check_outranks_chase_in_play() {
    // Red's soldier steps on and off the e-file to give cannon checks, while
    // every Black rook move blocks and also attacks the loose horse on b7.
    let mut pos = Position::from_fen("4k4/9/1N3r3/9/3P5/9/4C4/9/9/3K5 w");
    play_cycles(&mut pos, &["d5e5", "f7e7", "e5d5", "e7f7"], 3);

    let status = pos.rep_status(3);
    assert_eq!(status.bits(), 1 | 2);
    assert!(!status.opp_perpetual_chase());
    assert!(pos.rep_value(status) < -WIN_VALUE);
}

#[test]
fn test_mutual_chase_is_draw() {
    // Red's rook keeps hitting the cannon on a5, Black's rook the cannon on i4.
    let mut pos = Position::from_fen("3k5/9/8r/9/c8/8C/R8/9/9/5K3 w");
    play_cycles(&mut pos, &["a3a2", "i7i6", "a2a3", "i6i7"], 3);

    let status = pos.rep_status(3);
    assert_eq!(status.bits(), 1 | 8 | 16);
    assert_eq!(pos.rep_value(status), pos.draw_value());
}

#[test]
fn test_attacking_defended_cheaper_piece_is_not_chase() {
    let cycle = ["a3a2", "d9d8", "a2a3", "d8d9"];

    let mut loose = Position::from_fen("3k5/9/9/9/c8/9/R8/9/9/5K3 w");
    play_cycles(&mut loose, &cycle, 3);
    let status = loose.rep_status(3);
    assert_eq!(status.bits(), 1 | 8);

    // The rook on c5 recaptures on a5, and a cannon is worth less than a rook.
    let mut guarded = Position::from_fen("3k5/9/9/9/c1r6/9/R8/9/9/5K3 w");
    play_cycles(&mut guarded, &cycle, 3);
    let status = guarded.rep_status(3);
    assert_eq!(status.bits(), 1);
    assert_eq!(guarded.rep_value(status), guarded.draw_value());
}
