//! Move generation, legality and mate detection.

use crate::board::{Move, Position, Side, Square};

fn sq(name: &str) -> Square {
    let bytes = name.as_bytes();
    Square::new((bytes[0] - b'a') as usize, (bytes[1] - b'0') as usize).expect("square on board")
}

fn mv(from: &str, to: &str) -> Move {
    Move::new(sq(from), sq(to))
}

fn destinations(pos: &Position, from: &str) -> Vec<Square> {
    let src = sq(from);
    let mut dsts: Vec<Square> = pos
        .legal_moves()
        .iter()
        .filter(|m| m.src() == src)
        .map(|m| m.dst())
        .collect();
    dsts.sort_by_key(|s| s.index());
    dsts
}

fn squares(names: &[&str]) -> Vec<Square> {
    let mut out: Vec<Square> = names.iter().map(|n| sq(n)).collect();
    out.sort_by_key(|s| s.index());
    out
}

#[test]
fn test_startpos_has_44_moves() {
    let pos = Position::new();
    assert_eq!(pos.legal_moves().len(), 44);
    assert_eq!(pos.generate_moves().len(), 44);
}

#[test]
fn test_captures_come_first() {
    let pos = Position::new();
    let moves = pos.generate_moves();
    let first_quiet = moves
        .iter()
        .position(|m| pos.piece_at(m.dst()).is_empty())
        .unwrap();
    assert!(moves.iter().skip(first_quiet).all(|m| pos.piece_at(m.dst()).is_empty()));
    // Both cannons can take a horse over the enemy cannon.
    assert_eq!(first_quiet, 2);
}

#[test]
fn test_horse_is_hobbled() {
    let pos = Position::new();
    // b0 -> d1 is blocked by the elephant on c0.
    assert_eq!(destinations(&pos, "b0"), squares(&["a2", "c2"]));
}

#[test]
fn test_elephant_eye_blocked() {
    let open = Position::from_fen("3k5/9/9/9/9/9/9/9/9/2B1K4 w");
    assert_eq!(destinations(&open, "c0"), squares(&["a2", "e2"]));

    let blocked = Position::from_fen("3k5/9/9/9/9/9/9/9/3P5/2B1K4 w");
    assert_eq!(destinations(&blocked, "c0"), squares(&["a2"]));
}

#[test]
fn test_elephant_cannot_cross_river() {
    let pos = Position::from_fen("3k5/9/9/9/9/2B6/9/9/9/4K4 w");
    assert_eq!(destinations(&pos, "c4"), squares(&["a2", "e2"]));
}

#[test]
fn test_advisor_and_general_stay_in_palace() {
    let pos = Position::from_fen("3k5/9/9/9/9/9/9/9/9/3AK4 w");
    assert_eq!(destinations(&pos, "d0"), squares(&["e1"]));
    assert_eq!(destinations(&pos, "e0"), squares(&["e1", "f0"]));
}

#[test]
fn test_cannon_needs_screen_to_capture() {
    let pos = Position::new();
    assert!(pos.legal_move(mv("h2", "h9")));
    assert!(!pos.legal_move(mv("h2", "h7")));
    assert!(!pos.legal_move(mv("h2", "h8")));
    assert!(pos.legal_move(mv("h2", "e2")));
    // Non-capturing slides cannot jump.
    assert!(!pos.legal_move(mv("b2", "b8")));
}

#[test]
fn test_rook_stops_at_first_piece() {
    let pos = Position::from_fen("3k5/9/9/9/p8/9/9/9/9/R3K4 w");
    let dsts = destinations(&pos, "a0");
    assert!(dsts.contains(&sq("a5")));
    assert!(!dsts.contains(&sq("a6")));
    assert!(dsts.contains(&sq("d0")));
    assert_eq!(dsts.len(), 5 + 3);
}

#[test]
fn test_soldier_moves_sideways_only_after_river() {
    let home = Position::from_fen("3k5/9/9/9/9/9/4P4/9/9/4K4 w");
    assert_eq!(destinations(&home, "e3"), squares(&["e4"]));

    let crossed = Position::from_fen("4k4/9/9/9/4P4/9/9/9/9/3K5 w");
    assert_eq!(destinations(&crossed, "e5"), squares(&["d5", "e6", "f5"]));
}

#[test]
fn test_black_soldier_moves_down() {
    let pos = Position::from_fen("4k4/9/9/9/9/4p4/9/9/9/3K5 b");
    assert_eq!(destinations(&pos, "e4"), squares(&["d4", "e3", "f4"]));
}

#[test]
fn test_flying_general_is_illegal() {
    let pos = Position::from_fen("4k4/9/9/9/9/9/9/9/9/3K5 w");
    assert!(pos.is_pseudo_legal(mv("d0", "e0")));
    assert!(!pos.legal_move(mv("d0", "e0")));
    assert_eq!(destinations(&pos, "d0"), squares(&["d1"]));
}

#[test]
fn test_pinned_piece_cannot_expose_general() {
    let pos = Position::from_fen("4k4/9/9/9/9/9/9/4r4/4R4/4K4 w");
    assert!(pos.legal_move(mv("e1", "e2")));
    assert!(!pos.legal_move(mv("e1", "d1")));
}

#[test]
fn test_back_rank_mate() {
    let pos = Position::from_fen("1R2k4/R8/9/9/9/9/9/9/9/3K5 b");
    assert!(pos.in_check());
    assert!(pos.is_mate());
    assert!(pos.legal_moves().is_empty());
}

#[test]
fn test_no_moves_without_check_is_mate() {
    let pos = Position::from_fen("3k5/R8/9/9/9/9/9/9/9/4K4 b");
    assert!(!pos.in_check());
    assert!(pos.is_mate());
}

#[test]
fn test_in_check_from_cannon_and_horse() {
    let cannon = Position::from_fen("4k4/9/9/9/9/9/9/4C4/4P4/3K5 b");
    assert!(!cannon.in_check());
    let cannon = Position::from_fen("4k4/9/4P4/9/9/9/9/4C4/9/3K5 b");
    assert!(cannon.in_check());

    let horse = Position::from_fen("4k4/9/3N5/9/9/9/9/9/9/3K5 b");
    assert!(horse.in_check());
    let hobbled = Position::from_fen("4k4/3p5/3N5/9/9/9/9/9/9/3K5 b");
    assert!(!hobbled.in_check());
}

#[test]
fn test_every_generated_legal_move_is_accepted() {
    let mut pos = Position::new();
    for m in pos.generate_moves() {
        let legal = pos.legal_move(m);
        let made = pos.make_move(m);
        assert_eq!(legal, made, "{m}");
        if made {
            pos.undo_make_move();
        }
    }
}

#[test]
fn test_legal_move_rejects_garbage() {
    let pos = Position::new();
    assert!(!pos.legal_move(Move::NULL));
    // Opponent's piece.
    assert!(!pos.legal_move(mv("h9", "g7")));
    // Onto own piece.
    assert!(!pos.legal_move(mv("a0", "b0")));
    assert_eq!(pos.side_to_move(), Side::Red);
}
