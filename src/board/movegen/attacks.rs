//! Attack detection on a bare board array.
//!
//! Works on `&[Piece; BOARD_CELLS]` rather than a `Position` so callers can
//! test hypothetical boards (a move applied to a scratch copy) without
//! touching the live position.

use super::super::{Piece, PieceKind, Side, Square, BOARD_CELLS};
use super::{ADVISOR_DELTA, KING_DELTA, KNIGHT_CHECK_DELTA};

#[inline]
fn at(squares: &[Piece; BOARD_CELLS], sq: Square) -> Piece {
    squares[sq.index()]
}

/// Whether any piece of `by` could capture on `sq`.
///
/// When `sq` holds a General, an enemy General on the same open file also
/// counts as an attack, which is how the face-off rule is enforced.
pub(crate) fn square_attacked(squares: &[Piece; BOARD_CELLS], sq: Square, by: Side) -> bool {
    let target_is_general = at(squares, sq).kind() == Some(PieceKind::General);

    // Soldiers: straight ahead from behind, or sideways once across the river.
    let behind = sq.forward(by.opponent());
    if at(squares, behind).is(by, PieceKind::Soldier) {
        return true;
    }
    if sq.across_river(by) {
        for delta in [-1, 1] {
            if at(squares, sq.offset(delta)).is(by, PieceKind::Soldier) {
                return true;
            }
        }
    }

    // Horses, looked up backwards through the hobbling square.
    for (i, pair) in KNIGHT_CHECK_DELTA.iter().enumerate() {
        if !at(squares, sq.offset(ADVISOR_DELTA[i])).is_empty() {
            continue;
        }
        for &delta in pair {
            if at(squares, sq.offset(delta)).is(by, PieceKind::Horse) {
                return true;
            }
        }
    }

    if sq.in_palace() {
        for delta in ADVISOR_DELTA {
            if at(squares, sq.offset(delta)).is(by, PieceKind::Advisor) {
                return true;
            }
        }
    }

    if sq.on_home_half(by) {
        for delta in ADVISOR_DELTA {
            let eye = sq.offset(delta);
            let from = eye.offset(delta);
            if from.is_on_board() && at(squares, eye).is_empty() && at(squares, from).is(by, PieceKind::Elephant) {
                return true;
            }
        }
    }

    // Orthogonal rays: Rook or General as first piece, Cannon behind one screen.
    for delta in KING_DELTA {
        let mut cur = sq.offset(delta);
        let mut steps = 1;
        while cur.is_on_board() && at(squares, cur).is_empty() {
            cur = cur.offset(delta);
            steps += 1;
        }
        if !cur.is_on_board() {
            continue;
        }
        let first = at(squares, cur);
        if first.is(by, PieceKind::Rook) {
            return true;
        }
        if first.is(by, PieceKind::General) && (target_is_general || (steps == 1 && sq.in_palace())) {
            return true;
        }
        cur = cur.offset(delta);
        while cur.is_on_board() {
            let piece = at(squares, cur);
            if !piece.is_empty() {
                if piece.is(by, PieceKind::Cannon) {
                    return true;
                }
                break;
            }
            cur = cur.offset(delta);
        }
    }

    false
}

/// Whether `side`'s General on `squares` is attacked. A missing General
/// counts as not attacked.
pub(crate) fn general_attacked(squares: &[Piece; BOARD_CELLS], side: Side) -> bool {
    let general = Piece::new(side, PieceKind::General);
    Square::all()
        .filter(|sq| sq.in_palace() && sq.on_home_half(side))
        .find(|sq| at(squares, *sq) == general)
        .is_some_and(|sq| square_attacked(squares, sq, side.opponent()))
}
