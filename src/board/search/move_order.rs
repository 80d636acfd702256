//! Move ordering utilities for search.

use super::constants::{CAPTURE_SCORE, KILLER1_SCORE, KILLER2_SCORE, TT_MOVE_SCORE};
use super::SearchTables;
use crate::board::{Move, MoveList, Position, ScoredMoveList};

/// Order moves: TT move, the two killers for `ply`, captures by MVV-LVA,
/// then quiet moves by history.
///
/// The sort is stable, so moves with equal scores keep generation order.
pub(super) fn order_moves(
    pos: &Position,
    tables: &SearchTables,
    moves: &MoveList,
    tt_move: Move,
    ply: usize,
) -> ScoredMoveList {
    let killer1 = tables.killer_moves.primary(ply);
    let killer2 = tables.killer_moves.secondary(ply);

    let mut scored = ScoredMoveList::new();
    for &mv in moves {
        let score = if mv == tt_move {
            TT_MOVE_SCORE
        } else if mv == killer1 {
            KILLER1_SCORE
        } else if mv == killer2 {
            KILLER2_SCORE
        } else if !pos.piece_at(mv.dst()).is_empty() {
            CAPTURE_SCORE + pos.mvv_lva(mv)
        } else {
            tables.history.score(pos, mv).min(CAPTURE_SCORE - 1)
        };
        scored.push(mv, score);
    }
    scored.sort_by_score_desc();
    scored
}

/// Order check evasions: TT move first, then by history. Killers are
/// skipped since they rarely answer a check.
pub(super) fn order_evasions(
    pos: &Position,
    tables: &SearchTables,
    moves: &MoveList,
    tt_move: Move,
) -> ScoredMoveList {
    let mut scored = ScoredMoveList::new();
    for &mv in moves {
        let score = if mv == tt_move {
            TT_MOVE_SCORE
        } else {
            tables.history.score(pos, mv)
        };
        scored.push(mv, score);
    }
    scored.sort_by_score_desc();
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_precede_quiet_moves_with_history() {
        let pos = Position::new();
        let mut tables = SearchTables::new(4);
        let quiet = pos.parse_move("h2e2").unwrap();
        tables.history.update(&pos, quiet, 100);

        let ordered = order_moves(&pos, &tables, &pos.generate_moves(), Move::NULL, 0);
        let first = ordered.as_slice()[0].mv;
        assert!(!pos.piece_at(first.dst()).is_empty(), "{first} is not a capture");
        let captures = ordered.iter().take_while(|s| !pos.piece_at(s.mv.dst()).is_empty()).count();
        assert_eq!(ordered.as_slice()[captures].mv, quiet);
    }

    #[test]
    fn killers_precede_captures() {
        let pos = Position::new();
        let mut tables = SearchTables::new(4);
        let killer = pos.parse_move("b0c2").unwrap();
        tables.killer_moves.update(3, killer);

        let ordered = order_moves(&pos, &tables, &pos.generate_moves(), Move::NULL, 3);
        assert_eq!(ordered.as_slice()[0].mv, killer);
    }
}
