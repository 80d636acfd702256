use super::super::constants::{QUIESCE_MIN_CAPTURE, QUIESCE_MIN_HOME_CAPTURE};
use super::super::move_order::order_evasions;
use super::SimpleSearchContext;
use crate::board::{Move, ScoredMoveList, MATE_VALUE};

impl SimpleSearchContext<'_> {
    /// Quiescence search: every evasion when in check, otherwise stand pat
    /// and try the captures worth making.
    pub fn quiesce(&mut self, mut alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;
        if self.should_stop() {
            return alpha;
        }

        let mate = self.pos.mate_value();
        if mate >= beta {
            return mate;
        }

        let status = self.pos.rep_status(1);
        if status.is_repetition() {
            return self.pos.rep_value(status);
        }

        if self.pos.distance() >= self.state.params.limit_depth {
            return self.pos.evaluate();
        }

        let mut best_score = -MATE_VALUE;
        let moves = if self.pos.in_check() {
            let legal = self.pos.legal_moves();
            order_evasions(self.pos, &self.state.tables, &legal, Move::NULL)
        } else {
            let stand_pat = self.pos.evaluate();
            if stand_pat >= beta {
                return stand_pat;
            }
            best_score = stand_pat;
            alpha = alpha.max(stand_pat);
            self.worthwhile_captures()
        };

        for scored in moves.iter() {
            let mv = scored.mv;
            if !self.pos.make_move(mv) {
                continue;
            }
            let score = -self.quiesce(-beta, -alpha);
            self.pos.undo_make_move();

            if self.stopped {
                return alpha;
            }
            if score > best_score {
                if score >= beta {
                    return score;
                }
                best_score = score;
                alpha = alpha.max(score);
            }
        }

        if best_score == -MATE_VALUE {
            self.pos.mate_value()
        } else {
            best_score
        }
    }

    /// Captures in MVV-LVA order, cut off at the first one too cheap to be
    /// worth searching. Captures landing on the mover's own half must win
    /// more.
    fn worthwhile_captures(&self) -> ScoredMoveList {
        let side = self.pos.side_to_move();
        let mut kept = ScoredMoveList::new();
        for scored in self.pos.generate_captures().iter() {
            if scored.score < QUIESCE_MIN_CAPTURE
                || (scored.score < QUIESCE_MIN_HOME_CAPTURE && scored.mv.dst().on_home_half(side))
            {
                break;
            }
            kept.push(scored.mv, scored.score);
        }
        kept
    }
}
