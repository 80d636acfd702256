//! Core search implementation.
//!
//! This module implements:
//! - Iterative deepening with a hard time budget
//! - Alpha-beta search with PVS
//! - Null move pruning with verification
//! - Check and single-reply extensions
//! - Repetition scoring at every node
//! - Mate-distance aware transposition table use
//! - Quiescence search over captures and check evasions
//! - Move ordering (TT move, killers, history)

mod iterative;
mod quiescence;

pub use iterative::simple_search;

use std::time::Instant;

use crate::tt::BoundType;

use super::move_order::{order_evasions, order_moves};
use super::{SearchInfoCallback, SearchState};
use crate::board::{Move, Position, BAN_VALUE, MATE_VALUE, WIN_VALUE};

/// Search context for a single search
pub struct SimpleSearchContext<'a> {
    pub pos: &'a mut Position,
    pub state: &'a mut SearchState,
    pub start_time: Instant,
    pub time_limit_ms: u64,
    pub nodes: u64,
    /// Latched once the time budget has run out.
    pub stopped: bool,
    /// Optional callback for reporting iteration info
    pub info_callback: Option<SearchInfoCallback>,
}

impl SimpleSearchContext<'_> {
    /// Count a node and report whether the search must unwind. The clock is
    /// read once every `time_check_interval` nodes.
    #[inline]
    fn should_stop(&mut self) -> bool {
        if self.stopped {
            return true;
        }
        let interval_mask = self.state.params.time_check_interval.max(1) - 1;
        if self.nodes & interval_mask == 0 && self.time_up() {
            self.stopped = true;
        }
        self.stopped
    }

    #[inline]
    fn time_up(&self) -> bool {
        self.start_time.elapsed().as_millis() as u64 >= self.time_limit_ms
    }

    /// Probe the TT. Returns the stored move for ordering and a score when
    /// the entry settles this node.
    ///
    /// Mate scores are stored relative to the node and are trusted at any
    /// depth. Repetition-ban scores depend on the path and never cut off.
    fn probe_tt(&mut self, alpha: i32, beta: i32, depth: i32) -> (Move, Option<i32>) {
        let Some(entry) = self.state.tables.tt.probe(self.pos.key(), self.pos.lock()) else {
            return (Move::NULL, None);
        };
        let tt_move = entry.best_move().unwrap_or(Move::NULL);
        let distance = self.pos.distance().min(self.state.params.limit_depth) as i32;

        let mut score = entry.score();
        let mut mate = false;
        if score > WIN_VALUE {
            if score <= BAN_VALUE {
                return (tt_move, None);
            }
            score -= distance;
            mate = true;
        } else if score < -WIN_VALUE {
            if score >= -BAN_VALUE {
                return (tt_move, None);
            }
            score += distance;
            mate = true;
        }

        if entry.depth() < depth && !mate {
            return (tt_move, None);
        }
        let cutoff = match entry.bound_type() {
            BoundType::Exact => Some(score),
            BoundType::LowerBound => (score >= beta).then_some(score),
            BoundType::UpperBound => (score <= alpha).then_some(score),
        };
        if cutoff.is_some() {
            self.state.stats.tt_hits += 1;
        }
        (tt_move, cutoff)
    }

    /// Store a node result in the TT, converting mate scores to be relative
    /// to this node. Bound-only draw and ban scores are not stored.
    fn store_tt(&mut self, bound: BoundType, score: i32, depth: i32, best_move: Move) {
        if self.stopped {
            return;
        }
        let distance = self.pos.distance().min(self.state.params.limit_depth) as i32;
        let stored = if score > WIN_VALUE {
            if best_move.is_null() && score <= BAN_VALUE {
                return;
            }
            score + distance
        } else if score < -WIN_VALUE {
            if best_move.is_null() && score >= -BAN_VALUE {
                return;
            }
            score - distance
        } else {
            if score == self.pos.draw_value() && best_move.is_null() {
                return;
            }
            score
        };
        self.state
            .tables
            .tt
            .store(self.pos.key(), self.pos.lock(), depth, stored, bound, best_move);
    }

    /// Reward the move that settled a node.
    fn update_best_move(&mut self, mv: Move, depth: i32) {
        self.state.tables.history.update(self.pos, mv, depth);
        self.state.tables.killer_moves.update(self.pos.distance(), mv);
    }

    /// Full-width alpha-beta search of the current position.
    pub fn search_full(&mut self, mut alpha: i32, beta: i32, depth: i32, no_null: bool) -> i32 {
        if depth <= 0 {
            return self.quiesce(alpha, beta);
        }

        self.nodes += 1;
        if self.should_stop() {
            return alpha;
        }

        // Mate distance pruning: nothing here can beat being mated now.
        let mate = self.pos.mate_value();
        if mate >= beta {
            return mate;
        }

        let status = self.pos.rep_status(1);
        if status.is_repetition() {
            return self.pos.rep_value(status);
        }

        let (tt_move, cutoff) = self.probe_tt(alpha, beta, depth);
        if let Some(score) = cutoff {
            return score;
        }

        if self.pos.distance() >= self.state.params.limit_depth {
            return self.pos.evaluate();
        }

        let in_check = self.pos.in_check();
        if !no_null && !in_check && self.pos.own_material_exceeds(self.state.params.null_okay_margin) {
            let null_depth = self.state.params.null_depth;
            self.pos.null_move();
            let score = -self.search_full(-beta, 1 - beta, depth - null_depth - 1, true);
            self.pos.undo_null_move();
            if self.stopped {
                return alpha;
            }
            if score >= beta
                && (self.pos.own_material_exceeds(self.state.params.null_safe_margin)
                    || self.search_full(beta - 1, beta, depth - null_depth, true) >= beta)
            {
                return score;
            }
        }

        // Evasions are filtered for legality up front so a single reply can
        // be recognised and extended.
        let (moves, single_reply) = if in_check {
            let legal = self.pos.legal_moves();
            let single = legal.len() == 1;
            (order_evasions(self.pos, &self.state.tables, &legal, tt_move), single)
        } else {
            let moves = self.pos.generate_moves();
            let ply = self.pos.distance();
            (order_moves(self.pos, &self.state.tables, &moves, tt_move, ply), false)
        };

        let mut best_score = -MATE_VALUE;
        let mut best_move = Move::NULL;
        let mut bound = BoundType::UpperBound;

        for scored in moves.iter() {
            let mv = scored.mv;
            if !self.pos.make_move(mv) {
                continue;
            }
            let new_depth = if self.pos.in_check() || single_reply {
                depth
            } else {
                depth - 1
            };

            let score = if best_score == -MATE_VALUE {
                -self.search_full(-beta, -alpha, new_depth, false)
            } else {
                let score = -self.search_full(-alpha - 1, -alpha, new_depth, false);
                if score > alpha && score < beta {
                    -self.search_full(-beta, -alpha, new_depth, false)
                } else {
                    score
                }
            };
            self.pos.undo_make_move();

            if self.stopped {
                return alpha;
            }

            if score > best_score {
                best_score = score;
                if score >= beta {
                    bound = BoundType::LowerBound;
                    best_move = mv;
                    break;
                }
                if score > alpha {
                    bound = BoundType::Exact;
                    best_move = mv;
                    alpha = score;
                }
            }
        }

        if best_score == -MATE_VALUE {
            return self.pos.mate_value();
        }

        self.store_tt(bound, best_score, depth, best_move);
        if !best_move.is_null() {
            self.update_best_move(best_move, depth);
        }
        best_score
    }
}
