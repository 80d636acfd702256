use std::time::Instant;

use log::debug;

use super::super::move_order::order_moves;
use super::SimpleSearchContext;
use crate::board::move_to_iccs;
use crate::board::search::{SearchInfoCallback, SearchIterationInfo, SearchResult, SearchState, SearchStatus};
use crate::board::{Move, MoveList, Position, MATE_VALUE, MAX_PLY, WIN_VALUE};
use crate::tt::BoundType;

impl SimpleSearchContext<'_> {
    /// Search every root move to `depth` plies, trying `prev_best` first.
    /// Returns the best move and its score; the move is `NULL` only when no
    /// root move was searched before the clock ran out.
    fn search_root(&mut self, moves: &MoveList, prev_best: Move, depth: i32) -> (Move, i32) {
        let ordered = order_moves(self.pos, &self.state.tables, moves, prev_best, 0);
        let mut best_score = -MATE_VALUE;
        let mut best_move = Move::NULL;

        for scored in ordered.iter() {
            let mv = scored.mv;
            if !self.pos.make_move(mv) {
                continue;
            }
            let new_depth = if self.pos.in_check() { depth } else { depth - 1 };
            let score = if best_score == -MATE_VALUE {
                -self.search_full(-MATE_VALUE, MATE_VALUE, new_depth, true)
            } else {
                let score = -self.search_full(-best_score - 1, -best_score, new_depth, false);
                if score > best_score {
                    -self.search_full(-MATE_VALUE, -best_score, new_depth, true)
                } else {
                    score
                }
            };
            self.pos.undo_make_move();

            if self.stopped {
                break;
            }
            if score > best_score {
                best_score = score;
                best_move = mv;
            }
        }

        if !self.stopped && !best_move.is_null() {
            self.store_tt(BoundType::Exact, best_score, depth, best_move);
            self.update_best_move(best_move, depth);
        }
        (best_move, best_score)
    }

    /// Whether `best` is the only root move that does not lose outright.
    fn search_unique(&mut self, moves: &MoveList, best: Move, depth: i32) -> bool {
        let beta = 1 - WIN_VALUE;
        for &mv in moves {
            if mv == best || !self.pos.make_move(mv) {
                continue;
            }
            let new_depth = if self.pos.in_check() { depth } else { depth - 1 };
            let score = -self.search_full(-beta, 1 - beta, new_depth, false);
            self.pos.undo_make_move();
            if self.stopped || score >= beta {
                return false;
            }
        }
        true
    }

    /// Expected line: follow TT moves from the root while they stay legal.
    fn extract_pv(&mut self, max_len: usize) -> Vec<Move> {
        let mut pv = Vec::with_capacity(max_len);
        let mut seen_keys = [0u64; MAX_PLY];

        for seen_count in 0..max_len.min(MAX_PLY) {
            let key = self.pos.key();
            if seen_keys[..seen_count].contains(&key) {
                break;
            }
            seen_keys[seen_count] = key;

            let Some(mv) = self
                .state
                .tables
                .tt
                .probe(key, self.pos.lock())
                .and_then(|entry| entry.best_move())
            else {
                break;
            };
            if !self.pos.legal_move(mv) || !self.pos.make_move(mv) {
                break;
            }
            pv.push(mv);
        }

        for _ in 0..pv.len() {
            self.pos.undo_make_move();
        }
        pv
    }

    fn format_pv(pv: &[Move]) -> String {
        pv.iter().map(|&mv| move_to_iccs(mv)).collect::<Vec<_>>().join(" ")
    }

    /// Iterative deepening. Each finished iteration replaces the result; an
    /// iteration cut short by the clock is thrown away.
    pub fn iterative_deepening(&mut self, moves: &MoveList, max_depth: u32) -> SearchResult {
        let mut best_move = Move::NULL;
        let mut best_score = 0;
        let mut completed_depth = 0;
        let mut status = SearchStatus::Completed;

        for depth in 1..=max_depth {
            let (mv, score) = self.search_root(moves, best_move, depth as i32);
            if self.stopped || mv.is_null() {
                status = SearchStatus::Aborted;
                break;
            }
            best_move = mv;
            best_score = score;
            completed_depth = depth;
            self.state.stats.completed_depth = depth;

            let elapsed = self.start_time.elapsed();
            let pv = Self::format_pv(&self.extract_pv(depth as usize));
            debug!(
                "depth {depth} score {score} nodes {} time {} ms pv {pv}",
                self.nodes,
                elapsed.as_millis()
            );
            if let Some(cb) = &self.info_callback {
                cb(&SearchIterationInfo {
                    depth,
                    nodes: self.nodes,
                    time_ms: elapsed.as_millis() as u64,
                    score,
                    best_move: mv,
                    pv,
                });
            }

            if depth == max_depth || score > WIN_VALUE || score < -WIN_VALUE {
                break;
            }
            if self.time_up() {
                status = SearchStatus::Aborted;
                break;
            }
            if self.search_unique(moves, mv, depth as i32) {
                break;
            }
            if self.stopped {
                status = SearchStatus::Aborted;
                break;
            }
        }

        // Not even depth 1 finished: fall back to the first legal move in
        // search order.
        if best_move.is_null() {
            best_move = order_moves(self.pos, &self.state.tables, moves, Move::NULL, 0)
                .iter()
                .next()
                .map_or(Move::NULL, |scored| scored.mv);
            best_score = self.pos.evaluate();
        }

        SearchResult {
            best_move,
            score: best_score,
            depth: completed_depth,
            nodes: self.nodes,
            elapsed: self.start_time.elapsed(),
            status,
        }
    }
}

/// Run the main search algorithm
pub fn simple_search(
    pos: &mut Position,
    state: &mut SearchState,
    max_depth: u32,
    time_limit_ms: u64,
    info_callback: Option<SearchInfoCallback>,
) -> SearchResult {
    let start_time = Instant::now();
    state.new_search();

    // Search distances are measured from this root.
    let saved_distance = pos.distance;
    pos.distance = 0;

    let legal = pos.legal_moves();
    let result = if legal.len() <= 1 {
        SearchResult {
            best_move: legal.first().unwrap_or(Move::NULL),
            score: if legal.is_empty() { pos.mate_value() } else { pos.evaluate() },
            depth: 0,
            nodes: 0,
            elapsed: start_time.elapsed(),
            status: SearchStatus::Completed,
        }
    } else {
        let mut ctx = SimpleSearchContext {
            pos: &mut *pos,
            state: &mut *state,
            start_time,
            time_limit_ms,
            nodes: 0,
            stopped: false,
            info_callback,
        };
        ctx.iterative_deepening(&legal, max_depth.max(1))
    };

    pos.distance = saved_distance;
    state.stats.nodes = result.nodes;
    state.stats.total_nodes = state.stats.total_nodes.saturating_add(result.nodes);
    result
}
