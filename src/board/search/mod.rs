//! Search module implementing alpha-beta with iterative deepening.
//!
//! Features:
//! - Iterative deepening with a time budget checked every few nodes
//! - Principal variation search with null move pruning and verification
//! - Check extension and single-reply extension
//! - Quiescence search over captures, or all evasions when in check
//! - Move ordering (TT move, killers, history)
//! - Repetition scoring, including perpetual check and chase
//!
//! The engine searches the caller's live [`Position`], making and undoing
//! moves in place. Every move made is undone before a search call returns,
//! including when the time budget runs out.

mod constants;
mod move_order;
mod params;
mod simple;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use log::info;

use crate::tt::TranspositionTable;

use super::{Move, Position, MAX_PLY};
pub use params::SearchParams;

/// Default transposition table capacity level (`2^16` slots).
pub const DEFAULT_HASH_LEVEL: u32 = 16;

/// Where a search engine is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SearchStatus {
    #[default]
    Idle,
    Thinking,
    /// Reached the depth limit, found a forced result, or had only one
    /// sensible move.
    Completed,
    /// Ran out of time; the result comes from the last finished iteration.
    Aborted,
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchStatus::Idle => "idle",
            SearchStatus::Thinking => "thinking",
            SearchStatus::Completed => "completed",
            SearchStatus::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// Result of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move, [`Move::NULL`] when the side to move has no legal move.
    pub best_move: Move,
    /// Score of `best_move` from the side to move's point of view.
    pub score: i32,
    /// Deepest fully completed iteration (0 if none completed).
    pub depth: u32,
    pub nodes: u64,
    pub elapsed: Duration,
    /// `Completed` or `Aborted`.
    pub status: SearchStatus,
}

/// Statistics tracked during search
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchStats {
    pub nodes: u64,
    pub total_nodes: u64,
    pub tt_hits: u64,
    pub completed_depth: u32,
}

impl SearchStats {
    pub fn reset_search(&mut self) {
        self.nodes = 0;
        self.tt_hits = 0;
        self.completed_depth = 0;
    }
}

pub struct KillerTable {
    slots: [[Move; 2]; MAX_PLY],
}

impl Default for KillerTable {
    fn default() -> Self {
        Self::new()
    }
}

impl KillerTable {
    #[must_use]
    pub fn new() -> Self {
        KillerTable {
            slots: [[Move::NULL; 2]; MAX_PLY],
        }
    }

    #[must_use]
    pub fn primary(&self, ply: usize) -> Move {
        self.slots.get(ply).map_or(Move::NULL, |row| row[0])
    }

    #[must_use]
    pub fn secondary(&self, ply: usize) -> Move {
        self.slots.get(ply).map_or(Move::NULL, |row| row[1])
    }

    pub fn update(&mut self, ply: usize, mv: Move) {
        if ply >= MAX_PLY {
            return;
        }
        if self.slots[ply][0] != mv {
            self.slots[ply][1] = self.slots[ply][0];
            self.slots[ply][0] = mv;
        }
    }

    pub fn reset(&mut self) {
        self.slots = [[Move::NULL; 2]; MAX_PLY];
    }
}

/// History heuristic indexed by moving piece and destination square.
pub struct HistoryTable {
    entries: Box<[i32; HISTORY_SIZE]>,
}

const HISTORY_SIZE: usize = 14 * 256;

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryTable {
    #[must_use]
    pub fn new() -> Self {
        HistoryTable {
            entries: Box::new([0; HISTORY_SIZE]),
        }
    }

    fn index(pos: &Position, mv: Move) -> Option<usize> {
        let piece = pos.piece_at(mv.src());
        if piece.is_empty() {
            return None;
        }
        Some(piece.table_index() * 256 + mv.dst().index())
    }

    /// History score of `mv` in `pos`; zero for moves not starting on a piece.
    #[must_use]
    pub fn score(&self, pos: &Position, mv: Move) -> i32 {
        Self::index(pos, mv).map_or(0, |idx| self.entries[idx])
    }

    /// Reward a move that produced a cutoff or raised alpha.
    pub fn update(&mut self, pos: &Position, mv: Move, depth: i32) {
        if let Some(idx) = Self::index(pos, mv) {
            self.entries[idx] = self.entries[idx].saturating_add(depth * depth);
        }
    }

    pub fn reset(&mut self) {
        self.entries.fill(0);
    }
}

/// Tables used during search (TT, killers, history)
pub struct SearchTables {
    pub tt: TranspositionTable,
    pub killer_moves: KillerTable,
    pub history: HistoryTable,
}

impl SearchTables {
    #[must_use]
    pub fn new(hash_level: u32) -> Self {
        SearchTables {
            tt: TranspositionTable::new(hash_level),
            killer_moves: KillerTable::new(),
            history: HistoryTable::new(),
        }
    }

    /// Forget move ordering learned by the previous search.
    pub fn reset_ordering(&mut self) {
        self.killer_moves.reset();
        self.history.reset();
    }
}

/// Search state persisted across searches
pub struct SearchState {
    pub stats: SearchStats,
    pub tables: SearchTables,
    pub params: SearchParams,
}

impl SearchState {
    #[must_use]
    pub fn new(hash_level: u32) -> Self {
        SearchState {
            stats: SearchStats::default(),
            tables: SearchTables::new(hash_level),
            params: SearchParams::default(),
        }
    }

    pub fn new_search(&mut self) {
        self.stats.reset_search();
        self.tables.reset_ordering();
        self.tables.tt.new_search();
    }
}

/// Information about a completed search iteration.
#[derive(Debug, Clone)]
pub struct SearchIterationInfo {
    pub depth: u32,
    pub nodes: u64,
    pub time_ms: u64,
    pub score: i32,
    pub best_move: Move,
    /// Expected line from the TT, as space separated ICCS moves.
    pub pv: String,
}

/// Callback type for iteration info.
pub type SearchInfoCallback = Arc<dyn Fn(&SearchIterationInfo) + Send + Sync>;

/// A search engine paired with one game: owns the transposition table and
/// the move ordering tables, and searches a position it is handed.
pub struct SearchEngine {
    state: SearchState,
    status: SearchStatus,
    last_result: Option<SearchResult>,
    info_callback: Option<SearchInfoCallback>,
}

impl Default for SearchEngine {
    fn default() -> Self {
        SearchEngine::new(DEFAULT_HASH_LEVEL)
    }
}

impl SearchEngine {
    /// Create an engine with a `2^hash_level` slot transposition table.
    #[must_use]
    pub fn new(hash_level: u32) -> Self {
        SearchEngine {
            state: SearchState::new(hash_level),
            status: SearchStatus::Idle,
            last_result: None,
            info_callback: None,
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: SearchParams) -> Self {
        self.state.params = params;
        self
    }

    #[must_use]
    pub fn params(&self) -> &SearchParams {
        &self.state.params
    }

    pub fn params_mut(&mut self) -> &mut SearchParams {
        &mut self.state.params
    }

    pub fn set_params(&mut self, params: SearchParams) {
        self.state.params = params;
    }

    #[must_use]
    pub fn hash_level(&self) -> u32 {
        self.state.tables.tt.hash_level()
    }

    /// Replace the transposition table with an empty one of the new size.
    pub fn set_hash_level(&mut self, hash_level: u32) {
        self.state.tables.tt = TranspositionTable::new(hash_level);
    }

    #[must_use]
    pub fn tt(&self) -> &TranspositionTable {
        &self.state.tables.tt
    }

    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.state.stats
    }

    #[must_use]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Outcome of the most recent search, if any.
    #[must_use]
    pub fn last_result(&self) -> Option<&SearchResult> {
        self.last_result.as_ref()
    }

    pub fn set_info_callback(&mut self, callback: Option<SearchInfoCallback>) {
        self.info_callback = callback;
    }

    /// Clear the transposition table and move ordering tables.
    pub fn clear(&mut self) {
        self.state.tables.tt.clear();
        self.state.tables.reset_ordering();
        self.state.stats = SearchStats::default();
        self.status = SearchStatus::Idle;
        self.last_result = None;
    }

    /// Search `pos` for at most `max_depth` plies and about `max_millis`
    /// milliseconds and return the best move, or [`Move::NULL`] when the
    /// side to move has no legal move.
    ///
    /// `pos` is mutated during the search and restored before returning.
    pub fn search_main(&mut self, pos: &mut Position, max_depth: u32, max_millis: u64) -> Move {
        self.search(pos, max_depth, max_millis).best_move
    }

    /// Like [`search_main`](Self::search_main), returning the full result.
    pub fn search(&mut self, pos: &mut Position, max_depth: u32, max_millis: u64) -> SearchResult {
        self.status = SearchStatus::Thinking;
        let result = simple::simple_search(
            pos,
            &mut self.state,
            max_depth,
            max_millis,
            self.info_callback.clone(),
        );
        info!(
            "search {}: move {} score {} depth {} nodes {} in {} ms",
            result.status,
            result.best_move,
            result.score,
            result.depth,
            result.nodes,
            result.elapsed.as_millis()
        );
        self.last_result = Some(result);
        self.status = SearchStatus::Idle;
        result
    }
}
