//! Xiangqi board representation and game rules.
//!
//! The board is a 16x16 mailbox with the 9x10 playing area in the middle, so
//! piece steps are plain index offsets and off-board squares are recognised
//! by a single table lookup. Hash keys, piece lists and material are updated
//! incrementally by every move and undo.
//!
//! # Example
//! ```
//! use xiangqi_engine::board::{Position, Side};
//!
//! let mut pos = Position::new();
//! let moves = pos.legal_moves();
//! println!("Starting position has {} legal moves", moves.len());
//! assert_eq!(pos.side_to_move(), Side::Red);
//!
//! let mv = pos.parse_move("h2e2").unwrap();
//! assert!(pos.make_move(mv));
//! pos.undo_make_move();
//! ```

mod error;
mod eval;
mod fen;
mod make_unmake;
mod movegen;
mod notation;
mod pst;
mod repetition;
mod search;
mod state;
mod types;

#[cfg(test)]
mod tests;

// Public API - types users need
pub use error::{FenError, MoveParseError, SquareError};
pub use eval::{ADVANCED_VALUE, BAN_VALUE, DRAW_VALUE, LIMIT_DEPTH, MATE_VALUE, WIN_VALUE};
pub use notation::{move_to_iccs, parse_iccs};
pub use repetition::RepStatus;
pub use state::{HistoryEntry, PieceList, Position};
pub use types::{
    Move, MoveList, MoveListIntoIter, Piece, PieceKind, ScoredMove, ScoredMoveList, Side, Square,
    BOARD_CELLS,
};

// Public API - search engine and configuration
pub use search::{
    HistoryTable, KillerTable, SearchEngine, SearchInfoCallback, SearchIterationInfo, SearchParams,
    SearchResult, SearchStats, SearchStatus, DEFAULT_HASH_LEVEL,
};

pub(crate) use types::MAX_PLY;
