//! Xiangqi (Chinese chess) rules, a time-bounded alpha-beta engine, and a
//! game controller tying the two together.

pub mod board;
pub mod game;
pub mod tt;
pub mod zobrist;

pub use board::{Move, Piece, PieceKind, Position, SearchEngine, Side, Square};
pub use game::{Game, GameConfig, GameEvents};
pub use tt::TranspositionTable;
