//! Core Xiangqi types.
//!
//! - `Piece`, `PieceKind` and `Side` - piece codes and sides
//! - `Square` - padded 16x16 board index (u8)
//! - `Move` and `MoveList` - packed moves

mod moves;
mod piece;
mod square;

pub use moves::{Move, MoveList, MoveListIntoIter, ScoredMove, ScoredMoveList};
pub use piece::{Piece, PieceKind, Side};
pub use square::{Square, BOARD_CELLS};

pub(crate) use moves::MAX_PLY;
