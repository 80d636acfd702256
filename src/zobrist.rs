//! Zobrist hashing for Xiangqi positions.
//!
//! Two independent 64-bit hashes are kept per position: the `key` indexes the
//! transposition table and the `lock` verifies a probe hit. Both are updated
//! incrementally by make/undo and both include the side to move.

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::board::{Piece, Square, BOARD_CELLS};

/// One full set of keys: one per (piece code, square) plus a side key.
pub(crate) struct ZobristTable {
    // piece_keys[piece_table_index][square_index], piece index 0..14
    pub(crate) piece_keys: [[u64; BOARD_CELLS]; 14],
    pub(crate) black_to_move_key: u64,
}

impl ZobristTable {
    fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut piece_keys = [[0; BOARD_CELLS]; 14];

        for piece in &mut piece_keys {
            for key in piece.iter_mut() {
                *key = rng.gen();
            }
        }

        let black_to_move_key = rng.gen();

        ZobristTable {
            piece_keys,
            black_to_move_key,
        }
    }

    #[inline]
    pub(crate) fn piece(&self, piece: Piece, sq: Square) -> u64 {
        self.piece_keys[piece.table_index()][sq.index()]
    }
}

/// Keys for the primary (table index) hash.
pub(crate) static ZOBRIST_KEY: Lazy<ZobristTable> = Lazy::new(|| ZobristTable::new(1234567890_u64));

/// Keys for the verification hash. A different seed keeps the two independent.
pub(crate) static ZOBRIST_LOCK: Lazy<ZobristTable> = Lazy::new(|| ZobristTable::new(987654321_u64));
