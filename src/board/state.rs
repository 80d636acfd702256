use std::fmt;

use crate::zobrist::{ZOBRIST_KEY, ZOBRIST_LOCK};

use super::pst;
use super::{Move, Piece, PieceKind, Side, Square, BOARD_CELLS};

/// Most pieces a single side can own.
pub(crate) const MAX_SIDE_PIECES: usize = 16;

/// Marks a cell that holds no piece in the slot map.
pub(crate) const NO_SLOT: u8 = u8::MAX;

/// Undo record pushed by every successful `make_move` and `null_move`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub(crate) mv: Move,
    pub(crate) captured: Piece,
    /// Slot the captured piece occupied in its owner's piece list.
    pub(crate) captured_slot: u8,
    /// Hashes of the position before the move.
    pub(crate) key: u64,
    pub(crate) lock: u64,
    /// Whether the move left the opponent in check.
    pub(crate) checking: bool,
}

impl HistoryEntry {
    #[must_use]
    pub fn mv(&self) -> Move {
        self.mv
    }

    #[must_use]
    pub fn captured(&self) -> Piece {
        self.captured
    }

    #[must_use]
    pub fn gave_check(&self) -> bool {
        self.checking
    }
}

/// Squares occupied by one side, in a stable slot order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PieceList {
    squares: [Square; MAX_SIDE_PIECES],
    len: u8,
}

impl PieceList {
    const fn new() -> Self {
        PieceList {
            squares: [Square::NONE; MAX_SIDE_PIECES],
            len: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Square] {
        &self.squares[..self.len as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = Square> + '_ {
        self.as_slice().iter().copied()
    }

    pub(crate) fn push(&mut self, sq: Square) -> u8 {
        let slot = self.len;
        self.squares[slot as usize] = sq;
        self.len += 1;
        slot
    }

    /// Remove the square in `slot`, moving the last entry into the hole.
    /// Returns the square that now fills `slot`, if any.
    pub(crate) fn swap_remove(&mut self, slot: u8) -> Option<Square> {
        self.len -= 1;
        if slot < self.len {
            self.squares[slot as usize] = self.squares[self.len as usize];
            Some(self.squares[slot as usize])
        } else {
            None
        }
    }

    /// Exact inverse of `swap_remove`: the entry now in `slot` goes back to
    /// the end and `sq` takes its place again. Returns the relocated square.
    pub(crate) fn reinsert(&mut self, slot: u8, sq: Square) -> Option<Square> {
        if slot < self.len {
            let moved = self.squares[slot as usize];
            self.squares[self.len as usize] = moved;
            self.squares[slot as usize] = sq;
            self.len += 1;
            Some(moved)
        } else {
            self.push(sq);
            None
        }
    }

    #[inline]
    pub(crate) fn get(&self, slot: u8) -> Square {
        self.squares[slot as usize]
    }

    #[inline]
    pub(crate) fn set(&mut self, slot: u8, sq: Square) {
        self.squares[slot as usize] = sq;
    }
}

/// A Xiangqi position with incremental hashes, evaluation and undo history.
///
/// Search mutates the live position through `make_move`/`undo_make_move`
/// and always restores it before returning.
#[derive(Clone, Debug)]
pub struct Position {
    pub(crate) squares: [Piece; BOARD_CELLS],
    pub(crate) side: Side,
    pub(crate) key: u64,
    pub(crate) lock: u64,
    /// Material plus placement per side, indexed by `Side::index`.
    pub(crate) material: [i32; 2],
    pub(crate) pieces: [PieceList; 2],
    /// Slot of each occupied cell inside its owner's piece list.
    pub(crate) slots: [u8; BOARD_CELLS],
    pub(crate) history: Vec<HistoryEntry>,
    /// Plies made since the search root (or since construction).
    pub(crate) distance: usize,
}

impl Position {
    /// Start position FEN.
    pub const STARTPOS: &'static str =
        "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w";

    /// The standard opening position.
    #[must_use]
    pub fn new() -> Self {
        Position::from_fen(Self::STARTPOS)
    }

    pub(crate) fn empty() -> Self {
        Position {
            squares: [Piece::EMPTY; BOARD_CELLS],
            side: Side::Red,
            key: 0,
            lock: 0,
            material: [0, 0],
            pieces: [PieceList::new(), PieceList::new()],
            slots: [NO_SLOT; BOARD_CELLS],
            history: Vec::with_capacity(256),
            distance: 0,
        }
    }

    /// Place `piece` on an empty cell, updating every incremental field.
    pub(crate) fn add_piece(&mut self, sq: Square, piece: Piece) {
        let (Some(side), Some(kind)) = (piece.side(), piece.kind()) else {
            return;
        };
        debug_assert!(self.squares[sq.index()].is_empty());
        self.squares[sq.index()] = piece;
        self.slots[sq.index()] = self.pieces[side.index()].push(sq);
        self.toggle_hash(sq, piece);
        self.material[side.index()] += pst::piece_value(side, kind, sq);
    }

    #[inline]
    pub(crate) fn toggle_hash(&mut self, sq: Square, piece: Piece) {
        self.key ^= ZOBRIST_KEY.piece(piece, sq);
        self.lock ^= ZOBRIST_LOCK.piece(piece, sq);
    }

    #[inline]
    pub(crate) fn toggle_side(&mut self) {
        self.side = self.side.opponent();
        self.key ^= ZOBRIST_KEY.black_to_move_key;
        self.lock ^= ZOBRIST_LOCK.black_to_move_key;
    }

    /// Hashes computed from scratch. Always equal to `(key, lock)`.
    #[must_use]
    pub fn compute_hashes(&self) -> (u64, u64) {
        let mut key = 0;
        let mut lock = 0;
        for sq in Square::all() {
            let piece = self.squares[sq.index()];
            if !piece.is_empty() {
                key ^= ZOBRIST_KEY.piece(piece, sq);
                lock ^= ZOBRIST_LOCK.piece(piece, sq);
            }
        }
        if self.side == Side::Black {
            key ^= ZOBRIST_KEY.black_to_move_key;
            lock ^= ZOBRIST_LOCK.black_to_move_key;
        }
        (key, lock)
    }

    /// Material totals computed from scratch. Always equal to the incremental ones.
    #[must_use]
    pub fn compute_material(&self) -> [i32; 2] {
        let mut material = [0, 0];
        for sq in Square::all() {
            let piece = self.squares[sq.index()];
            if let (Some(side), Some(kind)) = (piece.side(), piece.kind()) {
                material[side.index()] += pst::piece_value(side, kind, sq);
            }
        }
        material
    }

    /// Read-only view of the padded board, indexed by `Square::index`.
    #[must_use]
    pub fn squares(&self) -> &[Piece; BOARD_CELLS] {
        &self.squares
    }

    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Piece {
        self.squares[sq.index()]
    }

    #[must_use]
    pub fn side_to_move(&self) -> Side {
        self.side
    }

    /// Ownership bit for `side` (8 for Red, 16 for Black).
    #[must_use]
    pub fn self_side_tag(side: Side) -> u8 {
        side.tag()
    }

    #[must_use]
    pub fn key(&self) -> u64 {
        self.key
    }

    #[must_use]
    pub fn lock(&self) -> u64 {
        self.lock
    }

    #[must_use]
    pub fn material(&self, side: Side) -> i32 {
        self.material[side.index()]
    }

    #[must_use]
    pub fn piece_list(&self, side: Side) -> &PieceList {
        &self.pieces[side.index()]
    }

    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|entry| entry.mv)
    }

    /// Where `side`'s General stands, if it is still on the board.
    #[must_use]
    pub fn general_square(&self, side: Side) -> Option<Square> {
        let general = Piece::new(side, PieceKind::General);
        self.pieces[side.index()]
            .iter()
            .find(|sq| self.squares[sq.index()] == general)
    }

    /// Whether the last move made captured a piece.
    #[must_use]
    pub fn captured(&self) -> bool {
        self.history
            .last()
            .is_some_and(|entry| !entry.captured.is_empty())
    }

    /// Plies since the last capture, counting back through the whole history.
    #[must_use]
    pub fn plies_since_capture(&self) -> usize {
        self.history
            .iter()
            .rev()
            .take_while(|entry| entry.captured.is_empty())
            .count()
    }

    /// Whether either side still owns a Horse, Rook, Cannon or Soldier.
    #[must_use]
    pub fn has_attacking_material(&self) -> bool {
        Side::BOTH.iter().any(|&side| {
            self.pieces[side.index()].iter().any(|sq| {
                self.squares[sq.index()]
                    .kind()
                    .is_some_and(PieceKind::is_attacker)
            })
        })
    }

    /// Pieces of `side` as `(kind, square)`, ordered by kind then square.
    pub(crate) fn ordered_pieces(&self, side: Side) -> ([(PieceKind, Square); MAX_SIDE_PIECES], usize) {
        let mut out = [(PieceKind::General, Square::NONE); MAX_SIDE_PIECES];
        let mut len = 0;
        for sq in self.pieces[side.index()].iter() {
            if let Some(kind) = self.squares[sq.index()].kind() {
                out[len] = (kind, sq);
                len += 1;
            }
        }
        out[..len].sort_unstable();
        (out, len)
    }

    /// Debug check that board, piece lists, slot map, hashes and material agree.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        for side in Side::BOTH {
            let list = &self.pieces[side.index()];
            for (slot, sq) in list.iter().enumerate() {
                if !self.squares[sq.index()].belongs_to(side) || self.slots[sq.index()] as usize != slot {
                    return false;
                }
            }
        }
        let occupied = Square::all()
            .filter(|sq| !self.squares[sq.index()].is_empty())
            .count();
        occupied == self.pieces[0].len() + self.pieces[1].len()
            && self.compute_hashes() == (self.key, self.lock)
            && self.compute_material() == self.material
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}

/// Board equality ignores history and search distance.
impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.squares == other.squares
            && self.side == other.side
            && self.key == other.key
            && self.lock == other.lock
    }
}

impl Eq for Position {}

/// ASCII diagram, Black's back rank at the top.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..10).rev() {
            write!(f, "{rank} ")?;
            for file in 0..9 {
                let sq = Square::new(file, rank).ok_or(fmt::Error)?;
                let c = self.piece_at(sq).to_fen_char().unwrap_or('.');
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h i")?;
        write!(f, "{} to move", self.side)
    }
}
