use super::pst;
use super::state::{HistoryEntry, NO_SLOT};
use super::{Move, Piece, Position};

impl Position {
    /// Move the piece on `mv.src()` to `mv.dst()`, removing whatever stood there.
    /// Returns the captured piece and its former piece-list slot.
    fn move_piece(&mut self, mv: Move) -> (Piece, u8) {
        let src = mv.src();
        let dst = mv.dst();
        let piece = self.squares[src.index()];
        let captured = self.squares[dst.index()];
        let mut captured_slot = NO_SLOT;

        if let (Some(cside), Some(ckind)) = (captured.side(), captured.kind()) {
            captured_slot = self.slots[dst.index()];
            if let Some(relocated) = self.pieces[cside.index()].swap_remove(captured_slot) {
                self.slots[relocated.index()] = captured_slot;
            }
            self.toggle_hash(dst, captured);
            self.material[cside.index()] -= pst::piece_value(cside, ckind, dst);
        }

        if let (Some(side), Some(kind)) = (piece.side(), piece.kind()) {
            let slot = self.slots[src.index()];
            self.squares[src.index()] = Piece::EMPTY;
            self.squares[dst.index()] = piece;
            self.slots[src.index()] = NO_SLOT;
            self.slots[dst.index()] = slot;
            self.pieces[side.index()].set(slot, dst);
            self.toggle_hash(src, piece);
            self.toggle_hash(dst, piece);
            self.material[side.index()] +=
                pst::piece_value(side, kind, dst) - pst::piece_value(side, kind, src);
        }

        (captured, captured_slot)
    }

    /// Exact inverse of `move_piece`, restoring piece-list order as well.
    fn undo_move_piece(&mut self, mv: Move, captured: Piece, captured_slot: u8) {
        let src = mv.src();
        let dst = mv.dst();
        let piece = self.squares[dst.index()];

        if let (Some(side), Some(kind)) = (piece.side(), piece.kind()) {
            let slot = self.slots[dst.index()];
            self.squares[dst.index()] = Piece::EMPTY;
            self.squares[src.index()] = piece;
            self.slots[dst.index()] = NO_SLOT;
            self.slots[src.index()] = slot;
            self.pieces[side.index()].set(slot, src);
            self.toggle_hash(dst, piece);
            self.toggle_hash(src, piece);
            self.material[side.index()] +=
                pst::piece_value(side, kind, src) - pst::piece_value(side, kind, dst);
        }

        if let (Some(cside), Some(ckind)) = (captured.side(), captured.kind()) {
            let list = &mut self.pieces[cside.index()];
            if let Some(relocated) = list.reinsert(captured_slot, dst) {
                self.slots[relocated.index()] = (list.len() - 1) as u8;
            }
            self.squares[dst.index()] = captured;
            self.slots[dst.index()] = captured_slot;
            self.toggle_hash(dst, captured);
            self.material[cside.index()] += pst::piece_value(cside, ckind, dst);
        }
    }

    /// Apply `mv` for the side to move.
    ///
    /// Returns `false` and leaves the position untouched when the move would
    /// leave the mover's own General attacked (this includes facing the enemy
    /// General on an open file), or when `mv` does not move one of the side
    /// to move's pieces onto a non-friendly square.
    pub fn make_move(&mut self, mv: Move) -> bool {
        let src = mv.src();
        let dst = mv.dst();
        if mv.is_null()
            || !src.is_on_board()
            || !dst.is_on_board()
            || !self.squares[src.index()].belongs_to(self.side)
            || self.squares[dst.index()].belongs_to(self.side)
        {
            return false;
        }

        let key = self.key;
        let lock = self.lock;
        let (captured, captured_slot) = self.move_piece(mv);
        if self.checked() {
            self.undo_move_piece(mv, captured, captured_slot);
            return false;
        }

        self.toggle_side();
        let checking = self.checked();
        self.history.push(HistoryEntry {
            mv,
            captured,
            captured_slot,
            key,
            lock,
            checking,
        });
        self.distance += 1;
        true
    }

    /// Take back the last move and return it.
    ///
    /// # Panics
    /// Panics when the history is empty; callers must only undo moves they made.
    pub fn undo_make_move(&mut self) -> Move {
        match self.try_undo_make_move() {
            Some(mv) => mv,
            None => panic!("undo_make_move called with empty move history"),
        }
    }

    /// Take back the last move, or return `None` when there is nothing to undo.
    pub fn try_undo_make_move(&mut self) -> Option<Move> {
        let entry = self.history.pop()?;
        self.distance = self.distance.saturating_sub(1);
        self.side = self.side.opponent();
        if !entry.mv.is_null() {
            self.undo_move_piece(entry.mv, entry.captured, entry.captured_slot);
        }
        self.key = entry.key;
        self.lock = entry.lock;
        Some(entry.mv)
    }

    /// Pass the turn. Used by null-move pruning only.
    pub(crate) fn null_move(&mut self) {
        self.history.push(HistoryEntry {
            mv: Move::NULL,
            captured: Piece::EMPTY,
            captured_slot: NO_SLOT,
            key: self.key,
            lock: self.lock,
            checking: false,
        });
        self.toggle_side();
        self.distance += 1;
    }

    pub(crate) fn undo_null_move(&mut self) {
        self.try_undo_make_move();
    }
}
