use super::super::{Position, Side, Square};
use super::{MoveSink, KING_DELTA};

impl Position {
    /// Rook: slide until the first occupied square, capturing it if hostile.
    pub(super) fn generate_rook_moves(&self, src: Square, side: Side, sink: &mut MoveSink) {
        for delta in KING_DELTA {
            let mut dst = src.offset(delta);
            while dst.is_on_board() {
                let target = self.piece_at(dst);
                sink.add(src, dst, target, side);
                if !target.is_empty() {
                    break;
                }
                dst = dst.offset(delta);
            }
        }
    }

    /// Cannon: slide like a rook onto empty squares, but capture only by
    /// jumping exactly one screen.
    pub(super) fn generate_cannon_moves(&self, src: Square, side: Side, sink: &mut MoveSink) {
        for delta in KING_DELTA {
            let mut dst = src.offset(delta);
            while dst.is_on_board() && self.piece_at(dst).is_empty() {
                sink.add(src, dst, self.piece_at(dst), side);
                dst = dst.offset(delta);
            }
            if !dst.is_on_board() {
                continue;
            }
            dst = dst.offset(delta);
            while dst.is_on_board() {
                let target = self.piece_at(dst);
                if !target.is_empty() {
                    sink.add(src, dst, target, side);
                    break;
                }
                dst = dst.offset(delta);
            }
        }
    }
}
