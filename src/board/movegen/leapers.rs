use super::super::{PieceKind, Position, Side, Square};
use super::{MoveSink, ADVISOR_DELTA, KING_DELTA, KNIGHT_DELTA};

impl Position {
    /// General: one orthogonal step inside the palace.
    pub(super) fn generate_general_moves(&self, src: Square, side: Side, sink: &mut MoveSink) {
        for delta in KING_DELTA {
            let dst = src.offset(delta);
            if dst.in_palace() {
                sink.add(src, dst, self.piece_at(dst), side);
            }
        }
    }

    /// Advisor: one diagonal step inside the palace.
    pub(super) fn generate_advisor_moves(&self, src: Square, side: Side, sink: &mut MoveSink) {
        for delta in ADVISOR_DELTA {
            let dst = src.offset(delta);
            if dst.in_palace() {
                sink.add(src, dst, self.piece_at(dst), side);
            }
        }
    }

    /// Elephant: two diagonal steps on its own half, blocked by a piece on the eye.
    pub(super) fn generate_elephant_moves(&self, src: Square, side: Side, sink: &mut MoveSink) {
        for delta in ADVISOR_DELTA {
            let eye = src.offset(delta);
            if !eye.is_on_board() || !self.piece_at(eye).is_empty() {
                continue;
            }
            let dst = eye.offset(delta);
            if dst.is_on_board() && dst.on_home_half(side) {
                sink.add(src, dst, self.piece_at(dst), side);
            }
        }
    }

    /// Horse: one orthogonal step then one diagonal step outwards. A piece on
    /// the orthogonal step hobbles both jumps in that direction.
    pub(super) fn generate_horse_moves(&self, src: Square, side: Side, sink: &mut MoveSink) {
        for (pin_delta, jumps) in KING_DELTA.iter().zip(KNIGHT_DELTA.iter()) {
            if !self.piece_at(src.offset(*pin_delta)).is_empty() {
                continue;
            }
            for &delta in jumps {
                let dst = src.offset(delta);
                if dst.is_on_board() {
                    sink.add(src, dst, self.piece_at(dst), side);
                }
            }
        }
    }

    /// Soldier: forward one step; sideways too once across the river.
    pub(super) fn generate_soldier_moves(&self, src: Square, side: Side, sink: &mut MoveSink) {
        let ahead = src.forward(side);
        if ahead.is_on_board() {
            sink.add(src, ahead, self.piece_at(ahead), side);
        }
        if src.across_river(side) {
            for delta in [-1, 1] {
                let dst = src.offset(delta);
                if dst.is_on_board() {
                    sink.add(src, dst, self.piece_at(dst), side);
                }
            }
        }
    }

    pub(super) fn generate_piece_moves(&self, kind: PieceKind, src: Square, side: Side, sink: &mut MoveSink) {
        match kind {
            PieceKind::General => self.generate_general_moves(src, side, sink),
            PieceKind::Advisor => self.generate_advisor_moves(src, side, sink),
            PieceKind::Elephant => self.generate_elephant_moves(src, side, sink),
            PieceKind::Horse => self.generate_horse_moves(src, side, sink),
            PieceKind::Rook => self.generate_rook_moves(src, side, sink),
            PieceKind::Cannon => self.generate_cannon_moves(src, side, sink),
            PieceKind::Soldier => self.generate_soldier_moves(src, side, sink),
        }
    }
}
