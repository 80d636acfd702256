mod attacks;
mod leapers;
mod sliders;

pub(crate) use attacks::{general_attacked, square_attacked};

use super::{Move, MoveList, Piece, PieceKind, Position, ScoredMoveList, Side, Square};

pub(crate) const KING_DELTA: [i16; 4] = [-16, -1, 1, 16];
pub(crate) const ADVISOR_DELTA: [i16; 4] = [-17, -15, 15, 17];
/// Horse jumps grouped by the `KING_DELTA` leg that can hobble them.
pub(crate) const KNIGHT_DELTA: [[i16; 2]; 4] = [[-33, -31], [-18, 14], [-14, 18], [31, 33]];
/// Reverse horse jumps grouped by the `ADVISOR_DELTA` cell that hobbles them.
pub(crate) const KNIGHT_CHECK_DELTA: [[i16; 2]; 4] = [[-33, -18], [-31, -14], [14, 31], [18, 33]];

/// Most valuable victim, indexed by `PieceKind::index`.
const MVV_VALUE: [i32; 7] = [50, 10, 10, 30, 40, 30, 20];
/// Least valuable attacker, indexed by `PieceKind::index`.
const LVA_VALUE: [i32; 7] = [5, 1, 1, 3, 4, 3, 2];

/// Collects generated moves, split into captures and quiet moves.
pub(crate) struct MoveSink {
    captures: MoveList,
    quiets: MoveList,
    captures_only: bool,
}

impl MoveSink {
    fn new(captures_only: bool) -> Self {
        MoveSink {
            captures: MoveList::new(),
            quiets: MoveList::new(),
            captures_only,
        }
    }

    #[inline]
    fn add(&mut self, src: Square, dst: Square, target: Piece, side: Side) {
        if target.is_empty() {
            if !self.captures_only {
                self.quiets.push(Move::new(src, dst));
            }
        } else if !target.belongs_to(side) {
            self.captures.push(Move::new(src, dst));
        }
    }
}

/// Pseudo-legal test for `mv` by `side` on a bare board, without movegen.
pub(crate) fn pseudo_legal(squares: &[Piece; super::BOARD_CELLS], side: Side, mv: Move) -> bool {
    let src = mv.src();
    let dst = mv.dst();
    if mv.is_null() || !src.is_on_board() || !dst.is_on_board() {
        return false;
    }
    let piece = squares[src.index()];
    if !piece.belongs_to(side) || squares[dst.index()].belongs_to(side) {
        return false;
    }
    let Some(kind) = piece.kind() else {
        return false;
    };
    let delta = dst.index() as i16 - src.index() as i16;
    match kind {
        PieceKind::General => dst.in_palace() && KING_DELTA.contains(&delta),
        PieceKind::Advisor => dst.in_palace() && ADVISOR_DELTA.contains(&delta),
        PieceKind::Elephant => {
            ADVISOR_DELTA.iter().any(|d| 2 * d == delta)
                && dst.on_home_half(side)
                && squares[src.offset(delta / 2).index()].is_empty()
        }
        PieceKind::Horse => KING_DELTA.iter().zip(KNIGHT_DELTA.iter()).any(|(pin, jumps)| {
            jumps.contains(&delta) && squares[src.offset(*pin).index()].is_empty()
        }),
        PieceKind::Rook | PieceKind::Cannon => {
            let step = if src.same_rank(dst) {
                delta.signum()
            } else if src.same_file(dst) {
                16 * delta.signum()
            } else {
                return false;
            };
            let mut between = 0;
            let mut cur = src.offset(step);
            while cur != dst {
                if !squares[cur.index()].is_empty() {
                    between += 1;
                }
                cur = cur.offset(step);
            }
            if kind == PieceKind::Rook || squares[dst.index()].is_empty() {
                between == 0
            } else {
                between == 1
            }
        }
        PieceKind::Soldier => {
            dst == src.forward(side) || (src.across_river(side) && (delta == 1 || delta == -1))
        }
    }
}

impl Position {
    fn collect_moves(&self, captures_only: bool) -> MoveSink {
        let mut sink = MoveSink::new(captures_only);
        let (pieces, len) = self.ordered_pieces(self.side);
        for &(kind, src) in &pieces[..len] {
            self.generate_piece_moves(kind, src, self.side, &mut sink);
        }
        sink
    }

    /// MVV-LVA score of a capture; zero for quiet moves.
    #[must_use]
    pub fn mvv_lva(&self, mv: Move) -> i32 {
        match (self.piece_at(mv.dst()).kind(), self.piece_at(mv.src()).kind()) {
            (Some(victim), Some(attacker)) => MVV_VALUE[victim.index()] - LVA_VALUE[attacker.index()],
            _ => 0,
        }
    }

    fn sort_captures(&self, captures: &MoveList) -> ScoredMoveList {
        let mut scored = ScoredMoveList::new();
        for &mv in captures {
            scored.push(mv, self.mvv_lva(mv));
        }
        scored.sort_by_score_desc();
        scored
    }

    /// Pseudo-legal moves for the side to move.
    ///
    /// Captures come first, best MVV-LVA first; then quiet moves. Within each
    /// group moves follow piece kind, then source square.
    #[must_use]
    pub fn generate_moves(&self) -> MoveList {
        let sink = self.collect_moves(false);
        let mut moves = MoveList::new();
        for scored in self.sort_captures(&sink.captures).iter() {
            moves.push(scored.mv);
        }
        for &mv in &sink.quiets {
            moves.push(mv);
        }
        moves
    }

    /// Pseudo-legal captures with their MVV-LVA scores, best first.
    #[must_use]
    pub fn generate_captures(&self) -> ScoredMoveList {
        let sink = self.collect_moves(true);
        self.sort_captures(&sink.captures)
    }

    /// Whether `mv` follows the movement rule of the piece on its source
    /// square, ignoring the safety of the mover's General.
    #[must_use]
    pub fn is_pseudo_legal(&self, mv: Move) -> bool {
        pseudo_legal(&self.squares, self.side, mv)
    }

    /// Whether playing `mv` keeps the mover's General safe. Tested on a
    /// scratch copy of the board so the position is never touched.
    fn keeps_general_safe(&self, mv: Move) -> bool {
        let mut scratch = self.squares;
        scratch[mv.dst().index()] = scratch[mv.src().index()];
        scratch[mv.src().index()] = Piece::EMPTY;
        !general_attacked(&scratch, self.side)
    }

    /// Whether `mv` is in the fully legal move list of the side to move.
    #[must_use]
    pub fn legal_move(&self, mv: Move) -> bool {
        self.is_pseudo_legal(mv) && self.keeps_general_safe(mv)
    }

    /// Legal moves for the side to move, in `generate_moves` order.
    #[must_use]
    pub fn legal_moves(&self) -> MoveList {
        let mut moves = self.generate_moves();
        moves.retain(|mv| self.keeps_general_safe(mv));
        moves
    }

    /// Whether the General of the side to move is attacked.
    pub(crate) fn checked(&self) -> bool {
        self.general_square(self.side)
            .is_some_and(|sq| square_attacked(&self.squares, sq, self.side.opponent()))
    }

    /// Whether the side to move is in check.
    #[must_use]
    pub fn in_check(&self) -> bool {
        self.checked()
    }

    /// Whether the side to move has no legal move. In Xiangqi this loses
    /// whether or not the side is in check.
    #[must_use]
    pub fn is_mate(&self) -> bool {
        let moves = self.generate_moves();
        !moves.iter().any(|&mv| self.keeps_general_safe(mv))
    }

    /// Count leaf nodes of the legal move tree to `depth`.
    pub fn perft(&mut self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.generate_moves();
        let mut nodes = 0;
        for mv in moves {
            if self.make_move(mv) {
                nodes += if depth == 1 { 1 } else { self.perft(depth - 1) };
                self.undo_make_move();
            }
        }
        nodes
    }
}
