use std::str::FromStr;

use super::error::FenError;
use super::{Piece, PieceKind, Position, Side, Square};

/// Whether `kind` of `side` may legally stand on `sq`. Only the three
/// home-bound kinds have restricted zones.
fn in_home_zone(side: Side, kind: PieceKind, sq: Square) -> bool {
    let own_rank = match side {
        Side::Red => sq.rank(),
        Side::Black => 9 - sq.rank(),
    };
    let file = sq.file();
    match kind {
        PieceKind::General => sq.in_palace() && sq.on_home_half(side),
        PieceKind::Advisor => sq.in_palace() && sq.on_home_half(side) && (file + own_rank) % 2 == 1,
        PieceKind::Elephant => {
            own_rank <= 4 && own_rank % 2 == 0 && file % 2 == 0 && (file / 2 + own_rank / 2) % 2 == 1
        }
        _ => true,
    }
}

impl Position {
    /// Parse a board position from FEN notation.
    ///
    /// Only the board and side-to-move fields are read; any trailing fields
    /// are accepted and ignored. A missing side field means Red to move.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let mut parts = fen.split_whitespace();
        let board_field = parts.next().ok_or(FenError::EmptyBoard)?;

        let ranks: Vec<&str> = board_field.split('/').collect();
        if ranks.len() != 10 {
            return Err(FenError::WrongRankCount { found: ranks.len() });
        }

        let mut placed: Vec<(Square, Piece)> = Vec::with_capacity(32);
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 9 - rank_idx;
            let mut file = 0usize;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                } else {
                    let piece = Piece::from_fen_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                    let sq = Square::new(file, rank).ok_or(FenError::RankTooLong {
                        rank: rank_idx,
                        files: file + 1,
                    })?;
                    placed.push((sq, piece));
                    file += 1;
                }
                if file > 9 {
                    return Err(FenError::RankTooLong {
                        rank: rank_idx,
                        files: file,
                    });
                }
            }
            if file < 9 {
                return Err(FenError::RankTooShort {
                    rank: rank_idx,
                    files: file,
                });
            }
        }

        let side = match parts.next() {
            None | Some("w" | "r" | "W" | "R") => Side::Red,
            Some("b" | "B") => Side::Black,
            Some(other) => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        let mut counts = [[0usize; 7]; 2];
        for &(sq, piece) in &placed {
            let (Some(owner), Some(kind)) = (piece.side(), piece.kind()) else {
                continue;
            };
            if !in_home_zone(owner, kind, sq) {
                return Err(FenError::PieceOutsideZone { piece: kind, square: sq });
            }
            let count = &mut counts[owner.index()][kind.index()];
            *count += 1;
            if *count > kind.max_count() {
                return Err(FenError::PieceCount {
                    piece: kind,
                    side: owner,
                    count: *count,
                    max: kind.max_count(),
                });
            }
        }
        for owner in Side::BOTH {
            if counts[owner.index()][PieceKind::General.index()] == 0 {
                return Err(FenError::MissingGeneral { side: owner });
            }
        }

        let mut pos = Position::empty();
        for (sq, piece) in placed {
            pos.add_piece(sq, piece);
        }
        if side == Side::Black {
            pos.toggle_side();
        }
        Ok(pos)
    }

    /// Parse a board position from FEN notation.
    ///
    /// # Panics
    /// Panics if the FEN string is invalid. Use `try_from_fen` for fallible parsing.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        Self::try_from_fen(fen).expect("Invalid FEN string")
    }

    /// Board and side-to-move fields, the exact inverse of `try_from_fen`.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(10);
        for rank in (0..10).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..9 {
                let c = Square::new(file, rank).and_then(|sq| self.piece_at(sq).to_fen_char());
                if let Some(c) = c {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(c);
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        format!("{} {}", rows.join("/"), self.side.to_fen_char())
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::try_from_fen(s)
    }
}
