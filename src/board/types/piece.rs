//! Piece, piece-kind and side types.
//!
//! A [`Piece`] is the compact code stored in every board cell: zero for an
//! empty cell, otherwise a side tag (8 for Red, 16 for Black) or'ed with the
//! kind index 0..=6.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The two sides. Red moves first.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    Red,
    Black,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Red, Side::Black];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::Red => 0,
            Side::Black => 1,
        }
    }

    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Side {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
        }
    }

    /// Bit that marks a piece code as belonging to this side.
    #[inline]
    #[must_use]
    pub const fn tag(self) -> u8 {
        8 + ((self.index() as u8) << 3)
    }

    /// FEN side-to-move letter.
    #[must_use]
    pub const fn to_fen_char(self) -> char {
        match self {
            Side::Red => 'w',
            Side::Black => 'b',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Red => write!(f, "red"),
            Side::Black => write!(f, "black"),
        }
    }
}

/// Piece types in code order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PieceKind {
    General,
    Advisor,
    Elephant,
    Horse,
    Rook,
    Cannon,
    Soldier,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::General,
        PieceKind::Advisor,
        PieceKind::Elephant,
        PieceKind::Horse,
        PieceKind::Rook,
        PieceKind::Cannon,
        PieceKind::Soldier,
    ];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    #[must_use]
    pub const fn from_index(idx: usize) -> Option<PieceKind> {
        match idx {
            0 => Some(PieceKind::General),
            1 => Some(PieceKind::Advisor),
            2 => Some(PieceKind::Elephant),
            3 => Some(PieceKind::Horse),
            4 => Some(PieceKind::Rook),
            5 => Some(PieceKind::Cannon),
            6 => Some(PieceKind::Soldier),
            _ => None,
        }
    }

    /// Parse a FEN letter, either case. `b`/`e` and `n`/`h` are both accepted
    /// for the Elephant and Horse.
    #[must_use]
    pub fn from_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'k' => Some(PieceKind::General),
            'a' => Some(PieceKind::Advisor),
            'b' | 'e' => Some(PieceKind::Elephant),
            'n' | 'h' => Some(PieceKind::Horse),
            'r' => Some(PieceKind::Rook),
            'c' => Some(PieceKind::Cannon),
            'p' => Some(PieceKind::Soldier),
            _ => None,
        }
    }

    /// Lowercase FEN letter.
    #[inline]
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            PieceKind::General => 'k',
            PieceKind::Advisor => 'a',
            PieceKind::Elephant => 'b',
            PieceKind::Horse => 'n',
            PieceKind::Rook => 'r',
            PieceKind::Cannon => 'c',
            PieceKind::Soldier => 'p',
        }
    }

    /// Maximum number of this kind a side may own.
    #[must_use]
    pub const fn max_count(self) -> usize {
        match self {
            PieceKind::General => 1,
            PieceKind::Soldier => 5,
            _ => 2,
        }
    }

    /// Horse, Rook, Cannon and Soldier can deliver mate; the rest cannot.
    #[inline]
    #[must_use]
    pub const fn is_attacker(self) -> bool {
        (self as usize) > (PieceKind::Elephant as usize)
    }
}

/// Board cell contents.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Piece(u8);

impl Piece {
    pub const EMPTY: Piece = Piece(0);

    #[inline]
    #[must_use]
    pub const fn new(side: Side, kind: PieceKind) -> Self {
        Piece(side.tag() | kind as u8)
    }

    /// The raw code, 0 for empty, 8..=14 Red, 16..=22 Black.
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    #[must_use]
    pub const fn belongs_to(self, side: Side) -> bool {
        self.0 & side.tag() != 0
    }

    #[inline]
    #[must_use]
    pub const fn side(self) -> Option<Side> {
        if self.0 & 8 != 0 {
            Some(Side::Red)
        } else if self.0 & 16 != 0 {
            Some(Side::Black)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub const fn kind(self) -> Option<PieceKind> {
        if self.0 == 0 {
            None
        } else {
            PieceKind::from_index((self.0 & 7) as usize)
        }
    }

    #[inline]
    pub(crate) const fn is(self, side: Side, kind: PieceKind) -> bool {
        self.0 == side.tag() | kind as u8
    }

    /// Dense index 0..14 used by the hash and history tables.
    #[inline]
    pub(crate) const fn table_index(self) -> usize {
        ((self.0 >> 4) * 7 + (self.0 & 7)) as usize
    }

    /// FEN letter: uppercase for Red, lowercase for Black.
    #[must_use]
    pub fn to_fen_char(self) -> Option<char> {
        let kind = self.kind()?;
        match self.side()? {
            Side::Red => Some(kind.to_char().to_ascii_uppercase()),
            Side::Black => Some(kind.to_char()),
        }
    }

    #[must_use]
    pub fn from_fen_char(c: char) -> Option<Self> {
        let kind = PieceKind::from_char(c)?;
        let side = if c.is_ascii_uppercase() {
            Side::Red
        } else {
            Side::Black
        };
        Some(Piece::new(side, kind))
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_fen_char() {
            Some(c) => write!(f, "Piece({c})"),
            None => write!(f, "Piece(-)"),
        }
    }
}
