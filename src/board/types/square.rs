//! Square types and board geometry.
//!
//! The 9x10 board is embedded in a 16x16 grid so that every piece delta
//! stays inside a single byte and off-board cells act as a sentinel border.
//! Playable cells occupy rows 3..=12 and columns 3..=11; row 3 is Black's
//! back rank, row 12 is Red's.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::error::SquareError;

use super::piece::Side;

pub(crate) const RANK_TOP: u8 = 3;
pub(crate) const RANK_BOTTOM: u8 = 12;
pub(crate) const FILE_LEFT: u8 = 3;
pub(crate) const FILE_RIGHT: u8 = 11;

/// Number of cells in the padded grid.
pub const BOARD_CELLS: usize = 256;

/// A cell of the padded 16x16 grid.
///
/// Only cells inside the 9x10 window are playable; every other index,
/// including [`Square::NONE`], is permanently off the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Square(u8);

impl Square {
    /// The off-board marker produced when decoding the null move.
    pub const NONE: Square = Square(0);

    /// Build a square from a file (0 = a) and a rank (0 = Red's back rank).
    #[must_use]
    pub const fn new(file: usize, rank: usize) -> Option<Self> {
        if file < 9 && rank < 10 {
            let y = RANK_BOTTOM as usize - rank;
            let x = FILE_LEFT as usize + file;
            Some(Square((y * 16 + x) as u8))
        } else {
            None
        }
    }

    /// Wrap a raw grid index. The result may be off the board.
    #[inline]
    #[must_use]
    pub const fn from_index(idx: usize) -> Self {
        Square((idx & 0xFF) as u8)
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub(crate) const fn x(self) -> u8 {
        self.0 & 15
    }

    #[inline]
    pub(crate) const fn y(self) -> u8 {
        self.0 >> 4
    }

    /// True for the 90 playable cells.
    #[inline]
    #[must_use]
    pub const fn is_on_board(self) -> bool {
        let x = self.x();
        let y = self.y();
        x >= FILE_LEFT && x <= FILE_RIGHT && y >= RANK_TOP && y <= RANK_BOTTOM
    }

    /// True inside either 3x3 palace.
    #[inline]
    #[must_use]
    pub const fn in_palace(self) -> bool {
        let x = self.x();
        let y = self.y();
        x >= 6 && x <= 8 && ((y >= 3 && y <= 5) || (y >= 10 && y <= 12))
    }

    /// File index, 0 = a (Red's left).
    #[inline]
    #[must_use]
    pub const fn file(self) -> usize {
        (self.x() - FILE_LEFT) as usize
    }

    /// Rank index, 0 = Red's back rank.
    #[inline]
    #[must_use]
    pub const fn rank(self) -> usize {
        (RANK_BOTTOM - self.y()) as usize
    }

    /// Whether the square lies on `side`'s own half of the river.
    #[inline]
    #[must_use]
    pub const fn on_home_half(self, side: Side) -> bool {
        (self.0 & 0x80 != 0) == matches!(side, Side::Red)
    }

    /// Whether `side` has crossed the river on this square.
    #[inline]
    #[must_use]
    pub const fn across_river(self, side: Side) -> bool {
        !self.on_home_half(side)
    }

    /// One step towards the enemy for `side`.
    #[inline]
    #[must_use]
    pub const fn forward(self, side: Side) -> Self {
        match side {
            Side::Red => Square(self.0.wrapping_sub(16)),
            Side::Black => Square(self.0.wrapping_add(16)),
        }
    }

    /// Rotate the board by 180 degrees.
    #[inline]
    #[must_use]
    pub const fn flip(self) -> Self {
        Square(254u8.wrapping_sub(self.0))
    }

    #[inline]
    pub(crate) const fn offset(self, delta: i16) -> Self {
        Square((self.0 as i16 + delta) as u8)
    }

    #[inline]
    pub(crate) const fn same_rank(self, other: Square) -> bool {
        self.0 >> 4 == other.0 >> 4
    }

    #[inline]
    pub(crate) const fn same_file(self, other: Square) -> bool {
        self.0 & 15 == other.0 & 15
    }

    /// Iterate over the 90 playable squares, Black's back rank first.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_CELLS).map(Square::from_index).filter(|sq| sq.is_on_board())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_on_board() {
            return write!(f, "--");
        }
        let file = (b'a' + self.file() as u8) as char;
        let rank = (b'0' + self.rank() as u8) as char;
        write!(f, "{file}{rank}")
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({self}/{:#04x})", self.0)
    }
}

impl FromStr for Square {
    type Err = SquareError;

    /// Parse ICCS coordinates such as `e0` or `h9`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(SquareError::InvalidNotation {
                notation: s.to_string(),
            });
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'i').contains(&file) {
            return Err(SquareError::FileOutOfBounds {
                file: file.wrapping_sub(b'a') as usize,
            });
        }
        if !rank.is_ascii_digit() {
            return Err(SquareError::InvalidNotation {
                notation: s.to_string(),
            });
        }
        Square::new((file - b'a') as usize, (rank - b'0') as usize).ok_or(
            SquareError::RankOutOfBounds {
                rank: (rank - b'0') as usize,
            },
        )
    }
}
