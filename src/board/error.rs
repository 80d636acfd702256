//! Error types for board operations.

use std::fmt;

use super::types::{PieceKind, Side, Square};

/// Error type for FEN parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// FEN string has no board field
    EmptyBoard,
    /// Board field does not have exactly 10 ranks
    WrongRankCount { found: usize },
    /// Too many files in a rank
    RankTooLong { rank: usize, files: usize },
    /// Too few files in a rank
    RankTooShort { rank: usize, files: usize },
    /// Invalid piece character in position string
    InvalidPiece { char: char },
    /// Invalid side to move (must be 'w'/'r' or 'b')
    InvalidSideToMove { found: String },
    /// More pieces of one kind than a side can own
    PieceCount {
        piece: PieceKind,
        side: Side,
        count: usize,
        max: usize,
    },
    /// A side has no General
    MissingGeneral { side: Side },
    /// A General, Advisor or Elephant stands where it can never move to
    PieceOutsideZone { piece: PieceKind, square: Square },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::EmptyBoard => write!(f, "FEN has no board field"),
            FenError::WrongRankCount { found } => {
                write!(f, "FEN must have 10 ranks, found {found}")
            }
            FenError::RankTooLong { rank, files } => {
                write!(f, "Too many files ({files}) in rank {rank}")
            }
            FenError::RankTooShort { rank, files } => {
                write!(f, "Too few files ({files}) in rank {rank}")
            }
            FenError::InvalidPiece { char } => {
                write!(f, "Invalid piece character '{char}' in FEN")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "Invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::PieceCount {
                piece,
                side,
                count,
                max,
            } => {
                write!(f, "{side} has {count} {piece:?} pieces, at most {max} allowed")
            }
            FenError::MissingGeneral { side } => write!(f, "{side} has no general"),
            FenError::PieceOutsideZone { piece, square } => {
                write!(f, "{piece:?} cannot stand on {square}")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Error type for move parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Move string has invalid length (must be 4 characters, or 5 with a hyphen)
    InvalidLength { len: usize },
    /// Invalid square notation in move
    InvalidSquare { notation: String },
    /// Move is not legal in the current position
    IllegalMove { notation: String },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { len } => {
                write!(f, "Move must be 4 characters, found {len}")
            }
            MoveParseError::InvalidSquare { notation } => {
                write!(f, "Invalid square notation in '{notation}'")
            }
            MoveParseError::IllegalMove { notation } => {
                write!(f, "Illegal move '{notation}'")
            }
        }
    }
}

impl std::error::Error for MoveParseError {}

/// Error type for square parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Rank out of bounds (must be 0-9)
    RankOutOfBounds { rank: usize },
    /// File out of bounds (must be a-i)
    FileOutOfBounds { file: usize },
    /// Invalid coordinate notation
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::RankOutOfBounds { rank } => {
                write!(f, "Rank {rank} out of bounds (must be 0-9)")
            }
            SquareError::FileOutOfBounds { file } => {
                write!(f, "File {file} out of bounds (must be 0-8)")
            }
            SquareError::InvalidNotation { notation } => {
                write!(f, "Invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}
