//! Errors returned by [`Game`](super::Game) operations.

use std::fmt;

use crate::board::{FenError, Move};

/// Why a controller request was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The engine is thinking; the board must not be touched.
    Busy,
    /// The game has already been decided.
    GameOver,
    /// The startup position could not be parsed.
    InvalidFen(FenError),
    /// There is no move left to take back.
    NothingToRetract,
    /// The move is not legal for the side to move.
    IllegalMove { mv: Move },
    /// It is the engine's turn, not the human's.
    NotYourTurn,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Busy => write!(f, "Engine is thinking"),
            GameError::GameOver => write!(f, "Game is over"),
            GameError::InvalidFen(err) => write!(f, "Invalid startup position: {err}"),
            GameError::NothingToRetract => write!(f, "No move to retract"),
            GameError::IllegalMove { mv } => write!(f, "Illegal move {mv}"),
            GameError::NotYourTurn => write!(f, "It is the computer's turn"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::InvalidFen(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FenError> for GameError {
    fn from(err: FenError) -> Self {
        GameError::InvalidFen(err)
    }
}
