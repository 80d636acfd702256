//! ICCS move notation.
//!
//! ICCS names a square by its file letter `a`-`i` (left to right from Red's
//! side) and rank digit `0`-`9` (Red's back rank is `0`). A move is the source
//! square followed by the destination, e.g. `H2E2` for the opening central
//! cannon. The parser also accepts lower case and the hyphenated `H2-E2` form.

use super::error::MoveParseError;
use super::{Move, Position, Square};

/// Render `mv` as a four character upper-case ICCS string.
///
/// The null move renders as `0000`.
#[must_use]
pub fn move_to_iccs(mv: Move) -> String {
    if mv.is_null() {
        return "0000".to_string();
    }
    mv.to_string().to_ascii_uppercase()
}

/// Parse an ICCS string into a move without consulting any position.
pub fn parse_iccs(notation: &str) -> Result<Move, MoveParseError> {
    let compact: String = match notation.len() {
        4 => notation.to_string(),
        5 if notation.as_bytes()[2] == b'-' => notation.chars().filter(|&c| c != '-').collect(),
        len => return Err(MoveParseError::InvalidLength { len }),
    };
    if !compact.is_ascii() {
        return Err(MoveParseError::InvalidSquare {
            notation: notation.to_string(),
        });
    }

    let invalid = |_| MoveParseError::InvalidSquare {
        notation: notation.to_string(),
    };
    let src: Square = compact[..2].parse().map_err(invalid)?;
    let dst: Square = compact[2..].parse().map_err(invalid)?;
    Ok(Move::new(src, dst))
}

impl Position {
    /// Parse an ICCS move and check it is legal for the side to move.
    pub fn parse_move(&self, notation: &str) -> Result<Move, MoveParseError> {
        let mv = parse_iccs(notation)?;
        if self.legal_move(mv) {
            Ok(mv)
        } else {
            Err(MoveParseError::IllegalMove {
                notation: notation.to_string(),
            })
        }
    }
}
