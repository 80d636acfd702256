//! Game configuration: engine strength, who the computer plays and the
//! startup position.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::{Side, DEFAULT_HASH_LEVEL, LIMIT_DEPTH};

/// Engine strength, expressed as thinking time per move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Difficulty {
    #[default]
    Beginner,
    Amateur,
    Professional,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Beginner, Difficulty::Amateur, Difficulty::Professional];

    #[must_use]
    pub const fn level(self) -> u32 {
        match self {
            Difficulty::Beginner => 0,
            Difficulty::Amateur => 1,
            Difficulty::Professional => 2,
        }
    }

    #[must_use]
    pub fn from_level(level: u32) -> Option<Self> {
        Self::ALL.get(level as usize).copied()
    }

    /// Thinking time per move: 10, 100 or 1000 ms.
    #[must_use]
    pub const fn think_millis(self) -> u64 {
        10u64.pow(self.level() + 1)
    }
}

/// Material the engine gives away at the start of the game. The handicap
/// always comes off Red's side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Handicap {
    #[default]
    None,
    LeftHorse,
    TwoHorses,
    NinePieces,
}

impl Handicap {
    pub const ALL: [Handicap; 4] = [
        Handicap::None,
        Handicap::LeftHorse,
        Handicap::TwoHorses,
        Handicap::NinePieces,
    ];

    #[must_use]
    pub const fn fen(self) -> &'static str {
        match self {
            Handicap::None => "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w",
            Handicap::LeftHorse => "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKAB1R w",
            Handicap::TwoHorses => "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/R1BAKAB1R w",
            Handicap::NinePieces => "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/9/1C5C1/9/RN2K2NR w",
        }
    }
}

impl FromStr for Handicap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Handicap::None),
            "left-horse" | "horse" => Ok(Handicap::LeftHorse),
            "two-horses" | "horses" => Ok(Handicap::TwoHorses),
            "nine-pieces" | "nine" => Ok(Handicap::NinePieces),
            other => Err(format!("unknown handicap '{other}'")),
        }
    }
}

/// How a game ended, or that it has not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameResult {
    #[default]
    InProgress,
    Win {
        winner: Side,
        reason: WinReason,
    },
    Draw(DrawReason),
}

impl GameResult {
    #[must_use]
    pub fn is_over(self) -> bool {
        self != GameResult::InProgress
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WinReason {
    /// The loser has no legal move.
    Mate,
    /// The loser repeated by perpetual check or perpetual chase.
    BannedRepetition,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DrawReason {
    /// Threefold repetition with no side at fault.
    Repetition,
    /// Neither side has a Horse, Rook, Cannon or Soldier left.
    NoAttackingMaterial,
    /// A hundred plies without a capture.
    MoveLimit,
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::InProgress => write!(f, "in progress"),
            GameResult::Win { winner, reason } => {
                let how = match reason {
                    WinReason::Mate => "mate",
                    WinReason::BannedRepetition => "perpetual check or chase",
                };
                write!(f, "{winner} wins by {how}")
            }
            GameResult::Draw(reason) => {
                let why = match reason {
                    DrawReason::Repetition => "repetition",
                    DrawReason::NoAttackingMaterial => "no attacking material",
                    DrawReason::MoveLimit => "move limit",
                };
                write!(f, "draw by {why}")
            }
        }
    }
}

/// Settings for a [`Game`](super::Game).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameConfig {
    /// Transposition table level; 0 disables the engine entirely.
    pub hash_level: u32,
    pub difficulty: Difficulty,
    /// Overrides the difficulty's thinking time when set.
    pub think_millis: Option<u64>,
    pub max_depth: u32,
    /// Side played by the engine, `None` for two human players.
    pub computer: Option<Side>,
    pub startup: Handicap,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            hash_level: DEFAULT_HASH_LEVEL,
            difficulty: Difficulty::default(),
            think_millis: None,
            max_depth: LIMIT_DEPTH as u32,
            computer: Some(Side::Black),
            startup: Handicap::None,
        }
    }
}

impl GameConfig {
    /// Thinking time per engine move.
    #[must_use]
    pub fn think_millis(&self) -> u64 {
        self.think_millis.unwrap_or_else(|| self.difficulty.think_millis())
    }
}
