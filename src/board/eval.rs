//! Static evaluation and the score scale shared with search.
//!
//! Scores are from the side to move's point of view. Material evaluation
//! stays far below `WIN_VALUE`, so any score beyond it is a forced result.

use super::Position;

/// Score of being mated right now.
pub const MATE_VALUE: i32 = 10000;
/// Score of losing by a banned repetition (perpetual check or chase).
pub const BAN_VALUE: i32 = MATE_VALUE - 100;
/// Scores beyond this are forced wins or losses.
pub const WIN_VALUE: i32 = MATE_VALUE - 200;
/// Magnitude of a repetition draw score.
pub const DRAW_VALUE: i32 = 20;
/// Bonus for having the move.
pub const ADVANCED_VALUE: i32 = 3;
/// Deepest ply counted from the search root.
pub const LIMIT_DEPTH: usize = 64;

impl Position {
    /// Material plus placement for the side to move minus the opponent's.
    ///
    /// Never returns exactly the draw value, so a real evaluation cannot be
    /// mistaken for a repetition draw.
    #[must_use]
    pub fn evaluate(&self) -> i32 {
        let us = self.side.index();
        let them = self.side.opponent().index();
        let vl = self.material[us] - self.material[them] + ADVANCED_VALUE;
        if vl == self.draw_value() {
            vl - 1
        } else {
            vl
        }
    }

    #[inline]
    fn clamped_distance(&self) -> i32 {
        self.distance.min(LIMIT_DEPTH) as i32
    }

    /// Score of the side to move being mated at the current distance.
    #[must_use]
    pub fn mate_value(&self) -> i32 {
        self.clamped_distance() - MATE_VALUE
    }

    /// Score of the side to move losing by a banned repetition.
    #[must_use]
    pub fn ban_value(&self) -> i32 {
        self.clamped_distance() - BAN_VALUE
    }

    /// Repetition draw score; alternates sign with distance so neither side
    /// is drawn to steer for it.
    #[must_use]
    pub fn draw_value(&self) -> i32 {
        if self.distance & 1 == 0 {
            -DRAW_VALUE
        } else {
            DRAW_VALUE
        }
    }

    /// Whether the side to move owns more than `margin` of material, the
    /// gate for null-move pruning and for skipping its verification search.
    pub(crate) fn own_material_exceeds(&self, margin: i32) -> bool {
        self.material[self.side.index()] > margin
    }

    /// Plies made since the search root.
    #[must_use]
    pub fn distance(&self) -> usize {
        self.distance
    }
}
