//! Repetition detection and perpetual check / perpetual chase adjudication.
//!
//! A repetition is only looked for across reversible history: the backward
//! scan stops at the first capture or null move. Perpetual check outranks
//! perpetual chase; when both sides commit the same offence the cycle is a
//! plain draw.

use log::trace;

use super::movegen::{pseudo_legal, square_attacked};
use super::{Move, Piece, PieceKind, Position, Side, Square};

/// Encoded result of [`Position::rep_status`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RepStatus(u8);

impl RepStatus {
    pub const NONE: RepStatus = RepStatus(0);

    const REPETITION: u8 = 1;
    const SELF_CHECK: u8 = 2;
    const OPP_CHECK: u8 = 4;
    const SELF_CHASE: u8 = 8;
    const OPP_CHASE: u8 = 16;

    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_repetition(self) -> bool {
        self.0 & Self::REPETITION != 0
    }

    /// The side to move checked on every one of its moves in the cycle.
    #[must_use]
    pub const fn self_perpetual_check(self) -> bool {
        self.0 & Self::SELF_CHECK != 0
    }

    #[must_use]
    pub const fn opp_perpetual_check(self) -> bool {
        self.0 & Self::OPP_CHECK != 0
    }

    /// The side to move chased one piece on every one of its moves.
    #[must_use]
    pub const fn self_perpetual_chase(self) -> bool {
        self.0 & Self::SELF_CHASE != 0
    }

    #[must_use]
    pub const fn opp_perpetual_chase(self) -> bool {
        self.0 & Self::OPP_CHASE != 0
    }
}

/// Rough worth used to decide whether a threatened piece is chased
/// regardless of protection. Indexed by `PieceKind::index`.
const CHASE_VALUE: [i32; 7] = [100, 2, 2, 4, 9, 4, 1];

impl Position {
    /// Scan the reversible history for `max_repeats` returns of the current
    /// position with the same side to move, and classify the cycle.
    ///
    /// Takes `&mut self` because chase detection replays the cycle; the
    /// position is fully restored before returning.
    pub fn rep_status(&mut self, max_repeats: u32) -> RepStatus {
        let mut recur = max_repeats.max(1);
        let mut self_side = false;
        let mut perp_check = true;
        let mut opp_perp_check = true;
        let mut cycle_len = None;

        for (back, entry) in self.history.iter().rev().enumerate() {
            if entry.mv.is_null() || !entry.captured.is_empty() {
                break;
            }
            if self_side {
                perp_check &= entry.checking;
                if entry.key == self.key && entry.lock == self.lock {
                    recur -= 1;
                    if recur == 0 {
                        cycle_len = Some(back + 1);
                        break;
                    }
                }
            } else {
                opp_perp_check &= entry.checking;
            }
            self_side = !self_side;
        }

        let Some(cycle_len) = cycle_len else {
            return RepStatus::NONE;
        };

        let mut bits = RepStatus::REPETITION;
        if perp_check {
            bits |= RepStatus::SELF_CHECK;
        }
        if opp_perp_check {
            bits |= RepStatus::OPP_CHECK;
        }
        if !perp_check && !opp_perp_check {
            bits |= self.chase_bits(cycle_len);
        }
        trace!("repetition over {cycle_len} plies, status {bits:#07b}");
        RepStatus(bits)
    }

    /// Map a repetition status to a score for the side to move.
    ///
    /// A side guilty of perpetual check loses; failing that a side guilty of
    /// perpetual chase loses; anything else is a draw.
    #[must_use]
    pub fn rep_value(&self, status: RepStatus) -> i32 {
        let ban = self.ban_value();
        let check = if status.self_perpetual_check() { ban } else { 0 }
            + if status.opp_perpetual_check() { -ban } else { 0 };
        if check != 0 {
            return check;
        }
        let chase = if status.self_perpetual_chase() { ban } else { 0 }
            + if status.opp_perpetual_chase() { -ban } else { 0 };
        if chase != 0 {
            return chase;
        }
        self.draw_value()
    }

    /// Replay the last `cycle_len` plies and report which sides chased the
    /// same enemy piece on every one of their moves.
    fn chase_bits(&mut self, cycle_len: usize) -> u8 {
        let distance = self.distance;
        let us = self.side;

        let mut replay: Vec<Move> = Vec::with_capacity(cycle_len);
        for _ in 0..cycle_len {
            match self.try_undo_make_move() {
                Some(mv) => replay.push(mv),
                None => break,
            }
        }

        // Targets are identified by piece-list slot, which is stable while no
        // capture happens.
        let mut targets = [u16::MAX, u16::MAX];
        while let Some(mv) = replay.pop() {
            let mover = self.side;
            let replayed = self.make_move(mv);
            debug_assert!(replayed, "replayed move {mv} was rejected");
            targets[mover.index()] &= self.chased_targets(mv.dst(), mover);
        }
        self.distance = distance;

        let mut bits = 0;
        if targets[us.index()] != 0 {
            bits |= RepStatus::SELF_CHASE;
        }
        if targets[us.opponent().index()] != 0 {
            bits |= RepStatus::OPP_CHASE;
        }
        bits
    }

    /// Piece-list slots of enemy pieces that the piece on `from` chases: it
    /// could capture them, and they are either worth more than it or
    /// undefended against the capture.
    fn chased_targets(&self, from: Square, mover: Side) -> u16 {
        let Some(attacker) = self.piece_at(from).kind() else {
            return 0;
        };
        let enemy = mover.opponent();
        let mut mask = 0u16;
        for (slot, sq) in self.pieces[enemy.index()].iter().enumerate() {
            let Some(kind) = self.piece_at(sq).kind() else {
                continue;
            };
            let chaseable = match kind {
                PieceKind::General => false,
                PieceKind::Soldier => sq.across_river(enemy),
                _ => true,
            };
            if !chaseable || !pseudo_legal(&self.squares, mover, Move::new(from, sq)) {
                continue;
            }
            if CHASE_VALUE[kind.index()] > CHASE_VALUE[attacker.index()] || !self.defended_after_capture(from, sq, enemy) {
                mask |= 1 << slot;
            }
        }
        mask
    }

    /// Whether `defender` could recapture on `to` after the piece on `from` takes there.
    fn defended_after_capture(&self, from: Square, to: Square, defender: Side) -> bool {
        let mut scratch = self.squares;
        scratch[to.index()] = scratch[from.index()];
        scratch[from.index()] = Piece::EMPTY;
        square_attacked(&scratch, to, defender)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_of(bits: u8) -> i32 {
        Position::new().rep_value(RepStatus(bits))
    }

    #[test]
    fn check_outranks_chase() {
        let pos = Position::new();
        let ban = pos.ban_value();
        assert_eq!(value_of(RepStatus::REPETITION | RepStatus::SELF_CHECK | RepStatus::OPP_CHASE), ban);
        assert_eq!(value_of(RepStatus::REPETITION | RepStatus::OPP_CHECK | RepStatus::SELF_CHASE), -ban);
    }

    #[test]
    fn mutual_offences_cancel() {
        let draw = Position::new().draw_value();
        assert_eq!(value_of(RepStatus::REPETITION | RepStatus::SELF_CHECK | RepStatus::OPP_CHECK), draw);
        assert_eq!(value_of(RepStatus::REPETITION | RepStatus::SELF_CHASE | RepStatus::OPP_CHASE), draw);
        assert_eq!(value_of(RepStatus::REPETITION), draw);
    }
}
