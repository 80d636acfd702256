//! Transposition table for caching search results.
//!
//! Entries are addressed by the position key and verified against the
//! independent lock hash, so a probe only returns data stored for the same
//! position. The table belongs to one search engine and is never shared.

use log::trace;

use crate::board::Move;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundType {
    Exact,      // Score is the exact value
    LowerBound, // Score is at least this value (failed high - score >= beta)
    UpperBound, // Score is at most this value (failed low - score <= alpha)
}

impl BoundType {
    fn to_u8(self) -> u8 {
        match self {
            BoundType::Exact => 0,
            BoundType::LowerBound => 1,
            BoundType::UpperBound => 2,
        }
    }

    fn from_u8(v: u8) -> Self {
        match v & 0x3 {
            0 => BoundType::Exact,
            1 => BoundType::LowerBound,
            _ => BoundType::UpperBound,
        }
    }
}

/// Unpacked TT entry for reading
#[derive(Clone, Debug)]
pub struct TTEntry {
    pub depth: u8,
    pub score: i16,
    pub bound_type: BoundType,
    pub best_move: Move,
    pub generation: u8,
}

impl TTEntry {
    pub fn depth(&self) -> i32 {
        i32::from(self.depth)
    }

    pub fn score(&self) -> i32 {
        i32::from(self.score)
    }

    pub fn bound_type(&self) -> BoundType {
        self.bound_type
    }

    /// Stored best move, `None` when the entry only carries a bound.
    pub fn best_move(&self) -> Option<Move> {
        (!self.best_move.is_null()).then_some(self.best_move)
    }
}

/// Packed entry format:
/// - bits 0-15:  move (u16, 0 = no move)
/// - bits 16-31: score (i16 as u16)
/// - bits 32-39: depth (u8)
/// - bits 40-47: bound (2 bits) + generation (6 bits)
fn pack_entry(depth: u8, score: i16, bound_type: BoundType, best_move: Move, generation: u8) -> u64 {
    let mv = u64::from(best_move.as_u16());
    let sc = u64::from(score as u16);
    let bound_gen = (bound_type.to_u8() & 0x3) | ((generation & 0x3F) << 2);

    mv | (sc << 16) | (u64::from(depth) << 32) | (u64::from(bound_gen) << 40)
}

fn unpack_entry(data: u64) -> TTEntry {
    let bound_gen = ((data >> 40) & 0xFF) as u8;
    TTEntry {
        best_move: Move::from_u16((data & 0xFFFF) as u16),
        score: ((data >> 16) & 0xFFFF) as u16 as i16,
        depth: ((data >> 32) & 0xFF) as u8,
        bound_type: BoundType::from_u8(bound_gen & 0x3),
        generation: (bound_gen >> 2) & 0x3F,
    }
}

/// One table slot. A zero lock marks an empty slot.
#[derive(Clone, Copy, Default)]
struct TTSlot {
    lock: u64,
    data: u64,
}

impl TTSlot {
    fn is_empty(&self) -> bool {
        self.lock == 0
    }

    fn entry(&self) -> TTEntry {
        unpack_entry(self.data)
    }
}

/// Largest accepted capacity level; 2^24 slots is 256 MiB.
pub const MAX_HASH_LEVEL: u32 = 24;

/// Depth-preferred transposition table with `2^hash_level` slots.
pub struct TranspositionTable {
    slots: Vec<TTSlot>,
    mask: usize,
    hash_level: u32,
    generation: u8,
}

impl TranspositionTable {
    /// Create a table of `2^hash_level` slots. Levels above
    /// [`MAX_HASH_LEVEL`] are clamped.
    #[must_use]
    pub fn new(hash_level: u32) -> Self {
        let hash_level = hash_level.min(MAX_HASH_LEVEL);
        let size = 1usize << hash_level;
        TranspositionTable {
            slots: vec![TTSlot::default(); size],
            mask: size - 1,
            hash_level,
            generation: 0,
        }
    }

    #[must_use]
    pub fn hash_level(&self) -> u32 {
        self.hash_level
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(TTSlot::is_empty)
    }

    #[must_use]
    pub fn generation(&self) -> u8 {
        self.generation
    }

    /// Start a new search generation. Entries from older generations become
    /// replaceable regardless of depth.
    pub fn new_search(&mut self) {
        self.generation = (self.generation + 1) & 0x3F;
    }

    fn index(&self, key: u64) -> usize {
        (key as usize) & self.mask
    }

    /// Probe the table for an entry stored under `key` and verified by `lock`.
    #[must_use]
    pub fn probe(&self, key: u64, lock: u64) -> Option<TTEntry> {
        let slot = &self.slots[self.index(key)];
        if slot.is_empty() || slot.lock != lock {
            return None;
        }
        Some(slot.entry())
    }

    /// Store an entry, returning whether it was written.
    ///
    /// The resident entry survives when it belongs to the current generation
    /// and was searched at least as deep, except that an entry for the same
    /// position is refreshed by an equally deep result.
    pub fn store(
        &mut self,
        key: u64,
        lock: u64,
        depth: i32,
        score: i32,
        bound_type: BoundType,
        best_move: Move,
    ) -> bool {
        let depth_u8 = depth.clamp(0, i32::from(u8::MAX)) as u8;
        let score_i16 = score.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16;
        let generation = self.generation;
        let index = self.index(key);
        let slot = &mut self.slots[index];

        if !slot.is_empty() {
            let resident = slot.entry();
            let same_position = slot.lock == lock;
            let keep = resident.generation == generation
                && if same_position {
                    resident.depth > depth_u8
                } else {
                    resident.depth >= depth_u8
                };
            if keep {
                trace!(
                    "tt keeps depth {} entry over depth {depth} at slot {index}",
                    resident.depth
                );
                return false;
            }
        }

        slot.lock = lock;
        slot.data = pack_entry(depth_u8, score_i16, bound_type, best_move, generation);
        true
    }

    /// Returns hash table fullness in per mille (0-1000).
    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        let sample_size = self.slots.len().min(1000);
        let occupied = self
            .slots
            .iter()
            .take(sample_size)
            .filter(|slot| !slot.is_empty())
            .count();
        ((occupied as u64 * 1000) / sample_size as u64) as u32
    }

    /// Clear all entries from the table.
    pub fn clear(&mut self) {
        self.slots.fill(TTSlot::default());
        self.generation = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_unpack_roundtrip() {
        let test_cases = [
            (10u8, 500i16, BoundType::Exact, Move::from_u16(0x3433), 5u8),
            (255u8, -9990i16, BoundType::LowerBound, Move::NULL, 63u8),
            (0u8, 0i16, BoundType::UpperBound, Move::from_u16(0xCBC3), 0u8),
        ];

        for (depth, score, bound, mv, gen) in test_cases {
            let unpacked = unpack_entry(pack_entry(depth, score, bound, mv, gen));
            assert_eq!(unpacked.depth, depth);
            assert_eq!(unpacked.score, score);
            assert_eq!(unpacked.bound_type, bound);
            assert_eq!(unpacked.best_move, mv);
            assert_eq!(unpacked.generation, gen);
        }
    }

    #[test]
    fn test_store_and_probe() {
        let mut tt = TranspositionTable::new(10);
        let mv = Move::from_u16(0x3433);
        assert!(tt.store(0x1234, 0xABCD, 6, -250, BoundType::UpperBound, mv));

        let entry = tt.probe(0x1234, 0xABCD).expect("should find entry");
        assert_eq!(entry.depth(), 6);
        assert_eq!(entry.score(), -250);
        assert_eq!(entry.bound_type(), BoundType::UpperBound);
        assert_eq!(entry.best_move(), Some(mv));
    }

    #[test]
    fn test_lock_mismatch_misses() {
        let mut tt = TranspositionTable::new(10);
        tt.store(0x1234, 0xABCD, 6, 0, BoundType::Exact, Move::NULL);
        assert!(tt.probe(0x1234, 0xABCE).is_none());
        assert!(tt.probe(0x1235, 0xABCD).is_none());
    }

    #[test]
    fn test_depth_preferred_within_generation() {
        let mut tt = TranspositionTable::new(4);
        // Same index (low bits), different positions.
        assert!(tt.store(0x10, 1, 8, 100, BoundType::Exact, Move::NULL));
        assert!(!tt.store(0x20, 2, 8, 50, BoundType::Exact, Move::NULL));
        assert!(!tt.store(0x20, 2, 3, 50, BoundType::Exact, Move::NULL));
        assert_eq!(tt.probe(0x10, 1).map(|e| e.score()), Some(100));

        // A deeper result replaces.
        assert!(tt.store(0x20, 2, 9, 50, BoundType::Exact, Move::NULL));
        assert!(tt.probe(0x10, 1).is_none());
    }

    #[test]
    fn test_same_position_refreshed_at_equal_depth() {
        let mut tt = TranspositionTable::new(4);
        tt.store(0x10, 1, 5, 100, BoundType::UpperBound, Move::NULL);
        assert!(tt.store(0x10, 1, 5, 120, BoundType::Exact, Move::NULL));
        assert!(!tt.store(0x10, 1, 4, 0, BoundType::Exact, Move::NULL));
        assert_eq!(tt.probe(0x10, 1).map(|e| e.score()), Some(120));
    }

    #[test]
    fn test_new_generation_makes_entries_replaceable() {
        let mut tt = TranspositionTable::new(4);
        tt.store(0x10, 1, 20, 100, BoundType::Exact, Move::NULL);
        tt.new_search();
        assert!(tt.store(0x20, 2, 1, 7, BoundType::Exact, Move::NULL));
        assert_eq!(tt.probe(0x20, 2).map(|e| e.score()), Some(7));
    }

    #[test]
    fn test_clear_and_hashfull() {
        let mut tt = TranspositionTable::new(4);
        assert_eq!(tt.len(), 16);
        assert_eq!(tt.hashfull_per_mille(), 0);
        for key in 0..8u64 {
            tt.store(key, key + 1, 1, 0, BoundType::Exact, Move::NULL);
        }
        assert_eq!(tt.hashfull_per_mille(), 500);
        tt.clear();
        assert!(tt.is_empty());
        assert!(tt.probe(3, 4).is_none());
    }

    #[test]
    fn test_level_is_clamped() {
        let tt = TranspositionTable::new(0);
        assert_eq!(tt.len(), 1);
        assert_eq!(tt.hash_level(), 0);
        assert_eq!(40u32.min(MAX_HASH_LEVEL), MAX_HASH_LEVEL);
    }
}
