//! Search constants.

// ============================================================================
// MOVE ORDERING PRIORITIES
// ============================================================================
// Higher scores = tried earlier. Ordered: TT > killers > captures > history

/// Hash move (from transposition table) - highest priority
pub const TT_MOVE_SCORE: i32 = i32::MAX;

/// First killer move (move that caused a cutoff at the same ply)
pub const KILLER1_SCORE: i32 = i32::MAX - 1;

/// Second killer move (replaced killer)
pub const KILLER2_SCORE: i32 = i32::MAX - 2;

/// Base for captures, which add their MVV-LVA score. History scores are
/// capped below it.
pub const CAPTURE_SCORE: i32 = 1 << 24;

// ============================================================================
// QUIESCENCE
// ============================================================================

/// Captures scoring below this MVV-LVA value are skipped in quiescence.
pub const QUIESCE_MIN_CAPTURE: i32 = 10;

/// Captures landing on the mover's own half need at least this score.
pub const QUIESCE_MIN_HOME_CAPTURE: i32 = 20;
