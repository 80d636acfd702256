/// Tunable search parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchParams {
    /// Depth reduction of the null move search, on top of the normal ply.
    pub null_depth: i32,
    /// Own material needed before a null move is tried.
    pub null_okay_margin: i32,
    /// Own material above which a null move cutoff is trusted without a
    /// verification search.
    pub null_safe_margin: i32,
    /// The clock is read once every this many nodes. Must be a power of two.
    pub time_check_interval: u64,
    /// Deepest ply below the root; nodes there return the static evaluation.
    pub limit_depth: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            null_depth: 2,
            null_okay_margin: 200,
            null_safe_margin: 400,
            time_check_interval: 1024,
            limit_depth: crate::board::LIMIT_DEPTH,
        }
    }
}
