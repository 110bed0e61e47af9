//! Search limits, stats, and constants.

use std::time::Duration;

#[derive(Clone, Debug)]
pub struct SearchLimits {
    /// Wall-clock budget for one move.
    pub time_budget: Duration,
    /// Reserved out of the budget for unwinding and returning.
    pub safety_margin: Duration,
    pub max_depth: u32,
    /// Drop moves that leave the own king capturable, and score positions
    /// without safe moves as lost (king attacked) or by material.
    pub king_safety: bool,
}

impl SearchLimits {
    pub fn with_budget(time_budget: Duration) -> Self {
        Self {
            time_budget,
            ..Default::default()
        }
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            time_budget: Duration::from_secs(1),
            safety_margin: SAFETY_MARGIN,
            max_depth: MAX_DEPTH,
            king_safety: false,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SearchStats {
    pub nodes: u64,
    /// Deepest fully completed iteration.
    pub depth: u32,
    /// The last completed iteration reached every leaf of the game tree.
    pub exhausted: bool,
}

pub const INFINITY: i32 = 1_000_000;
pub const MATE_SCORE: i32 = 500_000;
pub const MAX_DEPTH: u32 = 64;
pub const SAFETY_MARGIN: Duration = Duration::from_millis(10);

/// Raised at a deadline check; unwinds the current iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct Timeout;
