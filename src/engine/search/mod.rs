//! Search: iterative deepening negamax with alpha-beta pruning under a wall-clock budget.

mod negamax;
mod searcher;
mod types;

pub use searcher::Searcher;
pub use types::{INFINITY, MATE_SCORE, MAX_DEPTH, SAFETY_MARGIN, SearchLimits, SearchStats};
