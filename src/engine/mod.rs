//! Engine components
//!
//! This module contains the rule engine and the automated player core:
//! - Pseudo-legal move generation for sliding and stepping pieces
//! - Independent move legality checks
//! - Material evaluation
//! - Time-bounded negamax search

pub mod eval;
pub mod movegen;
pub mod rules;
pub mod search;

pub use eval::{evaluate, piece_value};
pub use movegen::MoveGen;
pub use rules::{IllegalMove, check_move, is_defeated, is_valid_move};
pub use search::{SearchLimits, SearchStats, Searcher, INFINITY, MATE_SCORE};
