pub mod arena;
pub mod core;
pub mod engine;

pub use arena::{Agent, AgentRegistry, Match, MatchConfig, Tournament, TournamentConfig};
pub use crate::core::{Board, Layout, Move, PlayerSequence};
pub use engine::search::{SearchLimits, Searcher};
pub use shakmaty;
