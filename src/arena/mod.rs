//! Playing games between agents
//!
//! This module runs agents against each other:
//! - The one-method agent contract and built-in bots
//! - Match orchestration with forfeits and a hard per-turn ceiling
//! - Round-robin tournaments and their report

pub mod agent;
pub mod bots;
pub mod config;
pub mod game;
pub mod tournament;

pub use agent::{Agent, AgentError};
pub use bots::{AgentRegistry, GreedyBot, ManualBot, RandomBot, SearchBot};
pub use config::{GRACE_RATIO, MatchConfig, TournamentConfig};
pub use game::{ForfeitReason, Match, MatchError, MatchResult, Outcome};
pub use tournament::{Record, Tournament, TournamentError, TournamentReport};
