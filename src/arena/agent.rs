//! The agent contract: one method that turns a position into a move.

use std::io;
use std::time::Duration;

use thiserror::Error;

use crate::core::{Board, Move, MoveParseError, PlayerSequence};

#[derive(Debug, Error)]
pub enum AgentError {
    /// The reply could not be read as a move.
    #[error("malformed move: {0}")]
    Malformed(String),
    #[error("{0}")]
    Failed(String),
}

impl From<MoveParseError> for AgentError {
    fn from(e: MoveParseError) -> Self {
        AgentError::Malformed(e.to_string())
    }
}

impl From<io::Error> for AgentError {
    fn from(e: io::Error) -> Self {
        AgentError::Failed(e.to_string())
    }
}

/// Anything that can play a turn.
///
/// `sequence` starts with the agent's own seat, `board` is in the agent's own
/// frame (its pawns advance toward higher rows) and is a copy private to this
/// call.
/// The returned move is in that same frame. Agents should answer within
/// `budget`; the orchestrator stops waiting shortly after it.
pub trait Agent: Send {
    fn choose_move(
        &mut self,
        sequence: &PlayerSequence,
        board: &Board,
        budget: Duration,
    ) -> Result<Move, AgentError>;
}
