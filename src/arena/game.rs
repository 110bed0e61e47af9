//! Match orchestration
//!
//! Runs one game between agents seated according to the player sequence.
//! Each turn the canonical board is turned into the acting seat's frame, the
//! agent is asked for a move, the move is checked and then played on the
//! canonical board. Any failure of an agent ends the match with a forfeit for
//! that seat; the orchestrator itself never fails mid-match.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;

use shakmaty::Role;
use thiserror::Error;

use crate::core::{Board, Layout, Move, Piece, PlayerSequence, rotation};
use crate::engine::rules::{self, IllegalMove};

use super::agent::{Agent, AgentError};
use super::config::MatchConfig;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("layout seats {expected} players but {found} agents were given")]
    SeatCount { expected: usize, found: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForfeitReason {
    /// The agent returned an error or panicked.
    Crashed(String),
    /// The reply was not a pair of coordinates.
    Malformed(String),
    Illegal(IllegalMove),
    /// No reply within the hard ceiling.
    Timeout,
}

impl fmt::Display for ForfeitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForfeitReason::Crashed(msg) => write!(f, "crashed: {}", msg),
            ForfeitReason::Malformed(msg) => write!(f, "invalid move format: {}", msg),
            ForfeitReason::Illegal(e) => write!(f, "illegal move: {}", e),
            ForfeitReason::Timeout => write!(f, "took too long"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `seat` eliminated every opposing team.
    Win { seat: usize },
    /// The turn limit was reached.
    Draw,
    /// `seat` forfeited.
    Forfeit { seat: usize, reason: ForfeitReason },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub outcome: Outcome,
    /// Turns completed (a forfeited turn counts).
    pub turns: u32,
    /// Seats the match was played with.
    pub seats: usize,
}

impl MatchResult {
    /// Seat of the winner. `None` for a draw, and for a forfeit when more
    /// than one opponent remains.
    pub fn winner(&self) -> Option<usize> {
        match self.outcome {
            Outcome::Win { seat } => Some(seat),
            Outcome::Draw => None,
            Outcome::Forfeit { seat, .. } if self.seats == 2 && seat < 2 => Some(1 - seat),
            Outcome::Forfeit { .. } => None,
        }
    }
}

pub struct Match {
    board: Board,
    sequence: PlayerSequence,
    names: Vec<String>,
    /// Taken out while an agent is thinking; lost if it never answers.
    agents: Vec<Option<Box<dyn Agent>>>,
    alive: Vec<bool>,
    config: MatchConfig,
    cursor: usize,
    turn: u32,
    result: Option<MatchResult>,
}

impl Match {
    /// Seat `agents[i]` at the i-th triple of the layout's sequence.
    pub fn new(
        layout: Layout,
        agents: Vec<(String, Box<dyn Agent>)>,
        config: MatchConfig,
    ) -> Result<Self, MatchError> {
        let seats = layout.sequence.len();
        if agents.len() != seats {
            return Err(MatchError::SeatCount {
                expected: seats,
                found: agents.len(),
            });
        }
        let (names, agents): (Vec<String>, Vec<Option<Box<dyn Agent>>>) =
            agents.into_iter().map(|(n, a)| (n, Some(a))).unzip();
        Ok(Match {
            board: layout.board,
            sequence: layout.sequence,
            names,
            agents,
            alive: vec![true; seats],
            config,
            cursor: 0,
            turn: 0,
            result: None,
        })
    }

    /// The canonical board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn sequence(&self) -> &PlayerSequence {
        &self.sequence
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn name(&self, seat: usize) -> &str {
        &self.names[seat]
    }

    pub fn result(&self) -> Option<&MatchResult> {
        self.result.as_ref()
    }

    /// Play until the match is decided.
    pub fn play(&mut self) -> MatchResult {
        loop {
            if let Some(result) = self.step() {
                return result;
            }
        }
    }

    /// Play one turn. Returns the result once the match is over; further
    /// calls keep returning it.
    pub fn step(&mut self) -> Option<MatchResult> {
        if let Some(result) = &self.result {
            return Some(result.clone());
        }
        if self.turn >= self.config.max_turns {
            return Some(self.finish(Outcome::Draw));
        }

        let seat_idx = self.cursor;
        let sequence = self.sequence.shifted(seat_idx);
        let seat = sequence.mover();
        let view = self.board.rotated(seat.rotation);
        self.turn += 1;

        let mv = match self.invoke(seat_idx, &sequence, view.clone()) {
            Ok(mv) => mv,
            Err(reason) => return Some(self.forfeit(seat_idx, reason)),
        };
        if let Err(e) = rules::check_move(&sequence, mv, &view) {
            return Some(self.forfeit(seat_idx, ForfeitReason::Illegal(e)));
        }

        self.apply(mv, &view, seat.rotation);
        log::debug!("{} ({}) played {}", self.names[seat_idx], seat.color, mv);

        for (i, s) in self.sequence.seats().iter().enumerate() {
            if self.alive[i] && i != seat_idx && rules::is_defeated(s.color, &self.board) {
                self.alive[i] = false;
                log::debug!("{} ({}) lost its king", self.names[i], s.color);
            }
        }
        if self.teams_alive() <= 1 {
            return Some(self.finish(Outcome::Win { seat: seat_idx }));
        }

        self.advance();
        None
    }

    /// Play `mv`, given in the frame of `view`, on the canonical board.
    /// A pawn reaching the last row of the mover's frame becomes a queen.
    fn apply(&mut self, mv: Move, view: &Board, rotation_turns: u8) {
        let size = view.size();
        let from = rotation::rotate(size, (mv.from.row, mv.from.col), rotation_turns).into();
        let to = rotation::rotate(size, (mv.to.row, mv.to.col), rotation_turns).into();

        let Some(piece) = self.board.remove(from) else {
            return;
        };
        let landed = if piece.role == Role::Pawn && mv.to.row == view.last_row() {
            Piece::new(Role::Queen, piece.color)
        } else {
            piece
        };
        self.board.put(to, landed);
    }

    fn teams_alive(&self) -> usize {
        let mut teams: Vec<u8> = self
            .sequence
            .seats()
            .iter()
            .zip(&self.alive)
            .filter(|(_, alive)| **alive)
            .map(|(s, _)| s.team)
            .collect();
        teams.sort_unstable();
        teams.dedup();
        teams.len()
    }

    fn advance(&mut self) {
        let seats = self.alive.len();
        for step in 1..=seats {
            let next = (self.cursor + step) % seats;
            if self.alive[next] {
                self.cursor = next;
                return;
            }
        }
    }

    fn forfeit(&mut self, seat: usize, reason: ForfeitReason) -> MatchResult {
        log::warn!("Bot '{}' forfeits: {}", self.names[seat], reason);
        self.finish(Outcome::Forfeit { seat, reason })
    }

    fn finish(&mut self, outcome: Outcome) -> MatchResult {
        let result = MatchResult {
            outcome,
            turns: self.turn,
            seats: self.alive.len(),
        };
        self.result = Some(result.clone());
        result
    }

    /// Ask the agent of `seat` for a move on a worker thread, waiting at most
    /// the configured ceiling. A worker that misses the ceiling is abandoned.
    fn invoke(&mut self, seat: usize, sequence: &PlayerSequence, view: Board) -> Result<Move, ForfeitReason> {
        let Some(mut agent) = self.agents[seat].take() else {
            return Err(ForfeitReason::Crashed("agent unavailable".to_string()));
        };
        let budget = self.config.time_budget;
        let sequence = sequence.clone();
        let (tx, rx) = mpsc::channel();

        let spawned = thread::Builder::new()
            .name(format!("agent-{}", self.names[seat]))
            .spawn(move || {
                let reply = panic::catch_unwind(AssertUnwindSafe(|| agent.choose_move(&sequence, &view, budget)));
                // the receiver is gone if the orchestrator stopped waiting
                let _ = tx.send((agent, reply));
            });
        if let Err(e) = spawned {
            return Err(ForfeitReason::Crashed(e.to_string()));
        }

        match rx.recv_timeout(self.config.ceiling()) {
            Ok((agent, reply)) => {
                self.agents[seat] = Some(agent);
                match reply {
                    Ok(Ok(mv)) => Ok(mv),
                    Ok(Err(AgentError::Malformed(msg))) => Err(ForfeitReason::Malformed(msg)),
                    Ok(Err(e)) => Err(ForfeitReason::Crashed(e.to_string())),
                    Err(payload) => Err(ForfeitReason::Crashed(panic_message(payload.as_ref()))),
                }
            }
            Err(RecvTimeoutError::Timeout) => Err(ForfeitReason::Timeout),
            Err(RecvTimeoutError::Disconnected) => {
                Err(ForfeitReason::Crashed("agent thread exited without replying".to_string()))
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panicked".to_string()
    }
}
