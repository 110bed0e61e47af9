//! Built-in agents and the name registry.

use std::io::{BufRead, Write};
use std::time::Duration;

use crate::core::{Board, Move, PlayerSequence, Square};
use crate::engine::movegen::MoveGen;
use crate::engine::search::{SearchLimits, Searcher};

use super::agent::{Agent, AgentError};

/// Picks one of its pieces at random, then one of that piece's moves at
/// random. Stays in place when the chosen piece cannot move.
#[derive(Default)]
pub struct RandomBot;

impl Agent for RandomBot {
    fn choose_move(&mut self, sequence: &PlayerSequence, board: &Board, _budget: Duration) -> Result<Move, AgentError> {
        let color = sequence.mover().color;
        let pieces: Vec<Square> = board.pieces_of(color).map(|(sq, _)| sq).collect();
        if pieces.is_empty() {
            return Err(AgentError::Failed(format!("no {} pieces left", color)));
        }

        let from = pieces[(rand::random::<u64>() as usize) % pieces.len()];
        let moves = MoveGen::piece_moves_with(board, from, |c| !sequence.same_team(c, color)).ordered();
        if moves.is_empty() {
            return Ok(Move::null(from));
        }
        Ok(moves[(rand::random::<u64>() as usize) % moves.len()])
    }
}

/// Plays the first move in generator order: a promotion, else the most
/// valuable capture, else the first quiet move.
#[derive(Default)]
pub struct GreedyBot;

impl Agent for GreedyBot {
    fn choose_move(&mut self, sequence: &PlayerSequence, board: &Board, _budget: Duration) -> Result<Move, AgentError> {
        let color = sequence.mover().color;
        let list = MoveGen::generate_with(board, color, |c| !sequence.same_team(c, color));
        if let Some(&mv) = list.ordered().first() {
            return Ok(mv);
        }
        let at = board.pieces_of(color).map(|(sq, _)| sq).next().unwrap_or(Square::new(0, 0));
        Ok(Move::null(at))
    }
}

/// Iterative-deepening negamax within the turn budget.
pub struct SearchBot {
    king_safety: bool,
}

impl SearchBot {
    pub fn new(king_safety: bool) -> Self {
        SearchBot { king_safety }
    }
}

impl Agent for SearchBot {
    fn choose_move(&mut self, sequence: &PlayerSequence, board: &Board, budget: Duration) -> Result<Move, AgentError> {
        let limits = SearchLimits {
            king_safety: self.king_safety,
            ..SearchLimits::with_budget(budget)
        };
        let mut searcher = Searcher::new(limits);
        Ok(searcher.search(sequence, board))
    }
}

/// Reads moves typed as `row,col row,col`, one per line, showing the board
/// (in the player's own frame) before each prompt.
pub struct ManualBot<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ManualBot<R, W> {
    pub fn new(input: R, output: W) -> Self {
        ManualBot { input, output }
    }
}

impl<R: BufRead + Send, W: Write + Send> Agent for ManualBot<R, W> {
    fn choose_move(&mut self, sequence: &PlayerSequence, board: &Board, budget: Duration) -> Result<Move, AgentError> {
        let seat = sequence.mover();
        writeln!(self.output, "\n{}", board)?;
        write!(
            self.output,
            "{} to move ({:.1}s), enter 'row,col row,col': ",
            seat.color,
            budget.as_secs_f64()
        )?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(AgentError::Failed("input closed".to_string()));
        }
        Ok(line.trim().parse()?)
    }
}

type Factory = Box<dyn Fn() -> Box<dyn Agent> + Send + Sync>;

pub struct Registration {
    pub name: String,
    /// Interactive agents wait for a human and are left out of tournaments.
    pub interactive: bool,
    factory: Factory,
}

impl Registration {
    pub fn create(&self) -> Box<dyn Agent> {
        (self.factory)()
    }
}

/// Agents by unique name, in registration order.
#[derive(Default)]
pub struct AgentRegistry {
    entries: Vec<Registration>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in agent.
    pub fn builtin() -> Self {
        let mut registry = AgentRegistry::new();
        registry.register("random", || Box::new(RandomBot));
        registry.register("greedy", || Box::new(GreedyBot));
        registry.register("negamax", || Box::new(SearchBot::new(false)));
        registry.register("negamax-safe", || Box::new(SearchBot::new(true)));
        registry.register_interactive("manual", || {
            Box::new(ManualBot::new(std::io::BufReader::new(std::io::stdin()), std::io::stdout()))
        });
        registry
    }

    /// Register an automated agent. A later registration under the same name
    /// replaces the earlier one.
    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn() -> Box<dyn Agent> + Send + Sync + 'static,
    {
        self.insert(name, false, Box::new(factory));
    }

    pub fn register_interactive<F>(&mut self, name: &str, factory: F)
    where
        F: Fn() -> Box<dyn Agent> + Send + Sync + 'static,
    {
        self.insert(name, true, Box::new(factory));
    }

    fn insert(&mut self, name: &str, interactive: bool, factory: Factory) {
        let registration = Registration {
            name: name.to_string(),
            interactive,
            factory,
        };
        match self.entries.iter_mut().find(|r| r.name == name) {
            Some(existing) => *existing = registration,
            None => self.entries.push(registration),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Registration> {
        self.entries.iter().find(|r| r.name == name)
    }

    /// A fresh instance of the agent registered as `name`.
    pub fn create(&self, name: &str) -> Option<Box<dyn Agent>> {
        self.get(name).map(Registration::create)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Registration> {
        self.entries.iter()
    }

    /// Names of the non-interactive agents.
    pub fn automated(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|r| !r.interactive)
            .map(|r| r.name.clone())
            .collect()
    }
}
