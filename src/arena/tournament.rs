//! Round-robin tournaments between registered agents.

use std::fmt;

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::core::Layout;

use super::agent::Agent;
use super::bots::AgentRegistry;
use super::config::TournamentConfig;
use super::game::{Match, MatchError, Outcome};

#[derive(Debug, Error)]
pub enum TournamentError {
    #[error("unknown agent '{0}'")]
    UnknownAgent(String),
    #[error("agent '{0}' needs a human and cannot enter a tournament")]
    Interactive(String),
    #[error("tournaments need a two-player layout, this one seats {0}")]
    SeatCount(usize),
    #[error(transparent)]
    Match(#[from] MatchError),
}

/// Results of one ordered pairing, from the first-listed side's view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Record {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl Record {
    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }
}

#[derive(Clone, Debug)]
pub struct TournamentReport {
    pub started_at: DateTime<Local>,
    /// `((first, second), record)` in the order pairings were first played.
    records: Vec<((String, String), Record)>,
}

impl TournamentReport {
    pub fn new() -> Self {
        TournamentReport {
            started_at: Local::now(),
            records: Vec::new(),
        }
    }

    pub fn get(&self, first: &str, second: &str) -> Option<&Record> {
        self.records
            .iter()
            .find(|((a, b), _)| a == first && b == second)
            .map(|(_, r)| r)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &Record)> {
        self.records.iter().map(|((a, b), r)| (a.as_str(), b.as_str(), r))
    }

    /// Record for `(first, second)`, created empty on first use.
    pub fn entry(&mut self, first: &str, second: &str) -> &mut Record {
        let pos = match self.records.iter().position(|((a, b), _)| a == first && b == second) {
            Some(pos) => pos,
            None => {
                self.records
                    .push(((first.to_string(), second.to_string()), Record::default()));
                self.records.len() - 1
            }
        };
        &mut self.records[pos].1
    }
}

impl Default for TournamentReport {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TournamentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tournament started {}", self.started_at.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(f, "{:<20}     {:<20} | {:>3} {:>3} {:>3}", "", "", "W", "L", "D")?;
        for ((first, second), r) in &self.records {
            writeln!(
                f,
                "{:<20} vs. {:<20} | {:>3} {:>3} {:>3}",
                first, second, r.wins, r.losses, r.draws
            )?;
        }
        Ok(())
    }
}

pub struct Tournament<'a> {
    registry: &'a AgentRegistry,
    layout: Layout,
    config: TournamentConfig,
}

impl<'a> Tournament<'a> {
    pub fn new(registry: &'a AgentRegistry, layout: Layout, config: TournamentConfig) -> Self {
        Tournament {
            registry,
            layout,
            config,
        }
    }

    /// Agents taking part: the configured subset, or every automated agent.
    /// Interactive agents are never entered.
    fn entrants(&self) -> Result<Vec<String>, TournamentError> {
        let Some(bots) = &self.config.bots else {
            return Ok(self.registry.automated());
        };
        for name in bots {
            match self.registry.get(name) {
                None => return Err(TournamentError::UnknownAgent(name.clone())),
                Some(reg) if reg.interactive => {
                    return Err(TournamentError::Interactive(name.clone()));
                }
                Some(_) => {}
            }
        }
        Ok(bots.clone())
    }

    /// Play every pairing. An agent paired with itself plays all games of the
    /// pairing; distinct agents split them between both colour assignments.
    pub fn run(&self) -> Result<TournamentReport, TournamentError> {
        let seats = self.layout.sequence.len();
        if seats != 2 {
            return Err(TournamentError::SeatCount(seats));
        }
        let entrants = self.entrants()?;
        let total = self.config.matches_per_pair;
        let mut report = TournamentReport::new();

        for (i, a) in entrants.iter().enumerate() {
            for b in &entrants[i..] {
                if a == b {
                    self.play_pairing(&mut report, a, b, total)?;
                } else {
                    self.play_pairing(&mut report, a, b, total - total / 2)?;
                    self.play_pairing(&mut report, b, a, total / 2)?;
                }
            }
        }

        Ok(report)
    }

    fn play_pairing(
        &self,
        report: &mut TournamentReport,
        first: &str,
        second: &str,
        games: u32,
    ) -> Result<(), TournamentError> {
        let seats = self.layout.sequence.seats();
        let name_first = format!("{} {}", seats[0].color, first);
        let name_second = format!("{} {}", seats[1].color, second);
        report.entry(&name_first, &name_second);

        for game in 1..=games {
            let agents = vec![
                (name_first.clone(), self.create(first)?),
                (name_second.clone(), self.create(second)?),
            ];
            let mut game_match = Match::new(self.layout.clone(), agents, self.config.match_config.clone())?;
            let result = game_match.play();

            let verdict = match result.winner() {
                Some(0) => format!("{} win", seats[0].color),
                Some(_) => format!("{} win", seats[1].color),
                None => "Draw".to_string(),
            };
            let how = match &result.outcome {
                Outcome::Forfeit { .. } => " by forfeit",
                _ => "",
            };
            log::info!("{:>3}. Match finished in {} turns - {}{}", game, result.turns, verdict, how);

            let record = report.entry(&name_first, &name_second);
            match result.winner() {
                Some(0) => record.wins += 1,
                Some(_) => record.losses += 1,
                None => record.draws += 1,
            }
        }
        Ok(())
    }

    fn create(&self, name: &str) -> Result<Box<dyn Agent>, TournamentError> {
        self.registry
            .create(name)
            .ok_or_else(|| TournamentError::UnknownAgent(name.to_string()))
    }
}
