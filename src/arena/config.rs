//! Match and tournament settings.

use std::time::Duration;

/// Extra time granted past the budget before an agent call is abandoned.
pub const GRACE_RATIO: f64 = 0.05;

#[derive(Clone, Debug)]
pub struct MatchConfig {
    /// Thinking time per turn.
    pub time_budget: Duration,
    /// Turns played before the match is declared a draw.
    pub max_turns: u32,
    /// Fraction of `time_budget` tolerated on top of it.
    pub grace: f64,
}

impl MatchConfig {
    /// Hard ceiling for one agent call.
    pub fn ceiling(&self) -> Duration {
        self.time_budget.mul_f64(1.0 + self.grace.max(0.0))
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            time_budget: Duration::from_secs(1),
            max_turns: 99,
            grace: GRACE_RATIO,
        }
    }
}

#[derive(Clone, Debug)]
pub struct TournamentConfig {
    pub match_config: MatchConfig,
    /// Games per pairing. Pairs of distinct agents split them between both
    /// colour assignments.
    pub matches_per_pair: u32,
    /// Restrict the tournament to these agents; all automated agents otherwise.
    pub bots: Option<Vec<String>>,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            match_config: MatchConfig::default(),
            matches_per_pair: 10,
            bots: None,
        }
    }
}
