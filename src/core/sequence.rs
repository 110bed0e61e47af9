//! Player sequence
//!
//! The turn order is written as consecutive `{team}{color}{rotation}` triples,
//! e.g. `0w01b2`: white on team 0 seen unrotated, black on team 1 seen after
//! two quarter turns. The first triple is the side to move.

use super::board::Color;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error("player sequence '{0}' is not a whole number of triples")]
    Length(String),
    #[error("player sequence has no seats")]
    Empty,
    #[error("invalid team id '{0}'")]
    Team(char),
    #[error("invalid color '{0}'")]
    Color(char),
    #[error("invalid rotation '{0}'")]
    Rotation(char),
    #[error("color '{0}' appears more than once")]
    DuplicateColor(char),
}

/// One side in the turn order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Seat {
    pub team: u8,
    pub color: Color,
    /// Quarter turns from the canonical board to this side's view.
    pub rotation: u8,
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct PlayerSequence {
    seats: Vec<Seat>,
}

impl PlayerSequence {
    pub fn new(seats: Vec<Seat>) -> Result<Self, SequenceError> {
        if seats.is_empty() {
            return Err(SequenceError::Empty);
        }
        for (i, seat) in seats.iter().enumerate() {
            if seat.rotation > 3 {
                return Err(SequenceError::Rotation(char::from(b'0' + seat.rotation.min(9))));
            }
            if seats[..i].iter().any(|s| s.color == seat.color) {
                return Err(SequenceError::DuplicateColor(seat.color.to_char()));
            }
        }
        Ok(PlayerSequence { seats })
    }

    /// The two-player default: white on team 0 unrotated, black on team 1 turned twice.
    pub fn two_player(first: Color, second: Color) -> Self {
        PlayerSequence {
            seats: vec![
                Seat { team: 0, color: first, rotation: 0 },
                Seat { team: 1, color: second, rotation: 2 },
            ],
        }
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Seat of the side to move.
    pub fn mover(&self) -> Seat {
        self.seats[0]
    }

    /// Seat that moves after the side to move.
    pub fn next(&self) -> Seat {
        self.seats[1 % self.seats.len()]
    }

    /// Sequence cyclically shifted left by `n` triples, so seat `n` moves first.
    pub fn shifted(&self, n: usize) -> Self {
        let mut seats = self.seats.clone();
        let len = seats.len();
        seats.rotate_left(n % len);
        PlayerSequence { seats }
    }

    /// Advance the turn order by one seat.
    pub fn advanced(&self) -> Self {
        self.shifted(1)
    }

    pub fn seat_of(&self, color: Color) -> Option<Seat> {
        self.seats.iter().copied().find(|s| s.color == color)
    }

    /// Team of the side playing `color`, if that colour is seated.
    pub fn team_of(&self, color: Color) -> Option<u8> {
        self.seat_of(color).map(|s| s.team)
    }

    /// Whether `a` and `b` play on the same team. Unseated colours have no team.
    pub fn same_team(&self, a: Color, b: Color) -> bool {
        matches!((self.team_of(a), self.team_of(b)), (Some(x), Some(y)) if x == y)
    }
}

impl FromStr for PlayerSequence {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let chars: Vec<char> = s.chars().collect();
        if chars.len() % 3 != 0 {
            return Err(SequenceError::Length(s.to_string()));
        }

        let mut seats = Vec::with_capacity(chars.len() / 3);
        for triple in chars.chunks(3) {
            let team = triple[0].to_digit(10).ok_or(SequenceError::Team(triple[0]))? as u8;
            let color = Color::from_char(triple[1]).ok_or(SequenceError::Color(triple[1]))?;
            let rotation = triple[2]
                .to_digit(10)
                .filter(|r| *r < 4)
                .ok_or(SequenceError::Rotation(triple[2]))? as u8;
            seats.push(Seat { team, color, rotation });
        }

        PlayerSequence::new(seats)
    }
}

impl fmt::Display for PlayerSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for seat in &self.seats {
            write!(f, "{}{}{}", seat.team, seat.color.to_char(), seat.rotation)?;
        }
        Ok(())
    }
}
