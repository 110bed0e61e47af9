//! Move representation
//!
//! Coordinates are signed so that moves supplied from outside (a human, a
//! misbehaving bot) can point off the board and still be represented; the
//! rule validator rejects them.
//!
//! Text notation is `row,col row,col`, e.g. `1,4 3,4`.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A (row, col) coordinate.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Square {
    pub row: i32,
    pub col: i32,
}

impl Square {
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Square { row, col }
    }

    #[inline]
    pub const fn offset(self, d_row: i32, d_col: i32) -> Self {
        Square::new(self.row + d_row, self.col + d_col)
    }
}

impl From<(i32, i32)> for Square {
    fn from((row, col): (i32, i32)) -> Self {
        Square::new(row, col)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// A move from one square to another, in some player's frame.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }

    /// The "stay in place" move a bot returns when it cannot move.
    #[inline]
    pub const fn null(at: Square) -> Self {
        Move { from: at, to: at }
    }

    #[inline]
    pub fn is_null(self) -> bool {
        self.from == self.to
    }
}

impl From<((i32, i32), (i32, i32))> for Move {
    fn from((from, to): ((i32, i32), (i32, i32))) -> Self {
        Move::new(from.into(), to.into())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.from, self.to)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveParseError {
    #[error("expected two coordinates, got {0}")]
    Arity(usize),
    #[error("expected row,col, got '{0}'")]
    Coordinate(String),
}

fn parse_square(s: &str) -> Result<Square, MoveParseError> {
    let bad = || MoveParseError::Coordinate(s.to_string());
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 2 {
        return Err(bad());
    }
    let row = parts[0].parse().map_err(|_| bad())?;
    let col = parts[1].parse().map_err(|_| bad())?;
    Ok(Square::new(row, col))
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let coords: Vec<&str> = s.split_whitespace().collect();
        if coords.len() != 2 {
            return Err(MoveParseError::Arity(coords.len()));
        }
        Ok(Move::new(parse_square(coords[0])?, parse_square(coords[1])?))
    }
}

/// Pseudo-legal moves of one side, partitioned by kind.
///
/// Captures carry the material value of the captured piece so they can be
/// ordered; promotions (including pawn captures onto the last row) are kept
/// apart from captures.
#[derive(Clone, Debug, Default)]
pub struct MoveList {
    pub promotions: Vec<Move>,
    pub captures: Vec<(Move, i32)>,
    pub quiets: Vec<Move>,
}

impl MoveList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.promotions.len() + self.captures.len() + self.quiets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sort captures by descending captured value. The sort is stable, so
    /// captures of equal value keep generation order.
    pub fn sort_captures(&mut self) {
        self.captures.sort_by(|a, b| b.1.cmp(&a.1));
    }

    /// All moves in search order: promotions, captures, then quiet moves.
    pub fn ordered(&self) -> Vec<Move> {
        let mut out = Vec::with_capacity(self.len());
        out.extend_from_slice(&self.promotions);
        out.extend(self.captures.iter().map(|(m, _)| *m));
        out.extend_from_slice(&self.quiets);
        out
    }

    pub fn contains(&self, mv: Move) -> bool {
        self.promotions.contains(&mv)
            || self.captures.iter().any(|(m, _)| *m == mv)
            || self.quiets.contains(&mv)
    }
}
