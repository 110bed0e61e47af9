//! Move legality
//!
//! Checks a single proposed move against the movement rules without using the
//! move generator, so that moves coming from outside (bots, humans) are
//! verified independently.
//!
//! Moving into a position where the own king can be captured is legal: the
//! game is won by capturing the king, not by checkmate.

use crate::core::{Board, Color, Move, PlayerSequence, Role, Square};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("square {0} is off the board")]
    OutOfBounds(Square),
    #[error("no piece on {0}")]
    NoPiece(Square),
    #[error("piece on {square} belongs to {found}, not {expected}")]
    WrongColor {
        square: Square,
        expected: Color,
        found: Color,
    },
    #[error("{0:?} cannot move that way")]
    Movement(Role),
}

/// Whether `mv` is legal for the side to move of `sequence` on `board`.
///
/// `board` must be in the mover's frame.
pub fn is_valid_move(sequence: &PlayerSequence, mv: Move, board: &Board) -> bool {
    check_move(sequence, mv, board).is_ok()
}

/// Like [`is_valid_move`], reporting the first rule the move breaks.
pub fn check_move(sequence: &PlayerSequence, mv: Move, board: &Board) -> Result<(), IllegalMove> {
    let mover = sequence.mover();
    let (start, end) = (mv.from, mv.to);

    if !board.in_bounds(start) {
        return Err(IllegalMove::OutOfBounds(start));
    }
    if !board.in_bounds(end) {
        return Err(IllegalMove::OutOfBounds(end));
    }

    let piece = board.piece_at(start).ok_or(IllegalMove::NoPiece(start))?;
    if piece.color != mover.color {
        return Err(IllegalMove::WrongColor {
            square: start,
            expected: mover.color,
            found: piece.color,
        });
    }

    let rules = Rules {
        board,
        sequence,
        team: mover.team,
        start,
        end,
    };
    let ok = match piece.role {
        Role::Pawn => rules.pawn(),
        Role::Knight => rules.knight(),
        Role::Bishop => rules.diagonal(),
        Role::Rook => rules.along_axis(),
        Role::Queen => rules.diagonal() != rules.along_axis(),
        Role::King => rules.king(),
    };

    if ok { Ok(()) } else { Err(IllegalMove::Movement(piece.role)) }
}

/// True when no king of `color` remains on `board`.
pub fn is_defeated(color: Color, board: &Board) -> bool {
    board.king_square(color).is_none()
}

struct Rules<'a> {
    board: &'a Board,
    sequence: &'a PlayerSequence,
    team: u8,
    start: Square,
    end: Square,
}

impl Rules<'_> {
    fn is_free(&self, sq: Square) -> bool {
        self.board.is_empty_at(sq)
    }

    /// Occupied by a piece of another team (or of an unseated colour).
    fn is_opponent(&self, sq: Square) -> bool {
        match self.board.piece_at(sq) {
            Some(p) => self.sequence.team_of(p.color) != Some(self.team),
            None => false,
        }
    }

    fn can_move_or_capture(&self, sq: Square) -> bool {
        self.is_free(sq) || self.is_opponent(sq)
    }

    fn delta(&self) -> (i32, i32) {
        (self.end.row - self.start.row, self.end.col - self.start.col)
    }

    fn pawn(&self) -> bool {
        let (dr, dc) = self.delta();
        if dr != 1 {
            return false;
        }
        if dc == 0 {
            return self.is_free(self.end);
        }
        dc.abs() == 1 && self.is_opponent(self.end)
    }

    fn knight(&self) -> bool {
        let (dr, dc) = self.delta();
        let (dr, dc) = (dr.abs(), dc.abs());
        ((dr == 1 && dc == 2) || (dr == 2 && dc == 1)) && self.can_move_or_capture(self.end)
    }

    fn king(&self) -> bool {
        let (dr, dc) = self.delta();
        dr.abs() <= 1 && dc.abs() <= 1 && self.can_move_or_capture(self.end)
    }

    /// Every square strictly between start and end is empty.
    fn path_clear(&self, step: (i32, i32), distance: i32) -> bool {
        (1..distance).all(|i| self.is_free(self.start.offset(step.0 * i, step.1 * i)))
    }

    fn diagonal(&self) -> bool {
        let (dr, dc) = self.delta();
        if dr.abs() != dc.abs() {
            return false;
        }
        self.path_clear((dr.signum(), dc.signum()), dr.abs()) && self.can_move_or_capture(self.end)
    }

    fn along_axis(&self) -> bool {
        let (dr, dc) = self.delta();
        if (dr == 0) == (dc == 0) {
            return false;
        }
        self.path_clear((dr.signum(), dc.signum()), dr.abs() + dc.abs())
            && self.can_move_or_capture(self.end)
    }
}
