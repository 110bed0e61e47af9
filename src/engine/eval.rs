//! Material evaluation
//!
//! Values: pawn 1, knight 3, bishop 3, rook 5, queen 9. The king is worth a
//! sentinel far above any material total so that losing it outweighs
//! everything else.

use crate::core::{Board, Color, PlayerSequence, Role};

pub const KING_VALUE: i32 = 10_000;

#[inline]
pub fn piece_value(role: Role) -> i32 {
    match role {
        Role::Pawn => 1,
        Role::Knight => 3,
        Role::Bishop => 3,
        Role::Rook => 5,
        Role::Queen => 9,
        Role::King => KING_VALUE,
    }
}

/// Signed material sum, positive when `color` is ahead.
///
/// Pieces of `color`'s team count for it, pieces of any other seated team
/// count against it. Unseated colours are ignored.
pub fn evaluate(board: &Board, sequence: &PlayerSequence, color: Color) -> i32 {
    let Some(team) = sequence.team_of(color) else {
        return 0;
    };
    board
        .pieces()
        .map(|(_, p)| match sequence.team_of(p.color) {
            Some(t) if t == team => piece_value(p.role),
            Some(_) => -piece_value(p.role),
            None => 0,
        })
        .sum()
}

/// Material of a single colour.
pub fn material(board: &Board, color: Color) -> i32 {
    board.pieces_of(color).map(|(_, p)| piece_value(p.role)).sum()
}
