//! Pseudo-legal move generation
//!
//! Moves are generated in the frame of the side to move: its pawns advance
//! toward increasing rows and promote on the last row. No king-safety
//! filtering happens here.
//!
//! Sliding pieces (bishop, rook, queen) travel at most `height - 1` squares.

use crate::core::{Board, Color, Move, MoveList, Role, Square};

use super::eval::piece_value;

const PAWN_PUSH: [(i32, i32); 1] = [(1, 0)];

const PAWN_CAPTURES: [(i32, i32); 2] = [(1, -1), (1, 1)];

const ROOK_DIRS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

const BISHOP_DIRS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

const KNIGHT_JUMPS: [(i32, i32); 8] = [
    (2, -1),
    (2, 1),
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
];

const KING_DIRS: [(i32, i32); 8] = [
    (0, -1),
    (0, 1),
    (-1, 0),
    (1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

const QUEEN_DIRS: [(i32, i32); 8] = KING_DIRS;

fn directions(role: Role) -> &'static [(i32, i32)] {
    match role {
        Role::Pawn => &PAWN_PUSH,
        Role::Knight => &KNIGHT_JUMPS,
        Role::Bishop => &BISHOP_DIRS,
        Role::Rook => &ROOK_DIRS,
        Role::Queen => &QUEEN_DIRS,
        Role::King => &KING_DIRS,
    }
}

#[inline]
fn is_slider(role: Role) -> bool {
    matches!(role, Role::Bishop | Role::Rook | Role::Queen)
}

pub struct MoveGen;

impl MoveGen {
    /// All pseudo-legal moves for `color`, treating every other colour as an enemy.
    pub fn generate(board: &Board, color: Color) -> MoveList {
        Self::generate_with(board, color, |c| c != color)
    }

    /// All pseudo-legal moves for `color`. `is_enemy` decides which foreign
    /// pieces may be captured; pieces it rejects block like friendly ones.
    ///
    /// Captures are sorted by descending captured value.
    pub fn generate_with<F>(board: &Board, color: Color, is_enemy: F) -> MoveList
    where
        F: Fn(Color) -> bool,
    {
        let mut list = MoveList::new();
        for (sq, piece) in board.pieces_of(color) {
            Self::add_piece_moves(board, sq, piece.role, &is_enemy, &mut list);
        }
        list.sort_captures();
        list
    }

    /// Pseudo-legal moves of the piece on `from`. Empty if the square is empty.
    pub fn piece_moves(board: &Board, from: Square) -> MoveList {
        let Some(piece) = board.piece_at(from) else {
            return MoveList::new();
        };
        Self::piece_moves_with(board, from, |c| c != piece.color)
    }

    /// Pseudo-legal moves of the piece on `from`, capturing only colours
    /// accepted by `is_enemy`.
    pub fn piece_moves_with<F>(board: &Board, from: Square, is_enemy: F) -> MoveList
    where
        F: Fn(Color) -> bool,
    {
        let mut list = MoveList::new();
        if let Some(piece) = board.piece_at(from) {
            Self::add_piece_moves(board, from, piece.role, &is_enemy, &mut list);
            list.sort_captures();
        }
        list
    }

    /// Destination squares of the piece on `from`.
    pub fn destinations(board: &Board, from: Square) -> Vec<Square> {
        Self::piece_moves(board, from)
            .ordered()
            .into_iter()
            .map(|m| m.to)
            .collect()
    }

    fn add_piece_moves<F>(board: &Board, from: Square, role: Role, is_enemy: &F, list: &mut MoveList)
    where
        F: Fn(Color) -> bool,
    {
        let max_dist = if is_slider(role) { board.last_row() } else { 1 };
        let last_row = board.last_row();

        for &(dr, dc) in directions(role) {
            for i in 1..=max_dist {
                let to = from.offset(i * dr, i * dc);
                let Some(cell) = board.get(to) else {
                    break;
                };
                let mv = Move::new(from, to);

                match cell.piece() {
                    None => {
                        if role == Role::Pawn && to.row == last_row {
                            list.promotions.push(mv);
                        } else {
                            list.quiets.push(mv);
                        }
                    }
                    Some(target) => {
                        // pawns never capture straight ahead
                        if role != Role::Pawn && is_enemy(target.color) {
                            list.captures.push((mv, piece_value(target.role)));
                        }
                        break;
                    }
                }
            }
        }

        if role == Role::Pawn {
            for &(dr, dc) in &PAWN_CAPTURES {
                let to = from.offset(dr, dc);
                let Some(target) = board.piece_at(to) else {
                    continue;
                };
                if !is_enemy(target.color) {
                    continue;
                }
                let mv = Move::new(from, to);
                if to.row < last_row {
                    list.captures.push((mv, piece_value(target.role)));
                } else {
                    list.promotions.push(mv);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Piece;

    fn board_with(height: usize, width: usize, pieces: &[((i32, i32), Role, Color)]) -> Board {
        let mut board = Board::empty(height, width);
        for &(sq, role, color) in pieces {
            board.put(sq.into(), Piece::new(role, color));
        }
        board
    }

    #[test]
    fn test_knight_center() {
        let board = board_with(5, 5, &[((2, 2), Role::Knight, Color::White)]);
        assert_eq!(MoveGen::generate(&board, Color::White).len(), 8);
    }

    #[test]
    fn test_knight_corner() {
        let board = board_with(5, 5, &[((0, 0), Role::Knight, Color::White)]);
        assert_eq!(MoveGen::generate(&board, Color::White).len(), 2);
    }

    #[test]
    fn test_king_corner() {
        let board = board_with(4, 4, &[((0, 0), Role::King, Color::White)]);
        assert_eq!(MoveGen::generate(&board, Color::White).len(), 3);
    }

    #[test]
    fn test_rook_empty_board() {
        let board = board_with(8, 8, &[((3, 4), Role::Rook, Color::White)]);
        assert_eq!(MoveGen::generate(&board, Color::White).len(), 14);
    }

    #[test]
    fn test_slide_limited_by_height() {
        // 2 rows: a rook may only travel one square sideways
        let board = board_with(2, 6, &[((0, 0), Role::Rook, Color::White)]);
        let list = MoveGen::generate(&board, Color::White);
        assert_eq!(list.len(), 2);
        assert!(list.contains(Move::from(((0, 0), (0, 1)))));
        assert!(list.contains(Move::from(((0, 0), (1, 0)))));
    }

    #[test]
    fn test_pawn_blocked() {
        let board = board_with(
            3,
            1,
            &[((1, 0), Role::Pawn, Color::White), ((2, 0), Role::Pawn, Color::Black)],
        );
        assert!(MoveGen::generate(&board, Color::White).is_empty());
    }

    #[test]
    fn test_pawn_push_promotes() {
        let board = board_with(2, 1, &[((0, 0), Role::Pawn, Color::White)]);
        let list = MoveGen::generate(&board, Color::White);
        assert_eq!(list.promotions, vec![Move::from(((0, 0), (1, 0)))]);
        assert!(list.quiets.is_empty());
    }
}
