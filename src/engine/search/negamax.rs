//! Negamax with alpha-beta pruning.
//!
//! Every node holds a board in the frame of its side to move. A child is the
//! parent board with the move played, turned into the opponent's frame, so
//! move generation and promotion always work "upward".

use crate::core::{Board, Color, Move};
use crate::engine::eval::evaluate;
use crate::engine::movegen::MoveGen;

use super::searcher::Searcher;
use super::types::{INFINITY, MATE_SCORE, Timeout};

impl Searcher {
    #[inline]
    fn color(&self, side: usize) -> Color {
        self.sides[side].color
    }

    /// Quarter turns from `side`'s frame to its opponent's.
    #[inline]
    fn turn_to_opponent(&self, side: usize) -> u8 {
        let from = self.sides[side].rotation;
        let to = self.sides[1 - side].rotation;
        (to + 4 - from) % 4
    }

    pub(super) fn pseudo_legal(&self, board: &Board, side: usize) -> Vec<Move> {
        let color = self.color(side);
        MoveGen::generate_with(board, color, |c| !self.sequence.same_team(c, color)).ordered()
    }

    /// Ordered candidate moves, filtered for king safety when enabled.
    pub(super) fn moves_for(&self, board: &Board, side: usize) -> Vec<Move> {
        let moves = self.pseudo_legal(board, side);
        if !self.limits.king_safety {
            return moves;
        }
        moves
            .into_iter()
            .filter(|&mv| {
                let mut after = board.clone();
                after.play(mv);
                self.king_safe(&after, side)
            })
            .collect()
    }

    /// No opponent capture lands on `side`'s king. Vacuously true without a king.
    pub(super) fn king_safe(&self, board: &Board, side: usize) -> bool {
        let color = self.color(side);
        let theirs = board.rotated(self.turn_to_opponent(side));
        let Some(king) = theirs.king_square(color) else {
            return true;
        };
        let enemy = self.color(1 - side);
        let replies = MoveGen::generate_with(&theirs, enemy, |c| !self.sequence.same_team(c, enemy));
        !replies
            .captures
            .iter()
            .map(|(m, _)| m)
            .chain(replies.promotions.iter())
            .any(|m| m.to == king)
    }

    fn child(&self, board: &Board, side: usize, mv: Move) -> Board {
        let mut next = board.clone();
        next.play(mv);
        next.rotated(self.turn_to_opponent(side))
    }

    /// Best move and score at the root for a fixed depth.
    pub(super) fn search_root(&mut self, board: &Board, moves: &[Move], depth: u32) -> Result<(Move, i32), Timeout> {
        self.stats.nodes += 1;
        let mut best_move = moves[0];
        let mut best_score = -INFINITY;
        let mut alpha = -INFINITY;
        let beta = INFINITY;

        for &mv in moves {
            self.check_deadline()?;
            let child = self.child(board, 0, mv);
            let score = -self.negamax(&child, 1, depth - 1, -beta, -alpha)?;

            if score > best_score {
                best_score = score;
                best_move = mv;
            }
            if score > alpha {
                alpha = score;
            }
        }

        Ok((best_move, best_score))
    }

    pub(super) fn negamax(
        &mut self,
        board: &Board,
        side: usize,
        depth: u32,
        mut alpha: i32,
        beta: i32,
    ) -> Result<i32, Timeout> {
        self.stats.nodes += 1;
        self.check_deadline()?;

        let color = self.color(side);
        if depth == 0 {
            self.horizon_hit = true;
            return Ok(evaluate(board, &self.sequence, color));
        }

        let moves = self.moves_for(board, side);
        if moves.is_empty() {
            if self.limits.king_safety && !self.king_safe(board, side) {
                return Ok(-MATE_SCORE);
            }
            return Ok(evaluate(board, &self.sequence, color));
        }

        let mut best_score = -INFINITY;
        for mv in moves {
            self.check_deadline()?;
            let child = self.child(board, side, mv);
            let score = -self.negamax(&child, 1 - side, depth - 1, -beta, -alpha)?;

            if score > best_score {
                best_score = score;
            }
            if best_score > alpha {
                alpha = best_score;
            }
            if alpha >= beta {
                break;
            }
        }

        Ok(best_score)
    }
}
