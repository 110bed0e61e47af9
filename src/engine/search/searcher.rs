//! Searcher: iterative deepening driver, deadline and search entry point.

use std::time::Instant;

use crate::core::{Board, Color, Move, PlayerSequence, Seat, Square};

use super::types::{SearchLimits, SearchStats, Timeout};

pub struct Searcher {
    pub(super) limits: SearchLimits,
    pub(super) stats: SearchStats,
    pub(super) sequence: PlayerSequence,
    /// Side to move at the root, then its opponent.
    pub(super) sides: [Seat; 2],
    pub(super) deadline: Instant,
    /// Set when a node is cut off by the depth limit during the current iteration.
    pub(super) horizon_hit: bool,
}

impl Searcher {
    pub fn new(limits: SearchLimits) -> Self {
        let sequence = PlayerSequence::two_player(Color::White, Color::Black);
        let sides = [sequence.mover(), sequence.next()];
        Searcher {
            limits,
            stats: SearchStats::default(),
            sequence,
            sides,
            deadline: Instant::now(),
            horizon_hit: false,
        }
    }

    pub fn limits(&self) -> &SearchLimits {
        &self.limits
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub(super) fn check_deadline(&self) -> Result<(), Timeout> {
        if Instant::now() >= self.deadline {
            Err(Timeout)
        } else {
            Ok(())
        }
    }

    /// Choose a move for the side to move of `sequence` on `board` (in that
    /// side's frame).
    ///
    /// Returns the best move of the deepest completed iteration. When the side
    /// has pieces but nothing to play, the null move on its first piece is
    /// returned; without pieces, the null move on `(0, 0)`.
    pub fn search(&mut self, sequence: &PlayerSequence, board: &Board) -> Move {
        let start = Instant::now();
        let usable = self.limits.time_budget.saturating_sub(self.limits.safety_margin);
        self.deadline = start + usable;
        self.stats = SearchStats::default();
        self.sequence = sequence.clone();
        self.sides = [sequence.mover(), sequence.next()];

        let color = self.sides[0].color;
        let mut moves = self.moves_for(board, 0);
        if moves.is_empty() && self.limits.king_safety {
            // every move hangs the king; any move still beats standing still
            moves = self.pseudo_legal(board, 0);
        }
        let Some(&first) = moves.first() else {
            let at = board
                .pieces_of(color)
                .map(|(sq, _)| sq)
                .next()
                .unwrap_or(Square::new(0, 0));
            return Move::null(at);
        };

        let mut best_move = first;
        for depth in 1..=self.limits.max_depth {
            self.horizon_hit = false;
            match self.search_root(board, &moves, depth) {
                Ok((mv, score)) => {
                    best_move = mv;
                    self.stats.depth = depth;
                    log::trace!("depth {} score {} move {}", depth, score, mv);
                    if !self.horizon_hit {
                        self.stats.exhausted = true;
                        break;
                    }
                }
                Err(Timeout) => break,
            }
        }

        log::debug!(
            "{} searched depth {} ({} nodes, {} ms){}",
            color,
            self.stats.depth,
            self.stats.nodes,
            start.elapsed().as_millis(),
            if self.stats.exhausted { ", tree exhausted" } else { "" }
        );

        best_move
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(SearchLimits::default())
    }
}
