use log::trace;

use crate::ai::positional::{Evaluator, is_corner};
use crate::board::Board;
use crate::types::Side;

pub const MIN_SCORE: i32 = i32::MIN;
pub const MAX_SCORE: i32 = i32::MAX;
/// Charged against lines where the minimizing side takes a corner.
pub const CORNER_REPLY_PENALTY: i32 = 50_000;

/// Fixed-depth minimax with alpha-beta pruning.
///
/// A node maximizes when its side to move equals the tracked maximizing side.
/// Maximizing nodes pass that side down unchanged; minimizing nodes hand their
/// children the opponent of it.
pub struct Searcher<'a, E: Evaluator> {
    evaluator: &'a E,
    nodes: u64,
}

impl<'a, E: Evaluator> Searcher<'a, E> {
    pub fn new(evaluator: &'a E) -> Self {
        Self {
            evaluator,
            nodes: 0,
        }
    }

    /// Nodes visited since construction.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn search(
        &mut self,
        board: &Board,
        depth: u8,
        alpha: i32,
        beta: i32,
        maximizing: Side,
    ) -> i32 {
        self.nodes += 1;

        if depth == 0 || board.is_finished() {
            return self.evaluator.evaluate(board);
        }

        if board.side_to_move() == maximizing {
            self.max_node(board, depth, alpha, beta, maximizing)
        } else {
            self.min_node(board, depth, alpha, beta, maximizing)
        }
    }

    fn max_node(
        &mut self,
        board: &Board,
        depth: u8,
        alpha: i32,
        beta: i32,
        maximizing: Side,
    ) -> i32 {
        let mut best = MIN_SCORE;
        let mut alpha = alpha;

        for &mv in board.legal_moves() {
            let next = board.successor(mv);
            let score = self.search(&next, depth - 1, alpha, beta, maximizing);

            best = best.max(score);
            alpha = alpha.max(score);
            if beta <= alpha {
                trace!("beta cutoff at depth {depth} after {mv:?}");
                break;
            }
        }

        best
    }

    fn min_node(
        &mut self,
        board: &Board,
        depth: u8,
        alpha: i32,
        beta: i32,
        maximizing: Side,
    ) -> i32 {
        let mut best = MAX_SCORE;
        let mut beta = beta;

        for &mv in board.legal_moves() {
            let next = board.successor(mv);
            let penalty = if is_corner(mv) {
                CORNER_REPLY_PENALTY
            } else {
                0
            };
            // The child's window is shifted by the penalty so its bounds
            // still hold once the penalty is taken off.
            let score = self
                .search(
                    &next,
                    depth - 1,
                    alpha.saturating_add(penalty),
                    beta.saturating_add(penalty),
                    maximizing.opponent(),
                )
                .saturating_sub(penalty);

            best = best.min(score);
            beta = beta.min(score);
            if beta <= alpha {
                trace!("alpha cutoff at depth {depth} after {mv:?}");
                break;
            }
        }

        best
    }
}
