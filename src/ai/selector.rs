use log::{debug, info, warn};

use crate::ai::positional::PositionalEvaluator;
use crate::ai::search::{MAX_SCORE, MIN_SCORE, Searcher};
use crate::board::Board;
use crate::types::{Position, Side};

pub const DEFAULT_DEPTH: u8 = 3;

/// Score a candidate has to beat before it can be selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Baseline {
    /// Start from 0: when no candidate scores above 0, nothing is selected.
    #[default]
    Zero,
    /// Start from negative infinity: the first candidate always qualifies.
    NegInfinity,
}

impl Baseline {
    fn initial_score(self) -> i32 {
        match self {
            Baseline::Zero => 0,
            Baseline::NegInfinity => MIN_SCORE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies searched below each candidate move.
    pub depth: u8,
    pub baseline: Baseline,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            baseline: Baseline::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Index into the candidate list of the chosen move, if any beat the baseline.
    pub index: Option<usize>,
    pub best_move: Option<Position>,
    pub best_score: i32,
    /// Search score per candidate, in candidate order.
    pub scores: Vec<i32>,
    pub nodes: u64,
}

impl Selection {
    /// The selected move, or the first candidate when nothing beat the
    /// baseline.
    pub fn move_or_first(&self, candidates: &[Position]) -> Option<Position> {
        self.best_move.or_else(|| {
            let fallback = candidates.first().copied();
            if let Some(mv) = fallback {
                warn!(
                    "no candidate beat the baseline, falling back to ({}, {})",
                    mv.row, mv.col
                );
            }
            fallback
        })
    }
}

/// Scores every candidate with a fixed-depth search and keeps the first one
/// with the strictly highest score above the baseline.
pub fn select_move(board: &Board, candidates: &[Position], config: &SearchConfig) -> Selection {
    let evaluator = PositionalEvaluator;
    let mut searcher = Searcher::new(&evaluator);
    let me: Side = board.side_to_move();

    let mut index = None;
    let mut best_score = config.baseline.initial_score();
    let mut scores = Vec::with_capacity(candidates.len());

    for (i, &candidate) in candidates.iter().enumerate() {
        let next = board.successor(candidate);
        let score = searcher.search(&next, config.depth, MIN_SCORE, MAX_SCORE, me);
        debug!(
            "candidate ({}, {}) scored {score}",
            candidate.row, candidate.col
        );

        if score > best_score {
            index = Some(i);
            best_score = score;
        }
        scores.push(score);
    }

    let best_move = index.map(|i| candidates[i]);
    match best_move {
        Some(mv) => info!(
            "{:?} selects ({}, {}) with score {best_score} after {} nodes",
            me,
            mv.row,
            mv.col,
            searcher.nodes()
        ),
        None => debug!("no candidate beat the {:?} baseline", config.baseline),
    }

    Selection {
        index,
        best_move,
        best_score,
        scores,
        nodes: searcher.nodes(),
    }
}
