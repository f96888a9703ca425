use once_cell::sync::Lazy;

use crate::board::{BOARD_SIZE, Board, NUM_SQUARES};
use crate::types::Position;

const MOBILITY_PENALTY: i32 = 10;

/// Geometric class of a square. Classes are checked in declaration order and
/// the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquareClass {
    Corner,
    Edge,
    /// Diagonal neighbour of a corner.
    XSquare,
    /// Border neighbour of a corner.
    CSquare,
    InnerGoodCorner,
    InnerBadEdge,
    InnerGoodEdge,
    Interior,
}

impl SquareClass {
    pub fn of(pos: Position) -> Self {
        let (r, c) = (pos.row, pos.col);
        if is_corner(pos) {
            Self::Corner
        } else if ring_band(r, c, 0, 2..=5) {
            Self::Edge
        } else if matches!((r, c), (1, 1) | (1, 6) | (6, 1) | (6, 6)) {
            Self::XSquare
        } else if is_c_square(r, c) {
            Self::CSquare
        } else if matches!((r, c), (2, 5) | (5, 2) | (5, 5)) {
            Self::InnerGoodCorner
        } else if ring_band(r, c, 1, 2..=5) {
            Self::InnerBadEdge
        } else if ring_band(r, c, 2, 3..=4) {
            Self::InnerGoodEdge
        } else {
            Self::Interior
        }
    }

    pub fn weight(self) -> i32 {
        match self {
            Self::Corner => 500_000,
            Self::Edge => 1_000,
            Self::XSquare | Self::CSquare => -5_000,
            Self::InnerGoodCorner => 50,
            Self::InnerBadEdge => 0,
            Self::InnerGoodEdge => 100,
            Self::Interior => 0,
        }
    }
}

static SQUARE_WEIGHTS: Lazy<[i32; NUM_SQUARES]> = Lazy::new(|| {
    let mut weights = [0; NUM_SQUARES];
    for (idx, weight) in weights.iter_mut().enumerate() {
        let pos = Position::new((idx / BOARD_SIZE) as i32, (idx % BOARD_SIZE) as i32);
        *weight = SquareClass::of(pos).weight();
    }
    weights
});

static GEOMETRY_SCORE: Lazy<i32> = Lazy::new(|| SQUARE_WEIGHTS.iter().sum());

/// Static board scorer used at search cutoffs.
pub trait Evaluator {
    fn evaluate(&self, board: &Board) -> i32;
}

/// Scores board geometry minus a mobility penalty for the side to move.
///
/// Every square contributes its weight whether or not it is occupied, so the
/// geometric part is the same for every position and only mobility varies.
#[derive(Debug, Default, Clone, Copy)]
pub struct PositionalEvaluator;

impl PositionalEvaluator {
    pub fn geometry_score() -> i32 {
        *GEOMETRY_SCORE
    }
}

impl Evaluator for PositionalEvaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        *GEOMETRY_SCORE - MOBILITY_PENALTY * board.legal_moves().len() as i32
    }
}

pub fn is_corner(pos: Position) -> bool {
    let last = BOARD_SIZE as i32 - 1;
    (pos.row == 0 || pos.row == last) && (pos.col == 0 || pos.col == last)
}

/// True when the square sits on ring `ring` (0 = border) with its running
/// index along that ring inside `band`. A square whose row is inside `band`
/// only qualifies through its column.
fn ring_band(r: i32, c: i32, ring: i32, band: std::ops::RangeInclusive<i32>) -> bool {
    let far = BOARD_SIZE as i32 - 1 - ring;
    if band.contains(&r) {
        c == ring || c == far
    } else if band.contains(&c) {
        r == ring || r == far
    } else {
        false
    }
}

fn is_c_square(r: i32, c: i32) -> bool {
    if r == 1 || r == 6 {
        c == 0 || c == 7
    } else if c == 1 || c == 6 {
        r == 0 || r == 7
    } else {
        false
    }
}
