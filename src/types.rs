use std::ops::{Add, Sub};

use serde::Serialize;

/// A board coordinate. Signed so direction walks can step off the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.row - rhs.row, self.col - rhs.col)
    }
}

/// One of the two players. Black moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Side {
    Black,
    White,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }

    /// Protocol code: 1 = black, 2 = white.
    pub fn code(self) -> u8 {
        match self {
            Side::Black => 1,
            Side::White => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Side> {
        match code {
            1 => Some(Side::Black),
            2 => Some(Side::White),
            _ => None,
        }
    }

    pub fn cell(self) -> Cell {
        match self {
            Side::Black => Cell::Black,
            Side::White => Cell::White,
        }
    }

    /// Glyph used by the board renderer.
    pub fn symbol(self) -> &'static str {
        match self {
            Side::Black => "O",
            Side::White => "X",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    /// Protocol code: 0 = empty, 1 = black, 2 = white. Also the tally index.
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Black => 1,
            Cell::White => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Cell> {
        match code {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Black),
            2 => Some(Cell::White),
            _ => None,
        }
    }
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Winner(Side),
    Draw,
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub board: Vec<u8>,
    pub current_player: u8,
    pub black_count: u8,
    pub white_count: u8,
    pub is_game_over: bool,
    pub legal_moves: Vec<Position>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// 1 = black, 2 = white, 0 = draw.
    pub winner: u8,
    pub black_count: u8,
    pub white_count: u8,
    /// `true` when the game ended because a side attempted an illegal move.
    pub forfeit: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_arithmetic_is_component_wise() {
        let p = Position::new(3, 4);
        let d = Position::new(-1, 1);

        assert_eq!(p + d, Position::new(2, 5));
        assert_eq!(p - d, Position::new(4, 3));
        assert_eq!(p + d - d, p);
    }

    #[test]
    fn codes_round_trip_for_valid_values_only() {
        assert_eq!(Side::from_code(Side::White.code()), Some(Side::White));
        assert_eq!(Side::from_code(0), None);
        assert_eq!(Cell::from_code(3), None);
        assert_eq!(Side::Black.opponent().cell(), Cell::White);
    }
}
