//! Text protocol spoken with the tournament harness.
//!
//! Request: side id, 64 cell codes row-major, legal-move count, then that
//! many `row col` pairs, all whitespace separated. Reply: `row col\n`.

use std::io::Write;
use std::str::SplitWhitespace;

use crate::ai::selector::{SearchConfig, select_move};
use crate::board::{BOARD_SIZE, Board, Grid};
use crate::error::ProtocolError;
use crate::types::{Cell, Position, Side};

/// A parsed turn request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    pub side: Side,
    pub grid: Grid,
    /// Legal moves as supplied by the harness, in supplied order.
    pub legal_moves: Vec<Position>,
}

impl MoveRequest {
    /// Seeds a board from the request's grid and side.
    pub fn board(&self) -> Board {
        Board::from_position(self.grid, self.side)
    }

    /// Searches the supplied legal moves and returns the reply to send.
    pub fn choose(&self, config: &SearchConfig) -> Option<Position> {
        let board = self.board();
        select_move(&board, &self.legal_moves, config).move_or_first(&self.legal_moves)
    }
}

pub fn parse_request(input: &str) -> Result<MoveRequest, ProtocolError> {
    let mut tokens = input.split_whitespace();

    let side_id = next_int(&mut tokens, "side")?;
    let side = u8::try_from(side_id)
        .ok()
        .and_then(Side::from_code)
        .ok_or(ProtocolError::InvalidSide(side_id))?;

    let mut grid = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
    for (index, cell) in grid.iter_mut().flatten().enumerate() {
        let code = next_int(&mut tokens, "cell")?;
        *cell = u8::try_from(code)
            .ok()
            .and_then(Cell::from_code)
            .ok_or(ProtocolError::InvalidCell { index, code })?;
    }

    let count = next_int(&mut tokens, "legal move count")?;
    let count = usize::try_from(count).map_err(|_| ProtocolError::InvalidInteger {
        field: "legal move count",
        token: count.to_string(),
    })?;

    let mut legal_moves = Vec::with_capacity(count);
    for _ in 0..count {
        let row = next_int(&mut tokens, "move row")?;
        let col = next_int(&mut tokens, "move column")?;
        let size = BOARD_SIZE as i64;
        if !(0..size).contains(&row) || !(0..size).contains(&col) {
            return Err(ProtocolError::CoordinateOutOfRange { row, col });
        }
        legal_moves.push(Position::new(row as i32, col as i32));
    }

    Ok(MoveRequest {
        side,
        grid,
        legal_moves,
    })
}

/// Writes the chosen move and flushes so the harness sees it immediately.
pub fn write_move<W: Write>(out: &mut W, pos: Position) -> Result<(), ProtocolError> {
    writeln!(out, "{} {}", pos.row, pos.col)?;
    out.flush()?;
    Ok(())
}

fn next_int(tokens: &mut SplitWhitespace<'_>, field: &'static str) -> Result<i64, ProtocolError> {
    let token = tokens.next().ok_or(ProtocolError::MissingToken { field })?;
    token.parse().map_err(|_| ProtocolError::InvalidInteger {
        field,
        token: token.to_string(),
    })
}
