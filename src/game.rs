use log::{info, warn};

use crate::ai::selector::{SearchConfig, select_move};
use crate::board::{Board, MoveOutcome};
use crate::error::GameError;
use crate::types::{Cell, GameResult, GameState, Outcome, Position, Side};

pub trait MoveSelector: Send + Sync {
    fn select_move(&self, board: &Board) -> Option<Position>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&self, board: &Board) -> Option<Position> {
        board.legal_moves().first().copied()
    }
}

/// Picks moves with the fixed-depth alpha-beta search.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlphaBetaSelector {
    pub config: SearchConfig,
}

impl AlphaBetaSelector {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }
}

impl MoveSelector for AlphaBetaSelector {
    fn select_move(&self, board: &Board) -> Option<Position> {
        let candidates = board.legal_moves();
        select_move(board, candidates, &self.config).move_or_first(candidates)
    }
}

/// One played turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    pub side: Side,
    pub mv: Position,
    pub outcome: MoveOutcome,
}

/// Drives a match between two selectors on a single board.
pub struct GameInstance {
    board: Board,
    black: Box<dyn MoveSelector>,
    white: Box<dyn MoveSelector>,
    history: Vec<Turn>,
}

impl GameInstance {
    pub fn new(black: Box<dyn MoveSelector>, white: Box<dyn MoveSelector>) -> Self {
        Self {
            board: Board::new(),
            black,
            white,
            history: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    pub fn is_game_over(&self) -> bool {
        self.board.is_finished()
    }

    /// Asks the side to move for a move and applies it. An illegal answer
    /// forfeits the game.
    pub fn step(&mut self) -> Result<Turn, GameError> {
        if self.board.is_finished() {
            return Err(GameError::GameOver);
        }

        let side = self.board.side_to_move();
        let selector = match side {
            Side::Black => &self.black,
            Side::White => &self.white,
        };
        let mv = selector
            .select_move(&self.board)
            .ok_or(GameError::NoMoveSelected(side))?;

        let outcome = self.board.apply_move(mv);
        if outcome == MoveOutcome::Forfeit {
            warn!("{side:?} attempted illegal move ({}, {})", mv.row, mv.col);
        }

        let turn = Turn { side, mv, outcome };
        self.history.push(turn);
        Ok(turn)
    }

    pub fn play_to_end(&mut self) -> Result<GameResult, GameError> {
        while !self.board.is_finished() {
            self.step()?;
        }
        let result = self.to_game_result();
        info!(
            "game over after {} turns: black {} white {}",
            self.history.len(),
            result.black_count,
            result.white_count
        );
        Ok(result)
    }

    pub fn to_game_state(&self) -> GameState {
        GameState {
            board: self.board.to_codes(),
            current_player: self.board.side_to_move().code(),
            black_count: self.board.disc_count(Cell::Black),
            white_count: self.board.disc_count(Cell::White),
            is_game_over: self.board.is_finished(),
            legal_moves: self.board.legal_moves().to_vec(),
        }
    }

    pub fn to_game_result(&self) -> GameResult {
        GameResult {
            winner: match self.board.winner() {
                Some(Outcome::Winner(side)) => side.code(),
                Some(Outcome::Draw) | None => 0,
            },
            black_count: self.board.disc_count(Cell::Black),
            white_count: self.board.disc_count(Cell::White),
            forfeit: self.board.is_forfeit(),
        }
    }
}
