use thiserror::Error;

use crate::types::Side;

/// Failures while reading a request or writing a reply.
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("input ended before {field}")]
    MissingToken { field: &'static str },

    #[error("expected an integer for {field}, got {token:?}")]
    InvalidInteger { field: &'static str, token: String },

    #[error("invalid side id {0} (expected 1 or 2)")]
    InvalidSide(i64),

    #[error("invalid cell code {code} at square {index}")]
    InvalidCell { index: usize, code: i64 },

    #[error("coordinate ({row}, {col}) is off the board")]
    CoordinateOutOfRange { row: i64, col: i64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failures of the match driver.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GameError {
    #[error("game is already over")]
    GameOver,

    #[error("{0:?} could not select a move")]
    NoMoveSelected(Side),
}
