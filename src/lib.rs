pub mod ai;
pub mod board;
pub mod error;
pub mod game;
pub mod protocol;
pub mod types;
pub mod wasm;

pub use ai::{Baseline, SearchConfig, Selection, select_move};
pub use board::{Board, MoveOutcome};
pub use error::{GameError, ProtocolError};
pub use types::{Cell, Outcome, Position, Side};
