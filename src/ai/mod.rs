pub mod positional;
pub mod search;
pub mod selector;

pub use positional::{Evaluator, PositionalEvaluator};
pub use search::Searcher;
pub use selector::{Baseline, SearchConfig, Selection, select_move};
