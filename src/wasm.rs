use wasm_bindgen::prelude::*;

use crate::ai::selector::SearchConfig;
use crate::game::{FirstLegalMoveSelector, GameInstance};
use crate::protocol::parse_request;

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// Takes a request in the harness text format and returns the chosen
/// `{ row, col }`.
#[wasm_bindgen]
pub fn choose_move(state: &str, depth: u8) -> Result<JsValue, JsValue> {
    let request = parse_request(state).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let config = SearchConfig {
        depth,
        ..SearchConfig::default()
    };
    let mv = request
        .choose(&config)
        .ok_or_else(|| JsValue::from_str("request contains no legal moves"))?;
    serde_wasm_bindgen::to_value(&mv).map_err(JsValue::from)
}

/// State of a fresh game, for rendering before the first move.
#[wasm_bindgen]
pub fn initial_state() -> Result<JsValue, JsValue> {
    let game = GameInstance::new(
        Box::new(FirstLegalMoveSelector),
        Box::new(FirstLegalMoveSelector),
    );
    serde_wasm_bindgen::to_value(&game.to_game_state()).map_err(JsValue::from)
}
