use wasm_bindgen::prelude::*;
use web_sys::console;

use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::game::{Game, MoveOutcome, Phase};
use crate::grid::Direction;
use crate::input::{key_direction, swipe_direction};
use crate::storage::LocalStorageStore;

#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Browser handle for one session.
///
/// The page calls one of the move methods on input, plays its slide
/// animation, then calls `finish_move` to spawn the next tile.
#[wasm_bindgen]
pub struct WebGame {
    game: Game,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(size: usize, win_value: u32, seed: Option<u64>) -> Result<WebGame, JsValue> {
        init_panic_hook();

        let config = EngineConfig::new(size, win_value).map_err(|e| JsValue::from_str(&e.to_string()))?;

        let seed = seed.unwrap_or_else(|| (js_sys::Math::random() * (u64::MAX as f64)) as u64);

        console::log_1(&format!("Using seed: {}", seed).into());

        let mut game = Game::new(Engine::with_seed(config, seed), Box::new(LocalStorageStore));

        game.new_game();

        Ok(WebGame { game })
    }

    /// Returns true when the board changed and a `finish_move` is due.
    pub fn move_direction(&mut self, direction: &str) -> Result<bool, JsValue> {
        let direction: Direction = direction.parse().map_err(|e: String| JsValue::from_str(&e))?;

        Ok(self.apply(direction))
    }

    /// `KeyboardEvent.key`; unmapped keys are ignored.
    pub fn key(&mut self, key: &str) -> bool {
        key_direction(key).map_or(false, |direction| self.apply(direction))
    }

    /// Touch gesture delta in CSS pixels; short swipes are ignored.
    pub fn swipe(&mut self, dx: f64, dy: f64) -> bool {
        swipe_direction(dx, dy).map_or(false, |direction| self.apply(direction))
    }

    pub fn finish_move(&mut self) {
        self.game.finish_move();
    }

    pub fn undo(&mut self) -> bool {
        self.game.undo()
    }

    pub fn new_game(&mut self) {
        self.game.new_game();
    }

    pub fn continue_after_win(&mut self) {
        self.game.continue_after_win();
    }

    /// Tiles, score, best and flags as JSON.
    pub fn state_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.game.state()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn score(&self) -> u32 {
        self.game.score()
    }

    pub fn best(&self) -> u32 {
        self.game.best()
    }

    pub fn won(&self) -> bool {
        self.game.phase() == Phase::Won
    }

    pub fn over(&self) -> bool {
        self.game.phase() == Phase::Lost
    }

    pub fn moving(&self) -> bool {
        self.game.is_moving()
    }
}

impl WebGame {
    fn apply(&mut self, direction: Direction) -> bool {
        matches!(self.game.move_tiles(direction), MoveOutcome::Moved { .. })
    }
}
