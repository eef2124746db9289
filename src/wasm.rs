//! WebAssembly bindings for the Game of Life session.
//!
//! The browser owns the cadence: a JS timer calls `tick` every `intervalMs`
//! milliseconds, and `tick` only steps while the session is running.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::{
    compute::{GridSnapshot, PatternStamp},
    schema::{Seed, SessionConfig},
    session::{Command, Session},
};

/// Initialize WASM module with panic hook and logging.
#[wasm_bindgen(start)]
pub fn init() {
    // Set panic hook for better error messages in browser
    console_error_panic_hook::set_once();

    // Initialize WASM logger
    wasm_logger::init(wasm_logger::Config::default());
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// WebAssembly wrapper for a Game of Life session.
#[wasm_bindgen]
pub struct WasmSession {
    session: Session,
    interval_ms: u64,
}

#[wasm_bindgen]
impl WasmSession {
    /// Create a session from JSON configuration and seed.
    ///
    /// # Arguments
    /// * `config_json` - JSON string containing SessionConfig
    /// * `seed_json` - JSON string containing Seed
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, seed_json: &str) -> Result<WasmSession, JsValue> {
        let config = SessionConfig::from_json_str(config_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid config JSON: {e}")))?;

        let seed: Seed = serde_json::from_str(seed_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid seed JSON: {e}")))?;

        let grid = seed.generate(config.rows, config.cols).map_err(js_error)?;
        let session = Session::with_grid(&config, grid).map_err(js_error)?;

        Ok(WasmSession {
            session,
            interval_ms: config.interval_ms,
        })
    }

    /// Step once if running. Returns whether a step happened.
    #[wasm_bindgen]
    pub fn tick(&mut self) -> bool {
        self.session.tick()
    }

    #[wasm_bindgen]
    pub fn start(&mut self) {
        self.session.start();
    }

    #[wasm_bindgen]
    pub fn stop(&mut self) {
        self.session.stop();
    }

    #[wasm_bindgen(js_name = playPause)]
    pub fn play_pause(&mut self) {
        if !self.session.stop() {
            self.session.start();
        }
    }

    #[wasm_bindgen(js_name = toggleCell)]
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<(), JsValue> {
        self.session.toggle_cell(row, col).map_err(js_error)
    }

    #[wasm_bindgen]
    pub fn randomize(&mut self, density: f64) {
        self.session.randomize(density);
    }

    #[wasm_bindgen]
    pub fn clear(&mut self) {
        self.session.clear();
    }

    /// Stamp a built-in pattern by name at (top, left).
    #[wasm_bindgen(js_name = stampPattern)]
    pub fn stamp_pattern(&mut self, name: &str, top: usize, left: usize) -> Result<(), JsValue> {
        let pattern = PatternStamp::named(name).map_err(js_error)?;
        self.session.stamp(top, left, &pattern);
        Ok(())
    }

    /// Click on a cell: toggles it, or places the stamp in placement mode.
    #[wasm_bindgen]
    pub fn click(&mut self, row: usize, col: usize) -> Result<(), JsValue> {
        self.session
            .apply(Command::Click { row, col })
            .map_err(js_error)
    }

    #[wasm_bindgen(js_name = togglePlacement)]
    pub fn toggle_placement(&mut self) -> bool {
        self.session.toggle_placement()
    }

    /// Get the current grid as JSON ({rows, cols, cells}).
    #[wasm_bindgen(js_name = getGrid)]
    pub fn get_grid(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&GridSnapshot::from(self.session.grid()))
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Get observable session state as JSON.
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> Result<JsValue, JsValue> {
        let snapshot = SessionSnapshot {
            generation: self.session.generation(),
            running: self.session.is_running(),
            placing: self.session.placing(),
            population: self.session.stats().population,
        };

        serde_wasm_bindgen::to_value(&snapshot)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Get grid statistics as JSON.
    #[wasm_bindgen(js_name = getStats)]
    pub fn get_stats(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.session.stats())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    #[wasm_bindgen(js_name = getGeneration)]
    pub fn get_generation(&self) -> u64 {
        self.session.generation()
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    /// Timer interval the host should use between ticks.
    #[wasm_bindgen(js_name = intervalMs)]
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }
}

/// Serializable snapshot of observable session state.
#[derive(Serialize)]
struct SessionSnapshot {
    generation: u64,
    running: bool,
    placing: bool,
    population: usize,
}
