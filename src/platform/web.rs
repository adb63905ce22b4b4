//! Browser bindings
//!
//! The page owns the canvas, the input listeners and `requestAnimationFrame`;
//! it forwards timestamps and key state here and draws from `snapshot_json`.

use wasm_bindgen::prelude::*;

use crate::game::ClawGame;
use crate::persistence::LocalStore;
use crate::sim::{Bounds, ClawPhase, SimEvent, TickInput};

/// Module init: panic hook and console logging
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialised".into());
    }
}

#[wasm_bindgen]
pub struct WebClawGame {
    game: ClawGame<LocalStore>,
    input: TickInput,
}

#[wasm_bindgen]
impl WebClawGame {
    /// Build a machine filling a `width` x `height` canvas
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> WebClawGame {
        let seed = js_sys::Date::now() as u64;
        log::info!("Starting claw machine {width}x{height} (seed {seed})");
        WebClawGame {
            game: ClawGame::new(LocalStore::new(), Bounds::for_canvas(width, height), seed),
            input: TickInput::default(),
        }
    }

    /// Advance using the `requestAnimationFrame` timestamp. Returns how many
    /// prizes were collected this frame.
    pub fn frame(&mut self, timestamp_ms: f64) -> u32 {
        let input = self.input.clone();
        // Drop is one-shot
        self.input.drop = false;
        let collected = self
            .game
            .frame(timestamp_ms, &input)
            .iter()
            .filter(|e| matches!(e, SimEvent::Collected { .. }))
            .count();
        collected as u32
    }

    /// Held steering direction: negative = left, positive = right, 0 = none
    pub fn set_direction(&mut self, direction: i32) {
        self.input.left = direction < 0;
        self.input.right = direction > 0;
    }

    /// Attract mode: the machine plays itself
    pub fn set_idle(&mut self, idle: bool) {
        self.input.idle_mode = idle;
    }

    /// Queue a drop for the next frame. Returns false if the claw is busy.
    pub fn request_drop(&mut self) -> bool {
        let can_drop = self.game.state().claw.phase == ClawPhase::Idle;
        if can_drop {
            self.input.drop = true;
        }
        can_drop
    }

    /// Current render state as JSON
    pub fn snapshot_json(&self) -> String {
        match serde_json::to_string(&self.game.snapshot()) {
            Ok(json) => json,
            Err(err) => {
                log::error!("Snapshot encoding failed: {err}");
                String::from("{}")
            }
        }
    }

    pub fn score(&self) -> f64 {
        self.game.session().score as f64
    }

    pub fn reset(&mut self) {
        self.game.reset();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.game.resize(Bounds::for_canvas(width, height));
    }
}
