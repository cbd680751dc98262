//! Browser binding
//!
//! The page owns the canvas, the key/touch listeners and the
//! `requestAnimationFrame` loop. It forwards the two logical inputs here,
//! calls `frame` once per animation frame and draws from `snapshot_json`.

use wasm_bindgen::prelude::*;

use crate::driver::{Action, FixedStep, InputQueue};
use crate::sim::{GamePhase, GameSession, autopilot};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Already initialised by a previous module instance
        return;
    }
    log::info!("Dash Runner core loaded");
}

/// One game instance embedded in a page
#[wasm_bindgen]
pub struct WebGame {
    session: GameSession,
    inputs: InputQueue,
    clock: FixedStep,
    demo: bool,
}

#[wasm_bindgen]
impl WebGame {
    /// `tuning_json` may be empty to use the default rules
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64, tuning_json: &str) -> WebGame {
        let json = (!tuning_json.trim().is_empty()).then_some(tuning_json);
        WebGame {
            session: GameSession::new(seed, Tuning::load_or_default(json)),
            inputs: InputQueue::new(),
            clock: FixedStep::new(),
            demo: false,
        }
    }

    /// Space / ArrowUp / tap while playing
    pub fn start_or_jump(&self) {
        self.inputs.sender().send(Action::StartOrJump);
    }

    pub fn restart(&self) {
        self.inputs.sender().send(Action::Restart);
    }

    /// Combined binding: restart when over, otherwise jump
    pub fn primary(&self) {
        self.inputs.sender().send(Action::Primary);
    }

    /// Let the autopilot play (attract screen)
    pub fn set_demo(&mut self, demo: bool) {
        log::info!("Demo mode: {demo}");
        self.demo = demo;
    }

    /// Advance by the time since the previous animation frame
    pub fn frame(&mut self, dt_ms: f64) -> u32 {
        if self.demo {
            match self.session.phase() {
                GamePhase::GameOver => self.session.restart(),
                _ if autopilot::wants_jump(&self.session.snapshot()) => {
                    self.session.start_or_jump()
                }
                _ => {}
            }
        }
        self.clock
            .advance(&mut self.session, &self.inputs, (dt_ms / 1000.0) as f32)
    }

    /// Current frame as JSON (see `Snapshot`)
    pub fn snapshot_json(&self) -> String {
        match serde_json::to_string(&self.session.snapshot()) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Snapshot serialization failed: {e}");
                String::from("{}")
            }
        }
    }

    /// Events since the last call, as a JSON array
    pub fn events_json(&mut self) -> String {
        serde_json::to_string(&self.session.drain_events()).unwrap_or_else(|_| String::from("[]"))
    }

    pub fn high_score(&self) -> u64 {
        self.session.high_score()
    }
}
