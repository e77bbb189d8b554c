//! Browser bindings
//!
//! A thin wasm-bindgen wrapper over `Race` for a JS host that owns the
//! canvas, the frame loop, speech synthesis and the speech recognizer.
//! Complex values cross the boundary as JSON.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use wasm_bindgen::prelude::*;

use crate::commentary::CommentaryDirector;
use crate::race::{Race, RaceInput};
use crate::settings::Settings;
use crate::sim::state::RacerUpdate;
use crate::voice::VoiceGate;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("Swim Rush core loaded");
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct WasmRace {
    race: Race,
    commentary: CommentaryDirector,
    voice: VoiceGate,
    rng: Pcg32,
}

#[wasm_bindgen]
impl WasmRace {
    /// Race from a settings JSON string, or the stored settings when absent
    #[wasm_bindgen(constructor)]
    pub fn new(settings_json: Option<String>) -> Result<WasmRace, JsValue> {
        let settings = match settings_json {
            Some(json) => Settings::from_json(&json).map_err(js_err)?,
            None => Settings::load(),
        };
        Ok(Self {
            race: Race::new(settings),
            commentary: CommentaryDirector::new(),
            voice: VoiceGate::default(),
            rng: Pcg32::seed_from_u64(rand::random()),
        })
    }

    pub fn start(&mut self) {
        self.race.start();
    }

    pub fn reset(&mut self) {
        self.race.reset();
        self.commentary.reset();
    }

    pub fn finish(&mut self) {
        self.race.finish();
    }

    /// One frame of the built-in loop
    pub fn step(&mut self, delta: f32, steer: f32, drop_hazard: bool) {
        let input = RaceInput {
            steer,
            drop_hazard,
            voice_boost: false,
        };
        self.race.step(delta, &input);
    }

    pub fn tick(&mut self, delta: f32) {
        self.race.tick(delta);
    }

    pub fn run_collisions(&mut self) {
        self.race.run_collisions();
    }

    pub fn run_slipstream(&mut self) {
        self.race.run_slipstream();
    }

    /// Merge a JSON racer patch, e.g. `{"pos":[640,900],"speed_multiplier":1.5}`
    pub fn update_racer(&mut self, id: &str, patch_json: &str) -> Result<bool, JsValue> {
        let update: RacerUpdate = serde_json::from_str(patch_json).map_err(js_err)?;
        Ok(self.race.update_racer(id, update))
    }

    pub fn drop_hazard(&mut self, racer_id: &str) -> Option<String> {
        self.race.drop_hazard(racer_id)
    }

    pub fn activate_voice_boost(&mut self) -> bool {
        self.race.activate_voice_boost()
    }

    /// Feed a finished speech transcript
    pub fn hear(&mut self, transcript: &str) -> bool {
        self.voice.hear(&mut self.race, transcript)
    }

    /// The recognizer is missing or failed
    pub fn voice_unavailable(&mut self, reason: &str) {
        self.voice.disable(reason);
    }

    pub fn update_camera(&mut self, y: f32) {
        self.race.update_camera(y);
    }

    pub fn set_event_message(&mut self, text: &str) {
        self.race.set_event_message(text);
    }

    /// Next commentary line to speak, if one is due
    pub fn next_commentary(&mut self) -> Option<String> {
        self.commentary.next_line(&mut self.race, &mut self.rng)
    }

    pub fn snapshot(&self) -> Result<String, JsValue> {
        self.race.snapshot_json().map_err(js_err)
    }

    pub fn standings(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.race.standings()).map_err(js_err)
    }

    pub fn settings(&self) -> Result<String, JsValue> {
        self.race.settings().to_json().map_err(js_err)
    }

    /// Persist the current settings to LocalStorage
    pub fn save_settings(&self) {
        self.race.settings().save();
    }
}
