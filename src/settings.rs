//! Race settings
//!
//! Track size, roster and motion tuning. JSON on disk natively, LocalStorage
//! in the browser.

use serde::{Deserialize, Serialize};

/// One entry of the starting roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RacerProfile {
    pub id: String,
    pub name: String,
    pub color: String,
    /// Lateral start position relative to the track centre
    #[serde(default)]
    pub lane_offset: f32,
    #[serde(default)]
    pub is_player: bool,
}

impl RacerProfile {
    fn new(id: &str, name: &str, color: &str, lane_offset: f32, is_player: bool) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            color: color.to_owned(),
            lane_offset,
            is_player,
        }
    }
}

/// Race settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Track length (40 viewports of 900 units by default)
    pub track_length: f32,
    /// Track width
    pub canvas_width: f32,
    /// Starting roster, in leaderboard tie-break order
    pub roster: Vec<RacerProfile>,
    /// Shown in notices instead of the player's roster name
    pub player_nickname: Option<String>,

    // === Motion ===
    /// Longitudinal speed at multiplier 1 (units per ms)
    pub base_speed: f32,
    /// Lateral steering speed (units per ms)
    pub steer_speed: f32,
    /// How much AI racers drift around (0 = straight lines)
    pub ai_wander: f32,

    /// Fixed collision cadence in ms (0 = every frame)
    pub collision_interval_ms: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            track_length: 40.0 * 900.0,
            canvas_width: 1280.0,
            roster: vec![
                RacerProfile::new("player", "You", "#FF6B9D", 0.0, true),
                RacerProfile::new("speedy", "Speedy", "#9B59B6", -100.0, false),
                RacerProfile::new("turbo", "Turbo", "#F39C12", 100.0, false),
            ],
            player_nickname: None,
            base_speed: 0.25,
            steer_speed: 0.35,
            ai_wander: 0.5,
            collision_interval_ms: 0.0,
        }
    }
}

impl Settings {
    /// Clamp values the simulation cannot work with
    pub fn validated(mut self) -> Self {
        self.canvas_width = self.canvas_width.max(300.0);
        self.track_length = self.track_length.max(2000.0);
        self.base_speed = self.base_speed.max(0.0);
        self.steer_speed = self.steer_speed.max(0.0);
        self.ai_wander = self.ai_wander.clamp(0.0, 1.0);
        self.collision_interval_ms = self.collision_interval_ms.max(0.0);
        if self.roster.is_empty() {
            log::warn!("Empty roster, using default racers");
            self.roster = Settings::default().roster;
        }
        self
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Settings>(json).map(Settings::validated)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: impl AsRef<std::path::Path>) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json).map_err(std::io::Error::other)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "swim_rush_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }
}
