//! Game settings and preferences
//!
//! Read from LocalStorage as JSON. Missing fields take their defaults, so
//! older stored settings keep loading.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Id of the canvas element to draw on
    pub canvas_id: String,
    /// Id of the `<audio>` element holding the fire sound
    pub sound_id: String,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,

    // === Debug ===
    /// Fixed RNG seed; the clock is used when unset
    pub seed: Option<u64>,
    /// Log the body count every frame
    pub log_body_count: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_id: "screen".to_string(),
            sound_id: "sound".to_string(),
            master_volume: 1.0,
            muted: false,
            seed: None,
            log_body_count: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "jump_invaders_settings";

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Stored settings unreadable ({}), using defaults", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
