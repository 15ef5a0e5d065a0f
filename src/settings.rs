//! Player settings and preferences
//!
//! Read from LocalStorage on the web; read from a JSON file by the native runner.

use serde::{Deserialize, Serialize};

use crate::audio::effective_volume;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Silence all cues
    pub muted: bool,

    // === Gameplay ===
    /// Fixed seed for gap placement (random when absent)
    pub seed: Option<u64>,
    /// Let the demo controller play
    pub autopilot: bool,

    // === HUD ===
    /// Draw start / game over / win text over the playfield
    pub show_overlay: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            muted: false,
            seed: None,
            autopilot: false,
            show_overlay: true,
        }
    }
}

impl Settings {
    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    /// Volume to apply to cues
    pub fn volume(&self) -> f32 {
        effective_volume(self.master_volume, self.muted)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "flappy_can_settings";

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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 42, "muted": true }"#).unwrap();
        assert_eq!(settings.seed, Some(42));
        assert!(settings.muted);
        assert_eq!(settings.master_volume, 0.8);
        assert!(settings.show_overlay);
        assert_eq!(settings.volume(), 0.0);
    }

    #[test]
    fn test_volume_is_clamped() {
        let settings = Settings::from_json(r#"{ "master_volume": 3.5 }"#).unwrap();
        assert_eq!(settings.master_volume, 1.0);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            autopilot: true,
            seed: Some(7),
            ..Default::default()
        };
        let json = serde_json::to_string_pretty(&settings).unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(Settings::from_json("{ not json").is_err());
    }
}
