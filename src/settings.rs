//! Game settings and preferences
//!
//! Persisted in LocalStorage, separate from the tuning data.

use serde::{Deserialize, Serialize};

use crate::sim::LayoutPreset;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Level layout to build sessions from
    pub layout: LayoutPreset,
    /// Seed every session with this value instead of the clock
    pub fixed_seed: Option<u64>,
    /// Pause when the tab is hidden or the window loses focus
    pub pause_on_blur: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            layout: LayoutPreset::Rooftops,
            fixed_seed: None,
            pause_on_blur: true,
        }
    }
}

impl Settings {
    /// Seed to start a session with: the fixed seed if set, otherwise `fallback`
    pub fn session_seed(&self, fallback: u64) -> u64 {
        self.fixed_seed.unwrap_or(fallback)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "boomerang_platformer_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
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

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_seed_wins() {
        let mut settings = Settings::default();
        assert_eq!(settings.session_seed(7), 7);
        settings.fixed_seed = Some(42);
        assert_eq!(settings.session_seed(7), 42);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "layout": "Ledges" }"#).unwrap();
        assert_eq!(settings.layout, LayoutPreset::Ledges);
        assert!(settings.pause_on_blur);
        assert_eq!(settings.fixed_seed, None);
    }
}
