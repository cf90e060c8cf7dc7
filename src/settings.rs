//! Game settings and preferences
//!
//! Persisted in LocalStorage so the mute choice survives sessions.

use serde::{Deserialize, Serialize};

/// Audio preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Silence every cue without touching the volume levels
    pub muted: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            muted: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
        }
    }
}

impl Settings {
    /// Gain applied to every synthesized cue
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Flip mute and return the new state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "sock_pair_panic_settings_v1";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
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
    fn mute_silences_everything() {
        let mut settings = Settings::default();
        assert!(settings.effective_volume() > 0.0);

        settings.toggle_mute();
        assert_eq!(settings.effective_volume(), 0.0);

        settings.toggle_mute();
        assert!(settings.effective_volume() > 0.0);
    }

    #[test]
    fn volumes_multiply_and_clamp() {
        let settings = Settings {
            muted: false,
            master_volume: 0.5,
            sfx_volume: 0.5,
        };
        assert_eq!(settings.effective_volume(), 0.25);

        let loud = Settings {
            muted: false,
            master_volume: 2.0,
            sfx_volume: 2.0,
        };
        assert_eq!(loud.effective_volume(), 1.0);
    }
}
