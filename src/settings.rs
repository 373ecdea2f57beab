//! User preferences
//!
//! Persisted separately from the scene (which is never saved) in
//! LocalStorage on web; native builds use the defaults.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Confetti pool cap for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 96,
            QualityPreset::Medium => 256,
            QualityPreset::High => 768,
        }
    }
}

/// Scene settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Pop sound
    pub sound: bool,
    /// Haptic fallback when the sound fails
    pub haptics: bool,
    /// Balloon sway animation
    pub wobble: bool,
    /// Output volume (0.0 - 1.0)
    pub volume: f32,
    /// Reduced motion (stills the sway regardless of `wobble`)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            sound: true,
            haptics: true,
            wobble: true,
            volume: 0.8,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective balloon sway (respects reduced_motion)
    pub fn effective_wobble(&self) -> bool {
        self.wobble && !self.reduced_motion
    }

    /// Effective confetti cap
    pub fn max_particles(&self) -> usize {
        self.quality.max_particles()
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "castle_pop_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("using default settings");
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
                log::info!("settings saved");
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
