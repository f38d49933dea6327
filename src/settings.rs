//! Game settings and preferences
//!
//! Read from a JSON file at startup; nothing is written back.

use serde::{Deserialize, Serialize};

use crate::input::KeyBindings;

/// Environment variable naming the settings file
pub const SETTINGS_ENV_VAR: &str = "REQUIEM_RUNNER_SETTINGS";
/// Settings file used when the environment variable is unset
pub const DEFAULT_SETTINGS_PATH: &str = "config/settings.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Visual Effects ===
    /// Particle effects (hit sparks, embers, requiem burst)
    pub particles: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Controls ===
    pub keys: KeyBindings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            particles: true,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,

            keys: KeyBindings::default(),
        }
    }
}

impl Settings {
    /// Effective sound effect gain (0 when muted)
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Effective music gain (0 when muted)
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        }
    }

    /// Load settings from the configured path. Falls back to defaults if the
    /// file is missing or unparseable.
    pub fn load() -> Self {
        let path =
            std::env::var(SETTINGS_ENV_VAR).unwrap_or_else(|_| DEFAULT_SETTINGS_PATH.to_string());
        match std::fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {path}");
                    settings
                }
                Err(e) => {
                    log::warn!("Failed to parse {path}: {e}, using default settings");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Action;

    #[test]
    fn test_mute_silences_everything() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        assert_eq!(settings.effective_sfx_volume(), 0.0);
        assert_eq!(settings.effective_music_volume(), 0.0);
    }

    #[test]
    fn test_volumes_multiply_through_master() {
        let settings = Settings::default();
        assert!((settings.effective_sfx_volume() - 0.8).abs() < 1e-6);
        assert!((settings.effective_music_volume() - 0.56).abs() < 1e-6);
    }

    #[test]
    fn test_partial_file_keeps_default_bindings() {
        let settings: Settings = serde_json::from_str(r#"{ "particles": false }"#).unwrap();
        assert!(!settings.particles);
        assert_eq!(settings.keys.action_for("Enter"), Some(Action::Start));
    }

    #[test]
    fn test_custom_bindings_replace_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "keys": { "w": "Jump", "j": { "Cast": "Far" } } }"#).unwrap();
        assert_eq!(settings.keys.action_for("W"), Some(Action::Jump));
        assert_eq!(
            settings.keys.action_for("j"),
            Some(Action::Cast(crate::sim::CoilRange::Far))
        );
        assert_eq!(settings.keys.action_for("ArrowUp"), None);
    }
}
