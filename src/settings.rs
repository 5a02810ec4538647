//! Game settings and preferences
//!
//! Loaded from an optional JSON file next to the binary; anything missing or
//! malformed falls back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{AUTO_QUIT_TICKS, GRAVITY, JUMP_STRENGTH, PLAYER_LIVES, PLAYER_SPEED};

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Physics tuning for this preset
    pub fn physics(&self) -> Physics {
        match self {
            Difficulty::Easy => Physics {
                gravity: 0.3,
                jump_strength: -10.0,
                player_speed: 3.0,
                lives: 5,
            },
            Difficulty::Normal => Physics::default(),
            Difficulty::Hard => Physics {
                gravity: 0.7,
                jump_strength: -6.0,
                player_speed: 1.5,
                lives: 1,
            },
        }
    }
}

/// Per-run physics tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Physics {
    /// Added to vertical velocity every tick
    pub gravity: f32,
    /// Initial vertical velocity of a jump (negative is up)
    pub jump_strength: f32,
    /// Horizontal speed while a direction is held
    pub player_speed: f32,
    pub lives: u8,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_strength: JUMP_STRENGTH,
            player_speed: PLAYER_SPEED,
            lives: PLAYER_LIVES,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    /// Level to start on (0-based, wraps)
    pub start_level: usize,
    /// Seed for particle randomness
    pub seed: u64,

    // === Visual Effects ===
    /// Jump dust, hit bursts, collect sparkles
    pub particles: bool,
    /// Show the progress percentage in the HUD
    pub show_progress: bool,

    // === Audio ===
    pub sound_enabled: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,

    // === Host ===
    /// Quit after this many ticks (None runs forever)
    pub auto_quit_ticks: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            start_level: 0,
            seed: 0x5EED,

            particles: true,
            show_progress: true,

            sound_enabled: true,
            master_volume: 0.8,

            auto_quit_ticks: Some(AUTO_QUIT_TICKS),
        }
    }
}

impl Settings {
    /// Settings for a difficulty preset, everything else default
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    pub fn physics(&self) -> Physics {
        self.difficulty.physics()
    }

    /// Effective volume (0 when sound is off)
    pub fn effective_volume(&self) -> f32 {
        if self.sound_enabled {
            self.master_volume.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {} - using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {} - using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_presets() {
        let easy = Difficulty::Easy.physics();
        assert_eq!(easy.lives, 5);
        assert_eq!(easy.jump_strength, -10.0);

        assert_eq!(Difficulty::Normal.physics(), Physics::default());

        let hard = Difficulty::Hard.physics();
        assert_eq!(hard.lives, 1);
        assert!(hard.gravity > GRAVITY);
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!(Difficulty::from_str("EASY"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_str("medium"), Some(Difficulty::Normal));
        assert_eq!(Difficulty::from_str("nightmare"), None);
        assert_eq!(Difficulty::Hard.as_str(), "Hard");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "difficulty": "Hard", "particles": false }"#).unwrap();
        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert!(!settings.particles);
        assert_eq!(settings.auto_quit_ticks, Some(AUTO_QUIT_TICKS));
        assert!(settings.sound_enabled);
    }

    #[test]
    fn test_json_roundtrip_null_auto_quit() {
        let mut settings = Settings::from_difficulty(Difficulty::Easy);
        settings.auto_quit_ticks = None;
        let parsed = Settings::from_json(&settings.to_json()).unwrap();
        assert_eq!(parsed.auto_quit_ticks, None);
        assert_eq!(parsed.difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Settings::from_json("{ difficulty: ").is_err());
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let settings = Settings::load(Path::new("/nonexistent/pico-platformer.json"));
        assert_eq!(settings.difficulty, Difficulty::Normal);
    }

    #[test]
    fn test_effective_volume() {
        let mut settings = Settings::default();
        settings.master_volume = 1.7;
        assert_eq!(settings.effective_volume(), 1.0);
        settings.sound_enabled = false;
        assert_eq!(settings.effective_volume(), 0.0);
    }
}
