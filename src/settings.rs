//! Game tuning and preferences
//!
//! Every gameplay constant lives here so a JSON document can override
//! any subset of them; missing fields keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Color;
use crate::consts::COLOR_BLACK;
use crate::geom::Vec2;

/// Errors loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("settings IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings: {0}")]
    Invalid(&'static str),
}

/// Simulation pace presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Pace {
    Relaxed,
    #[default]
    Normal,
    Frantic,
}

impl Pace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pace::Relaxed => "Relaxed",
            Pace::Normal => "Normal",
            Pace::Frantic => "Frantic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "relaxed" | "slow" => Some(Pace::Relaxed),
            "normal" => Some(Pace::Normal),
            "frantic" | "fast" => Some(Pace::Frantic),
            _ => None,
        }
    }

    /// Raw ticks per simulation step
    pub fn tick_divisor(&self) -> u32 {
        match self {
            Pace::Relaxed => 45,
            Pace::Normal => 30,
            Pace::Frantic => 15,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Pace preset the divisor was derived from
    pub pace: Pace,
    /// Raw ticks per simulation step
    pub tick_divisor: u32,

    // === Rules ===
    /// Score that wins the game
    pub win_score: u32,
    /// Playable range of the ship's x coordinate (inclusive)
    pub ship_min_x: i32,
    pub ship_max_x: i32,
    /// Ship movement per frame while a direction is held
    pub ship_step: i32,
    /// Projectile climb per step
    pub shot_step: i32,
    /// Projectiles at or above this y are recycled
    pub shot_ceiling: i32,
    /// Where a struck target reappears
    pub target_respawn: Vec2,

    // === Output ===
    pub background: Color,
    /// Buzzer period for a scored hit
    pub hit_tone_period: u16,
    pub sound: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pace: Pace::Normal,
            tick_divisor: Pace::Normal.tick_divisor(),

            win_score: 9,
            ship_min_x: 20,
            ship_max_x: 105,
            ship_step: 5,
            shot_step: 5,
            shot_ceiling: 15,
            target_respawn: Vec2::new(30, 30),

            background: COLOR_BLACK,
            hit_tone_period: 880,
            sound: true,
        }
    }
}

impl Settings {
    /// Create settings from a pace preset
    pub fn from_preset(pace: Pace) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(pace);
        settings
    }

    /// Apply a pace preset (updates the tick divisor)
    pub fn apply_preset(&mut self, pace: Pace) {
        self.pace = pace;
        self.tick_divisor = pace.tick_divisor();
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.tick_divisor == 0 {
            return Err(SettingsError::Invalid("tick_divisor must be at least 1"));
        }
        if self.win_score == 0 {
            return Err(SettingsError::Invalid("win_score must be at least 1"));
        }
        if self.ship_min_x > self.ship_max_x {
            return Err(SettingsError::Invalid("ship_min_x exceeds ship_max_x"));
        }
        if self.ship_step <= 0 || self.shot_step <= 0 {
            return Err(SettingsError::Invalid("ship_step and shot_step must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let s = Settings::default();
        assert!(s.validate().is_ok());
        assert_eq!(s.tick_divisor, 30);
        assert_eq!(s.win_score, 9);
        assert_eq!((s.ship_min_x, s.ship_max_x), (20, 105));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{ "win_score": 3, "target_respawn": [40, 20] }"#).unwrap();
        assert_eq!(s.win_score, 3);
        assert_eq!(s.target_respawn, Vec2::new(40, 20));
        assert_eq!(s.shot_ceiling, 15);
    }

    #[test]
    fn test_json_round_trip() {
        let s = Settings::from_preset(Pace::Frantic);
        let back = Settings::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_rejects_invalid() {
        assert!(matches!(
            Settings::from_json(r#"{ "tick_divisor": 0 }"#),
            Err(SettingsError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "ship_min_x": 90, "ship_max_x": 30 }"#),
            Err(SettingsError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_json("not json"),
            Err(SettingsError::Json(_))
        ));
        assert!(matches!(
            Settings::load("/nonexistent/shape-motion.json"),
            Err(SettingsError::Io(_))
        ));
    }

    #[test]
    fn test_pace_presets() {
        assert_eq!(Pace::from_str("FAST"), Some(Pace::Frantic));
        assert_eq!(Pace::from_str("bogus"), None);
        assert_eq!(Pace::Relaxed.as_str(), "Relaxed");
        let s = Settings::from_preset(Pace::Relaxed);
        assert_eq!(s.tick_divisor, 45);
        assert_eq!(s.pace, Pace::Relaxed);
    }
}
