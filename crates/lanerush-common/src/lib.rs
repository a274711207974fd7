//! Common types shared across LaneRush crates
//!
//! - `GameConfig`: every tunable gameplay constant, optionally read from `lanerush.toml`
//! - `time`: seconds ⇄ frames conversion at the fixed simulation rate
//! - `geometry`: integer canvas rectangles

pub mod geometry;
pub mod time;

pub use geometry::{Rect, Size};
pub use time::FrameRate;

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Name of the optional config file looked up in the game root
pub const CONFIG_FILE_NAME: &str = "lanerush.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Gameplay configuration. Every field has a default, so a partial
/// `lanerush.toml` only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window_title: String,
    pub screen_width: u32,
    pub screen_height: u32,
    pub fps: u32,
    /// Countdown per level
    pub level_time_secs: u32,
    pub collision_hold_ms: u64,
    pub banner_hold_ms: u64,
    pub win_hold_ms: u64,
    pub player_speed: i32,
    pub total_lives: u32,
    pub invincibility_secs: f64,
    pub blink_interval_secs: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_title: "Car Racing Game".to_string(),
            screen_width: 800,
            screen_height: 600,
            fps: 60,
            level_time_secs: 15,
            collision_hold_ms: 1000,
            banner_hold_ms: 2000,
            win_hold_ms: 5000,
            player_speed: 5,
            total_lives: 3,
            invincibility_secs: 2.0,
            blink_interval_secs: 0.25,
        }
    }
}

impl GameConfig {
    /// Read `lanerush.toml` from the game root. A missing file means defaults.
    pub fn load(game_dir: &Path) -> Result<Self, ConfigError> {
        let path = game_dir.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            tracing::debug!("No {} in {}, using defaults", CONFIG_FILE_NAME, game_dir.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path)?;
        let config = Self::from_toml(&text)?;
        tracing::info!("Config loaded from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn frame_rate(&self) -> FrameRate {
        FrameRate::new(self.fps)
    }

    pub fn screen_size(&self) -> Size {
        Size::new(self.screen_width as i32, self.screen_height as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_arcade_settings() {
        let config = GameConfig::default();
        assert_eq!(config.screen_size(), Size::new(800, 600));
        assert_eq!(config.fps, 60);
        assert_eq!(config.level_time_secs, 15);
        assert_eq!(config.total_lives, 3);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GameConfig::from_toml("level_time_secs = 30\nfps = 30\n").unwrap();
        assert_eq!(config.level_time_secs, 30);
        assert_eq!(config.fps, 30);
        assert_eq!(config.collision_hold_ms, 1000);
        assert_eq!(config.window_title, "Car Racing Game");
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let err = GameConfig::from_toml("fps = \"fast\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = std::env::temp_dir().join("lanerush-common-no-config");
        let config = GameConfig::load(&dir).unwrap();
        assert_eq!(config, GameConfig::default());
    }
}
