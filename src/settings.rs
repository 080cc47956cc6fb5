//! Game settings and preferences
//!
//! Read once at match start; changes take effect on the next start/restart.

use serde::{Deserialize, Serialize};

/// Serve speed tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BallSpeed {
    #[default]
    Normal,
    Fast,
    VeryFast,
}

impl BallSpeed {
    pub fn as_str(&self) -> &'static str {
        match self {
            BallSpeed::Normal => "normal",
            BallSpeed::Fast => "fast",
            BallSpeed::VeryFast => "very-fast",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "normal" => Some(BallSpeed::Normal),
            "fast" => Some(BallSpeed::Fast),
            "very-fast" | "veryfast" => Some(BallSpeed::VeryFast),
            _ => None,
        }
    }

    /// Horizontal serve speed (pixels per tick)
    pub fn serve_speed(&self) -> f32 {
        match self {
            BallSpeed::Normal => 5.0,
            BallSpeed::Fast => 7.0,
            BallSpeed::VeryFast => 9.0,
        }
    }
}

/// Paddle length tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PaddleSize {
    Small,
    #[default]
    Normal,
    Large,
}

impl PaddleSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaddleSize::Small => "small",
            PaddleSize::Normal => "normal",
            PaddleSize::Large => "large",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "small" => Some(PaddleSize::Small),
            "normal" => Some(PaddleSize::Normal),
            "large" => Some(PaddleSize::Large),
            _ => None,
        }
    }

    /// Paddle height in pixels
    pub fn height(&self) -> f32 {
        match self {
            PaddleSize::Small => 60.0,
            PaddleSize::Normal => 80.0,
            PaddleSize::Large => 100.0,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Serve speed tier
    pub ball_speed: BallSpeed,
    /// Paddle length tier
    pub paddle_size: PaddleSize,
    /// Whether the host should play sound cues
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ball_speed: BallSpeed::Normal,
            paddle_size: PaddleSize::Normal,
            sound_enabled: true,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Load settings from a JSON string, falling back to defaults on bad input
    pub fn load(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings: {:?}", settings);
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings ({}), using defaults", e);
                Self::default()
            }
        }
    }
}
