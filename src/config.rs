//! Site configuration.
//!
//! Every tunable lives here with its default. A page may override any
//! subset through an inline `<script type="application/json"
//! id="site-config">` block; fields that are absent keep their defaults.

use serde::Deserialize;

use crate::error::SiteResult;
use crate::i18n::Language;

/// Orbit camera limits and starting pose.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub fov_deg: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar: f32,
    pub max_polar: f32,
    pub damping: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 11.0, 13.0],
            fov_deg: 42.0,
            min_distance: 7.0,
            max_distance: 22.0,
            min_polar: 0.1,
            max_polar: std::f32::consts::PI / 2.05,
            damping: 0.08,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub language: Language,
    /// `log` level name handed to the console logger.
    pub log_level: String,
    pub canvas_id: String,
    pub modal_grace_ms: f64,
    pub parallax_fade_ms: f64,
    pub wheel_threshold: f64,
    pub swipe_distance: f64,
    pub contact_send_ms: f64,
    pub hover_lift: f32,
    pub hover_smoothing: f32,
    pub camera: CameraConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            language: Language::En,
            log_level: "info".into(),
            canvas_id: "c".into(),
            modal_grace_ms: 300.0,
            parallax_fade_ms: 500.0,
            wheel_threshold: 1.0,
            swipe_distance: 50.0,
            contact_send_ms: 1500.0,
            hover_lift: 0.2,
            hover_smoothing: 0.12,
            camera: CameraConfig::default(),
        }
    }
}

impl SiteConfig {
    pub fn from_json(text: &str) -> SiteResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parses an optional inline block, falling back to defaults when it
    /// is missing or malformed.
    pub fn from_optional_json(text: Option<&str>) -> Self {
        match text.map(str::trim).filter(|t| !t.is_empty()) {
            None => Self::default(),
            Some(t) => Self::from_json(t).unwrap_or_else(|e| {
                log::error!("ignoring site config: {e}");
                Self::default()
            }),
        }
    }

    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}
