//! App configuration
//!
//! An optional `vitrine.toml` controls the viewport, the backdrop seed,
//! a reduced-motion override, and the demo log filter. Every field has
//! a default, so a missing file or a partial table still configures a
//! complete app.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use vitrine_core::{MotionPreference, Size};

use crate::error::Result;

/// Config file name the demo binary looks for by default
pub const CONFIG_FILE: &str = "vitrine.toml";

/// Viewport dimensions in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

impl ViewportConfig {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Top-level configuration stored in `vitrine.toml`
///
/// Plain values come before the viewport table so the file serializes
/// as valid TOML.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct VitrineConfig {
    /// Seed for the backdrop's deterministic randomness
    pub seed: u64,
    /// Overrides the environment's motion preference when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduced_motion: Option<bool>,
    /// Log filter for the demo binary, e.g. "info" or "vitrine_scroll=trace"
    pub log_filter: String,
    pub viewport: ViewportConfig,
}

impl Default for VitrineConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            reduced_motion: None,
            log_filter: default_log_filter(),
            viewport: ViewportConfig::default(),
        }
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl VitrineConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `path` when it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Resolved motion preference: config override, else the environment
    ///
    /// Read once at startup and injected everywhere; the preference does
    /// not change mid-session.
    pub fn motion(&self) -> MotionPreference {
        match self.reduced_motion {
            Some(true) => MotionPreference::Reduced,
            Some(false) => MotionPreference::Full,
            None => MotionPreference::from_env(),
        }
    }
}
