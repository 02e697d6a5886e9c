//! Alarm configuration
//!
//! Defaults match the stock admin panel; the page can override them at
//! runtime with a JSON object.

use serde::{Deserialize, Serialize};

use crate::consts::ALARM_AUDIO_SRC;
use crate::error::{AlarmError, Result};
use crate::tone::ToneSpec;

/// How the alarm is produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlarmStrategy {
    /// Play a bundled media file, falling back to the tone if it fails
    FileWithFallback {
        /// Media file location relative to the page
        src: String,
    },
    /// Always synthesize the tone
    ToneOnly,
}

impl Default for AlarmStrategy {
    fn default() -> Self {
        AlarmStrategy::FileWithFallback {
            src: ALARM_AUDIO_SRC.to_string(),
        }
    }
}

impl AlarmStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlarmStrategy::FileWithFallback { .. } => "file_with_fallback",
            AlarmStrategy::ToneOnly => "tone_only",
        }
    }
}

/// Alarm settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlarmConfig {
    pub strategy: AlarmStrategy,
    /// Media element volume (0.0 - 1.0)
    pub asset_volume: f64,
    pub tone: ToneSpec,
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self {
            strategy: AlarmStrategy::default(),
            asset_volume: 1.0,
            tone: ToneSpec::default(),
        }
    }
}

impl AlarmConfig {
    /// Tone-only config with default tone
    pub fn tone_only() -> Self {
        Self {
            strategy: AlarmStrategy::ToneOnly,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| AlarmError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.asset_volume) {
            return Err(AlarmError::Config(format!(
                "asset_volume must be in [0, 1], got {}",
                self.asset_volume
            )));
        }
        if let AlarmStrategy::FileWithFallback { src } = &self.strategy {
            if src.trim().is_empty() {
                return Err(AlarmError::Config("asset src is empty".to_string()));
            }
        }
        self.tone.validate()
    }
}
