//! Engine configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::bands::Band;
use super::pricing::PricingStrategy;
use super::volume::{
    VolumeEstimator, DEFAULT_VOLUME, DEFAULT_VOLUME_BANDS, HIGH_FALLBACK_VOLUME,
    LOW_FALLBACK_VOLUME,
};

/// Note writing time without Scribe: 3m 30s.
pub const BASELINE_NOTE_TIME_SECONDS: f64 = 210.0;

/// Review/edit time with Scribe: 1m 3s.
pub const AVG_EDIT_TIME_SECONDS: f64 = 63.0;

/// £ per clinician hour.
pub const DEFAULT_CLINICIAN_HOURLY_COST: f64 = 185.0;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Defaults and tables used by the ROI engine.
///
/// Every field is optional in JSON; missing fields take the defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RoiConfig {
    pub baseline_time_secs: f64,
    pub edit_time_secs: f64,
    pub hourly_cost: f64,
    pub pricing: PricingStrategy,
    pub volume_bands: Vec<Band<u32>>,
    pub low_fallback: u32,
    pub high_fallback: u32,
    pub default_volume: u32,
}

impl Default for RoiConfig {
    fn default() -> Self {
        Self {
            baseline_time_secs: BASELINE_NOTE_TIME_SECONDS,
            edit_time_secs: AVG_EDIT_TIME_SECONDS,
            hourly_cost: DEFAULT_CLINICIAN_HOURLY_COST,
            pricing: PricingStrategy::default(),
            volume_bands: DEFAULT_VOLUME_BANDS.to_vec(),
            low_fallback: LOW_FALLBACK_VOLUME,
            high_fallback: HIGH_FALLBACK_VOLUME,
            default_volume: DEFAULT_VOLUME,
        }
    }
}

impl RoiConfig {
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn with_pricing(mut self, pricing: PricingStrategy) -> Self {
        self.pricing = pricing;
        self
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub(crate) fn volume_estimator(&self) -> VolumeEstimator {
        VolumeEstimator::new(
            self.volume_bands.clone(),
            self.low_fallback,
            self.high_fallback,
            self.default_volume,
        )
    }
}
