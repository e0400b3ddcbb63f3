//! ROI calculation models.

use serde::{Deserialize, Serialize};

use crate::engine::PricingStrategy;

/// Caller-supplied overrides. Absent values fall back to engine defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RoiOverrides {
    /// Actual monthly Scribe count, replacing the list-size estimate
    pub monthly_volume: Option<f64>,
    /// Clinician cost in £ per hour
    pub hourly_cost: Option<f64>,
    /// Note writing time without Scribe, in seconds
    pub baseline_time: Option<f64>,
    /// Review/edit time with Scribe, in seconds
    pub edit_time: Option<f64>,
}

impl RoiOverrides {
    /// No overrides.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_monthly_volume(mut self, volume: f64) -> Self {
        self.monthly_volume = Some(volume);
        self
    }

    pub fn with_hourly_cost(mut self, cost: f64) -> Self {
        self.hourly_cost = Some(cost);
        self
    }

    pub fn with_baseline_time(mut self, secs: f64) -> Self {
        self.baseline_time = Some(secs);
        self
    }

    pub fn with_edit_time(mut self, secs: f64) -> Self {
        self.edit_time = Some(secs);
        self
    }
}

/// Fully derived ROI figures for one practice.
///
/// Every field is a pure function of the engine inputs; nothing here is
/// time-dependent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoiReport {
    pub practice_name: String,
    /// Registered patients
    pub list_size: i64,
    /// Scribes per month (estimated or overridden)
    pub monthly_volume: f64,
    /// Seconds per note without Scribe
    pub baseline_time: f64,
    /// Seconds per note reviewing Scribe output
    pub edit_time: f64,
    /// Seconds saved per Scribe (may be negative)
    pub time_saved_per_unit: f64,
    pub monthly_hours_saved: f64,
    /// £ per clinician hour
    pub hourly_cost: f64,
    pub gross_monthly_savings: f64,
    /// £ per patient per year, or £ per Scribe under per-unit pricing
    pub unit_license_cost: f64,
    pub monthly_license_cost: f64,
    pub net_monthly_savings: f64,
    /// Net savings as a multiple of license cost
    pub roi: f64,
    pub annual_savings: f64,
    /// Pricing strategy the license figures were produced with
    pub pricing: PricingStrategy,
}

impl RoiReport {
    /// Whether the inputs produce a net loss.
    pub fn is_net_loss(&self) -> bool {
        self.net_monthly_savings < 0.0
    }

    /// Whether edit time exceeds baseline time, which callers should flag.
    pub fn has_negative_time_saved(&self) -> bool {
        self.time_saved_per_unit < 0.0
    }
}
