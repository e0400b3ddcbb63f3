//! License pricing.
//!
//! Per-patient bands:
//! - 0–14,999 → £0.50 per patient per year
//! - 15,000–89,999 → £0.47
//! - 90,000–799,999 → £0.43
//! - 800,000+ → £0.40
//!
//! Per-unit bands use the same thresholds with a price per Scribe.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the monthly license cost is derived.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PricingStrategy {
    /// `list_size * price_per_patient / 12`
    #[default]
    PerPatient,
    /// `monthly_volume * price_per_scribe`
    PerUnit,
}

impl PricingStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingStrategy::PerPatient => "per_patient",
            PricingStrategy::PerUnit => "per_unit",
        }
    }
}

impl fmt::Display for PricingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised pricing strategy name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown pricing strategy: {0} (expected per_patient or per_unit)")]
pub struct UnknownPricingStrategy(pub String);

impl FromStr for PricingStrategy {
    type Err = UnknownPricingStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "per_patient" => Ok(PricingStrategy::PerPatient),
            "per_unit" => Ok(PricingStrategy::PerUnit),
            _ => Err(UnknownPricingStrategy(s.to_string())),
        }
    }
}

/// List-size thresholds (exclusive upper bounds) shared by both strategies.
const TIER_LIMITS: [i64; 3] = [15_000, 90_000, 800_000];

/// Tiered rate by list size.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBands {
    /// (exclusive upper bound, rate)
    tiers: Vec<(i64, f64)>,
    /// Rate at or above the last bound
    top_rate: f64,
}

impl PriceBands {
    pub fn new(tiers: Vec<(i64, f64)>, top_rate: f64) -> Self {
        Self { tiers, top_rate }
    }

    /// £ per patient per year.
    pub fn per_patient() -> Self {
        Self::new(
            TIER_LIMITS.iter().copied().zip([0.50, 0.47, 0.43]).collect(),
            0.40,
        )
    }

    /// £ per Scribe.
    pub fn per_unit() -> Self {
        Self::new(
            TIER_LIMITS.iter().copied().zip([0.60, 0.56, 0.52]).collect(),
            0.48,
        )
    }

    pub fn rate(&self, list_size: i64) -> f64 {
        self.tiers
            .iter()
            .find(|(limit, _)| list_size < *limit)
            .map(|(_, rate)| *rate)
            .unwrap_or(self.top_rate)
    }
}

/// Price per patient per year for a list size.
pub fn price_per_patient(list_size: i64) -> f64 {
    PriceBands::per_patient().rate(list_size)
}

/// Monthly license fee under per-patient pricing.
pub fn monthly_license_fee(list_size: i64) -> f64 {
    list_size as f64 * price_per_patient(list_size) / 12.0
}
