//! Scribe ROI Core Library
//!
//! Practice lookup and return-on-investment calculation for NHS GP practices
//! evaluating Scribe, an AI clinical-documentation assistant.
//!
//! # Architecture
//!
//! ```text
//!   ODS code ──► Practice Directory ◄── name query
//!                 (lazy, single-flight dataset)
//!                        │
//!                 (name, list size)        manual entry ──► validation
//!                        │                                     │
//!                        ▼                                     │
//!   overrides ──► ROI Engine ◄─────────────────────────────────┘
//!                 volume estimate → time saved → hours saved
//!                 → license cost → savings / ROI
//!                        │
//!                        ▼
//!                    RoiReport ──► JSON / CSV / text export
//! ```
//!
//! # Core Principle
//!
//! **The engine is pure arithmetic.** It never validates or clamps inputs;
//! gating nonsensical values belongs to the caller.
//!
//! # Modules
//!
//! - [`directory`]: Practice directory with code lookup, name search, and suggestions
//! - [`engine`]: ROI engine (volume bands, pricing, derived metrics, configuration)
//! - [`models`]: Domain types (PracticeRecord, RoiOverrides, RoiReport, etc.)
//! - [`export`]: Display formatting and report export

pub mod directory;
pub mod engine;
pub mod export;
pub mod models;

// Re-export commonly used types
pub use directory::{
    default_directory, validate_identifier_format, PracticeDirectory, PracticeSource,
};
pub use engine::{calculate_roi, PricingStrategy, RoiConfig, RoiEngine};
pub use export::RoiSummaryExport;
pub use models::{ManualPractice, PracticeRecord, RoiOverrides, RoiReport, ValidationError};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::Arc;

/// Default number of search results returned to a host UI.
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum ScribeRoiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<ValidationError> for ScribeRoiError {
    fn from(e: ValidationError) -> Self {
        ScribeRoiError::InvalidInput(e.to_string())
    }
}

impl From<engine::ConfigError> for ScribeRoiError {
    fn from(e: engine::ConfigError) -> Self {
        ScribeRoiError::ConfigError(e.to_string())
    }
}

impl From<engine::UnknownPricingStrategy> for ScribeRoiError {
    fn from(e: engine::UnknownPricingStrategy) -> Self {
        ScribeRoiError::InvalidInput(e.to_string())
    }
}

impl From<serde_json::Error> for ScribeRoiError {
    fn from(e: serde_json::Error) -> Self {
        ScribeRoiError::SerializationError(e.to_string())
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open the calculator over the bundled practice dataset.
#[uniffi::export]
pub fn open_default() -> Arc<ScribeRoiCore> {
    Arc::new(ScribeRoiCore {
        directory: PracticeDirectory::embedded(),
        engine: RoiEngine::default(),
    })
}

/// Open the calculator over caller-supplied practice CSV text.
///
/// `config_json` is an optional engine configuration; missing fields take defaults.
#[uniffi::export]
pub fn open_with_csv(
    csv: String,
    config_json: Option<String>,
) -> Result<Arc<ScribeRoiCore>, ScribeRoiError> {
    let config = match config_json {
        Some(json) => RoiConfig::from_json_str(&json)?,
        None => RoiConfig::default(),
    };
    Ok(Arc::new(ScribeRoiCore {
        directory: PracticeDirectory::new(directory::CsvTextSource::new(csv)),
        engine: RoiEngine::new(config),
    }))
}

/// Check an ODS code's format (5-7 alphanumeric characters).
#[uniffi::export]
pub fn validate_identifier(code: String) -> bool {
    validate_identifier_format(&code)
}

// =========================================================================
// Main API Object
// =========================================================================

/// Practice directory plus ROI engine for FFI.
#[derive(uniffi::Object)]
pub struct ScribeRoiCore {
    directory: PracticeDirectory,
    engine: RoiEngine,
}

#[uniffi::export]
impl ScribeRoiCore {
    // =========================================================================
    // Directory Operations
    // =========================================================================

    /// Get a practice by ODS code.
    pub fn lookup_practice(&self, code: String) -> Option<FfiPractice> {
        self.directory.lookup(&code).map(|p| p.into())
    }

    /// Search practices by code or name substring.
    pub fn search_practices(&self, query: String, limit: u32) -> Vec<FfiPractice> {
        self.directory
            .search(&query, limit as usize)
            .into_iter()
            .map(|p| p.into())
            .collect()
    }

    /// Practices with codes close to one that was not found.
    pub fn suggest_practices(&self, code: String, limit: u32) -> Vec<FfiPractice> {
        self.directory
            .suggest(&code, limit as usize)
            .into_iter()
            .map(|p| p.into())
            .collect()
    }

    /// Validate a manually entered practice.
    pub fn validate_manual_entry(&self, name: String, list_size: i64) -> Result<(), ScribeRoiError> {
        ManualPractice::new(name, list_size).validate()?;
        Ok(())
    }

    // =========================================================================
    // ROI Operations
    // =========================================================================

    /// Estimated monthly Scribes for a list size, before any override.
    pub fn estimate_monthly_volume(&self, list_size: i64) -> u32 {
        self.engine.estimate_volume(list_size)
    }

    /// Pricing strategy this calculator applies (`per_patient` or `per_unit`).
    pub fn pricing_strategy(&self) -> String {
        self.engine.config().pricing.to_string()
    }

    /// Calculate ROI for a practice name and list size.
    pub fn calculate_roi(
        &self,
        practice_name: String,
        list_size: i64,
        overrides: FfiRoiOverrides,
    ) -> FfiRoiReport {
        self.engine
            .calculate(&practice_name, list_size, &overrides.into())
            .into()
    }

    /// Look up a practice and calculate its ROI.
    pub fn calculate_for_code(
        &self,
        code: String,
        overrides: FfiRoiOverrides,
    ) -> Result<FfiRoiReport, ScribeRoiError> {
        let practice = self
            .directory
            .lookup(&code)
            .ok_or_else(|| ScribeRoiError::NotFound(code.trim().to_uppercase()))?;
        Ok(self.engine.calculate_for(&practice, &overrides.into()).into())
    }

    // =========================================================================
    // Export Operations
    // =========================================================================

    /// Export a report as JSON.
    pub fn export_report_json(
        &self,
        report: FfiRoiReport,
        practice_code: Option<String>,
    ) -> Result<String, ScribeRoiError> {
        let report = RoiReport::try_from(report)?;
        let export = RoiSummaryExport::from_report(&report, practice_code.as_deref());
        Ok(export.to_json()?)
    }

    /// Export a report as CSV.
    pub fn export_report_csv(
        &self,
        report: FfiRoiReport,
        practice_code: Option<String>,
    ) -> Result<String, ScribeRoiError> {
        let report = RoiReport::try_from(report)?;
        Ok(RoiSummaryExport::from_report(&report, practice_code.as_deref()).to_csv())
    }

    /// File stem for a saved report, e.g. `The_Lister_Medical_Centre_ROI_Report`.
    pub fn report_filename(&self, report: FfiRoiReport) -> Result<String, ScribeRoiError> {
        let report = RoiReport::try_from(report)?;
        Ok(RoiSummaryExport::from_report(&report, None).suggested_filename())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe practice.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPractice {
    pub code: String,
    pub name: String,
    pub list_size: u32,
    pub address: Option<String>,
}

impl From<PracticeRecord> for FfiPractice {
    fn from(practice: PracticeRecord) -> Self {
        Self {
            code: practice.code,
            name: practice.name,
            list_size: practice.list_size,
            address: practice.address,
        }
    }
}

/// FFI-safe overrides.
#[derive(Debug, Clone, Default, uniffi::Record)]
pub struct FfiRoiOverrides {
    pub monthly_volume: Option<f64>,
    pub hourly_cost: Option<f64>,
    pub baseline_time: Option<f64>,
    pub edit_time: Option<f64>,
}

impl From<FfiRoiOverrides> for RoiOverrides {
    fn from(o: FfiRoiOverrides) -> Self {
        RoiOverrides {
            monthly_volume: o.monthly_volume,
            hourly_cost: o.hourly_cost,
            baseline_time: o.baseline_time,
            edit_time: o.edit_time,
        }
    }
}

/// FFI-safe ROI report.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRoiReport {
    pub practice_name: String,
    pub list_size: i64,
    pub monthly_volume: f64,
    pub baseline_time: f64,
    pub edit_time: f64,
    pub time_saved_per_unit: f64,
    pub monthly_hours_saved: f64,
    pub hourly_cost: f64,
    pub gross_monthly_savings: f64,
    pub unit_license_cost: f64,
    pub monthly_license_cost: f64,
    pub net_monthly_savings: f64,
    pub roi: f64,
    pub annual_savings: f64,
    pub pricing: String,
}

impl From<RoiReport> for FfiRoiReport {
    fn from(r: RoiReport) -> Self {
        Self {
            practice_name: r.practice_name,
            list_size: r.list_size,
            monthly_volume: r.monthly_volume,
            baseline_time: r.baseline_time,
            edit_time: r.edit_time,
            time_saved_per_unit: r.time_saved_per_unit,
            monthly_hours_saved: r.monthly_hours_saved,
            hourly_cost: r.hourly_cost,
            gross_monthly_savings: r.gross_monthly_savings,
            unit_license_cost: r.unit_license_cost,
            monthly_license_cost: r.monthly_license_cost,
            net_monthly_savings: r.net_monthly_savings,
            roi: r.roi,
            annual_savings: r.annual_savings,
            pricing: r.pricing.to_string(),
        }
    }
}

impl TryFrom<FfiRoiReport> for RoiReport {
    type Error = ScribeRoiError;

    fn try_from(r: FfiRoiReport) -> Result<Self, Self::Error> {
        Ok(RoiReport {
            pricing: r.pricing.parse()?,
            practice_name: r.practice_name,
            list_size: r.list_size,
            monthly_volume: r.monthly_volume,
            baseline_time: r.baseline_time,
            edit_time: r.edit_time,
            time_saved_per_unit: r.time_saved_per_unit,
            monthly_hours_saved: r.monthly_hours_saved,
            hourly_cost: r.hourly_cost,
            gross_monthly_savings: r.gross_monthly_savings,
            unit_license_cost: r.unit_license_cost,
            monthly_license_cost: r.monthly_license_cost,
            net_monthly_savings: r.net_monthly_savings,
            roi: r.roi,
            annual_savings: r.annual_savings,
        })
    }
}
