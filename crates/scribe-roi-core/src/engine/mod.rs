//! ROI engine.
//!
//! Pipeline: Volume Estimate → Time Saved → Hours Saved → License Cost → Savings/ROI
//!
//! Pure arithmetic. Inputs are never validated or clamped here; negative
//! list sizes or edit times longer than baseline flow straight through.

mod bands;
mod config;
mod pricing;
mod volume;

pub use bands::*;
pub use config::*;
pub use pricing::*;
pub use volume::*;

use crate::models::{PracticeRecord, RoiOverrides, RoiReport};

const SECONDS_PER_HOUR: f64 = 3600.0;
const MONTHS_PER_YEAR: f64 = 12.0;

/// ROI calculator bound to a configuration.
#[derive(Debug, Clone)]
pub struct RoiEngine {
    config: RoiConfig,
    estimator: VolumeEstimator,
    per_patient: PriceBands,
    per_unit: PriceBands,
}

impl Default for RoiEngine {
    fn default() -> Self {
        Self::new(RoiConfig::default())
    }
}

impl RoiEngine {
    pub fn new(config: RoiConfig) -> Self {
        Self {
            estimator: config.volume_estimator(),
            config,
            per_patient: PriceBands::per_patient(),
            per_unit: PriceBands::per_unit(),
        }
    }

    pub fn config(&self) -> &RoiConfig {
        &self.config
    }

    /// Estimated monthly Scribes for a list size.
    pub fn estimate_volume(&self, list_size: i64) -> u32 {
        self.estimator.estimate(list_size)
    }

    /// Compute the full report. Recomputed from scratch on every call.
    pub fn calculate(
        &self,
        practice_name: &str,
        list_size: i64,
        overrides: &RoiOverrides,
    ) -> RoiReport {
        // Step 1: Monthly volume
        let monthly_volume = overrides
            .monthly_volume
            .unwrap_or_else(|| f64::from(self.estimator.estimate(list_size)));
        let hourly_cost = overrides.hourly_cost.unwrap_or(self.config.hourly_cost);
        let baseline_time = overrides
            .baseline_time
            .unwrap_or(self.config.baseline_time_secs);
        let edit_time = overrides.edit_time.unwrap_or(self.config.edit_time_secs);

        // Step 2-3: Time saved
        let time_saved_per_unit = baseline_time - edit_time;
        let monthly_hours_saved = monthly_volume * time_saved_per_unit / SECONDS_PER_HOUR;

        // Step 4: License
        let pricing = self.config.pricing;
        let (unit_license_cost, monthly_license_cost) = match pricing {
            PricingStrategy::PerPatient => {
                let rate = self.per_patient.rate(list_size);
                (rate, list_size as f64 * rate / MONTHS_PER_YEAR)
            }
            PricingStrategy::PerUnit => {
                let rate = self.per_unit.rate(list_size);
                (rate, monthly_volume * rate)
            }
        };

        // Step 5: Savings
        let gross_monthly_savings = monthly_hours_saved * hourly_cost;
        let net_monthly_savings = gross_monthly_savings - monthly_license_cost;
        let roi = if monthly_license_cost > 0.0 {
            net_monthly_savings / monthly_license_cost
        } else {
            0.0
        };
        let annual_savings = net_monthly_savings * MONTHS_PER_YEAR;

        RoiReport {
            practice_name: practice_name.to_string(),
            list_size,
            monthly_volume,
            baseline_time,
            edit_time,
            time_saved_per_unit,
            monthly_hours_saved,
            hourly_cost,
            gross_monthly_savings,
            unit_license_cost,
            monthly_license_cost,
            net_monthly_savings,
            roi,
            annual_savings,
            pricing,
        }
    }

    /// Compute the report for a directory practice.
    pub fn calculate_for(&self, practice: &PracticeRecord, overrides: &RoiOverrides) -> RoiReport {
        self.calculate(&practice.name, i64::from(practice.list_size), overrides)
    }
}

/// Compute a report with the default configuration.
pub fn calculate_roi(practice_name: &str, list_size: i64, overrides: &RoiOverrides) -> RoiReport {
    RoiEngine::default().calculate(practice_name, list_size, overrides)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_default_report_for_8500() {
        let report = calculate_roi("Test Practice", 8_500, &RoiOverrides::none());

        assert_eq!(report.practice_name, "Test Practice");
        assert_eq!(report.list_size, 8_500);
        assert_eq!(report.monthly_volume, 387.0);
        assert_eq!(report.baseline_time, 210.0);
        assert_eq!(report.edit_time, 63.0);
        assert_eq!(report.time_saved_per_unit, 147.0);
        assert!(close(report.monthly_hours_saved, 387.0 * 147.0 / 3600.0));
        assert_eq!(report.hourly_cost, 185.0);
        assert!(close(report.gross_monthly_savings, 387.0 * 147.0 / 3600.0 * 185.0));
        assert_eq!(report.unit_license_cost, 0.50);
        assert!(close(report.monthly_license_cost, 8_500.0 * 0.50 / 12.0));
        assert!(close(
            report.net_monthly_savings,
            report.gross_monthly_savings - report.monthly_license_cost
        ));
        assert!(close(
            report.roi,
            report.net_monthly_savings / report.monthly_license_cost
        ));
        assert!(close(report.annual_savings, report.net_monthly_savings * 12.0));
        assert_eq!(report.pricing, PricingStrategy::PerPatient);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let overrides = RoiOverrides::none()
            .with_monthly_volume(1000.0)
            .with_hourly_cost(100.0)
            .with_baseline_time(300.0)
            .with_edit_time(120.0);
        let report = calculate_roi("Override Practice", 12_000, &overrides);

        assert_eq!(report.monthly_volume, 1000.0);
        assert_eq!(report.hourly_cost, 100.0);
        assert_eq!(report.time_saved_per_unit, 180.0);
        assert!(close(report.monthly_hours_saved, 50.0));
        assert!(close(report.gross_monthly_savings, 5000.0));
        assert!(close(report.monthly_license_cost, 500.0));
        assert!(close(report.net_monthly_savings, 4500.0));
        assert!(close(report.roi, 9.0));
        assert!(close(report.annual_savings, 54_000.0));
    }

    #[test]
    fn test_zero_license_cost_gives_zero_roi() {
        let report = calculate_roi("Empty", 0, &RoiOverrides::none());
        assert_eq!(report.monthly_license_cost, 0.0);
        assert!(report.net_monthly_savings > 0.0);
        assert_eq!(report.roi, 0.0);

        let per_unit = RoiEngine::new(RoiConfig::default().with_pricing(PricingStrategy::PerUnit));
        let report = per_unit.calculate(
            "No Volume",
            8_500,
            &RoiOverrides::none().with_monthly_volume(0.0),
        );
        assert_eq!(report.monthly_license_cost, 0.0);
        assert_eq!(report.roi, 0.0);
    }

    #[test]
    fn test_negative_license_cost_gives_zero_roi() {
        let report = calculate_roi("Negative", -1_000, &RoiOverrides::none());
        assert!(report.monthly_license_cost < 0.0);
        assert_eq!(report.roi, 0.0);
    }

    #[test]
    fn test_negative_time_saved_is_not_clamped() {
        let overrides = RoiOverrides::none().with_edit_time(300.0);
        let report = calculate_roi("Slow Edits", 8_500, &overrides);

        assert_eq!(report.time_saved_per_unit, -90.0);
        assert!(report.has_negative_time_saved());
        assert!(report.monthly_hours_saved < 0.0);
        assert!(report.is_net_loss());
        assert!(report.roi < 0.0);
    }

    #[test]
    fn test_per_unit_pricing() {
        let engine = RoiEngine::new(RoiConfig::default().with_pricing(PricingStrategy::PerUnit));
        let report = engine.calculate("Per Unit", 8_500, &RoiOverrides::none());

        assert_eq!(report.unit_license_cost, 0.60);
        assert!(close(report.monthly_license_cost, 387.0 * 0.60));
        assert_eq!(report.pricing, PricingStrategy::PerUnit);
    }

    #[test]
    fn test_config_defaults_apply() {
        let config = RoiConfig {
            baseline_time_secs: 240.0,
            edit_time_secs: 60.0,
            hourly_cost: 90.0,
            ..RoiConfig::default()
        };
        let report = RoiEngine::new(config).calculate("Configured", 8_500, &RoiOverrides::none());

        assert_eq!(report.time_saved_per_unit, 180.0);
        assert_eq!(report.hourly_cost, 90.0);
    }

    #[test]
    fn test_calculate_for_practice() {
        let practice = PracticeRecord::new("F84002", "Midlands Health Network", 45_000);
        let report = RoiEngine::default().calculate_for(&practice, &RoiOverrides::none());

        assert_eq!(report.practice_name, "Midlands Health Network");
        assert_eq!(report.monthly_volume, 588.0);
        assert_eq!(report.unit_license_cost, 0.47);
    }

    #[test]
    fn test_identical_inputs_identical_reports() {
        let engine = RoiEngine::default();
        let overrides = RoiOverrides::none().with_hourly_cost(150.0);
        let a = engine.calculate("Twice", 23_456, &overrides);
        let b = engine.calculate("Twice", 23_456, &overrides);

        assert_eq!(a, b);
        assert_eq!(a.roi.to_bits(), b.roi.to_bits());
        assert_eq!(a.annual_savings.to_bits(), b.annual_savings.to_bits());
    }
}
