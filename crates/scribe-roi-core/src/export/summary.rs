//! ROI summary export for reports and downstream documents.

use serde::{Deserialize, Serialize};

use super::format::{format_count, format_currency, format_hours, format_multiplier, format_time};
use crate::engine::PricingStrategy;
use crate::models::RoiReport;

/// Export of one ROI report with its display rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiSummaryExport {
    /// Export metadata
    pub metadata: ExportMetadata,
    /// The underlying figures
    pub report: RoiReport,
    /// Labelled rows as shown in the detailed breakdown
    pub rows: Vec<SummaryRow>,
}

/// Export metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub practice_name: String,
    /// ODS code, when the practice came from the directory
    pub practice_code: Option<String>,
    pub pricing: PricingStrategy,
    /// Export timestamp
    pub generated_at: String,
}

/// One line of the detailed breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryRow {
    pub label: String,
    pub value: String,
    pub description: String,
    /// Headline figure
    pub highlight: bool,
}

impl SummaryRow {
    fn new(label: &str, value: String, description: &str) -> Self {
        Self {
            label: label.to_string(),
            value,
            description: description.to_string(),
            highlight: false,
        }
    }

    fn highlighted(mut self) -> Self {
        self.highlight = true;
        self
    }
}

/// Build the detailed breakdown rows for a report.
pub fn summary_rows(report: &RoiReport) -> Vec<SummaryRow> {
    let (license_label, license_description) = match report.pricing {
        PricingStrategy::PerPatient => ("License cost per patient", "Annual rate for practice size band"),
        PricingStrategy::PerUnit => ("License cost per scribe", "Based on practice size band"),
    };

    vec![
        SummaryRow::new(
            "Baseline note writing time",
            format_time(report.baseline_time),
            "Time to write notes without Scribe",
        ),
        SummaryRow::new(
            "Average edit time with Scribe",
            format_time(report.edit_time),
            "Time to review & edit AI-generated notes",
        ),
        SummaryRow::new(
            "Time saved per scribe",
            format_time(report.time_saved_per_unit),
            "Net time savings per appointment",
        ),
        SummaryRow::new(
            "Estimated monthly scribes",
            format_count(report.monthly_volume),
            "Based on patient list size",
        ),
        SummaryRow::new(
            "Monthly hours saved",
            format_hours(report.monthly_hours_saved),
            "Total clinician time recovered",
        ),
        SummaryRow::new(
            "Clinician hourly cost",
            format_currency(report.hourly_cost, 0),
            "Average cost per hour",
        ),
        SummaryRow::new(
            "Gross monthly savings",
            format_currency(report.gross_monthly_savings, 0),
            "Value of time saved",
        ),
        SummaryRow::new(
            license_label,
            format_currency(report.unit_license_cost, 2),
            license_description,
        ),
        SummaryRow::new(
            "Monthly license cost",
            format_currency(report.monthly_license_cost, 0),
            "Total Scribe subscription",
        ),
        SummaryRow::new(
            "Net monthly savings",
            format_currency(report.net_monthly_savings, 0),
            "After license costs",
        )
        .highlighted(),
        SummaryRow::new(
            "Return on Investment",
            format_multiplier(report.roi),
            "Net savings ÷ license cost",
        )
        .highlighted(),
        SummaryRow::new(
            "Annual savings",
            format_currency(report.annual_savings, 0),
            "Total savings over 12 months",
        )
        .highlighted(),
    ]
}

impl RoiSummaryExport {
    /// Create an export from a report, stamped with the current time.
    pub fn from_report(report: &RoiReport, practice_code: Option<&str>) -> Self {
        Self {
            metadata: ExportMetadata {
                practice_name: report.practice_name.clone(),
                practice_code: practice_code.map(str::to_string),
                pricing: report.pricing,
                generated_at: chrono::Utc::now().to_rfc3339(),
            },
            rows: summary_rows(report),
            report: report.clone(),
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        // Header
        csv.push_str("practice_name,practice_code,label,value,description\n");

        let code = self.metadata.practice_code.as_deref().unwrap_or("");
        for row in &self.rows {
            csv.push_str(&format!(
                "{},{},{},{},{}\n",
                escape_csv(&self.metadata.practice_name),
                escape_csv(code),
                escape_csv(&row.label),
                escape_csv(&row.value),
                escape_csv(&row.description),
            ));
        }

        csv
    }

    /// Plain-text summary for terminals and email bodies.
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        out.push_str("Scribe ROI Report\n");
        match &self.metadata.practice_code {
            Some(code) => out.push_str(&format!("{} ({})\n", self.metadata.practice_name, code)),
            None => out.push_str(&format!("{}\n", self.metadata.practice_name)),
        }
        out.push_str(&format!(
            "{} registered patients\n\n",
            format_count(self.report.list_size as f64)
        ));

        let width = self.rows.iter().map(|r| r.label.chars().count()).max().unwrap_or(0);
        for row in &self.rows {
            let marker = if row.highlight { "*" } else { " " };
            out.push_str(&format!(
                "{marker} {:<width$}  {}\n",
                row.label,
                row.value,
                width = width
            ));
        }

        if self.report.has_negative_time_saved() {
            out.push_str("\nWarning: edit time exceeds baseline note time.\n");
        }
        if self.report.is_net_loss() {
            out.push_str("\nWarning: license cost exceeds monthly savings.\n");
        }

        out
    }

    /// File stem for a generated document, e.g. `The_Lister_Medical_Centre_ROI_Report`.
    pub fn suggested_filename(&self) -> String {
        let stem = self
            .metadata
            .practice_name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_");
        format!("{stem}_ROI_Report")
    }
}

/// Escape a value for CSV.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::calculate_roi;
    use crate::models::RoiOverrides;

    fn lister_report() -> RoiReport {
        calculate_roi("The Lister Medical Centre", 8_500, &RoiOverrides::none())
    }

    #[test]
    fn test_rows_follow_breakdown_order() {
        let rows = summary_rows(&lister_report());
        let labels: Vec<_> = rows.iter().map(|r| r.label.as_str()).collect();

        assert_eq!(labels.len(), 12);
        assert_eq!(labels[0], "Baseline note writing time");
        assert_eq!(labels[10], "Return on Investment");

        assert_eq!(rows[0].value, "3m 30s");
        assert_eq!(rows[1].value, "1m 3s");
        assert_eq!(rows[2].value, "2m 27s");
        assert_eq!(rows[3].value, "387");
        assert_eq!(rows[4].value, "15.8 hrs");
        assert_eq!(rows[5].value, "£185");
        assert_eq!(rows[7].value, "£0.50");
        assert_eq!(rows[8].value, "£354");
        assert_eq!(rows[10].value, "7x");
        assert!(rows[9].highlight && rows[10].highlight && rows[11].highlight);
        assert!(!rows[0].highlight);
    }

    #[test]
    fn test_license_cost_tie_rounds_up() {
        // 8,508 * 0.50 / 12 = 354.5 exactly
        let report = calculate_roi("Manual Practice", 8_508, &RoiOverrides::none());
        assert_eq!(report.monthly_license_cost, 354.5);

        let rows = summary_rows(&report);
        assert_eq!(rows[8].label, "Monthly license cost");
        assert_eq!(rows[8].value, "£355");
    }

    #[test]
    fn test_export_json() {
        let export = RoiSummaryExport::from_report(&lister_report(), Some("E87001"));
        let json = export.to_json().unwrap();

        assert!(json.contains("\"practice_code\": \"E87001\""));
        assert!(json.contains("\"monthly_volume\": 387.0"));
        assert!(json.contains("\"pricing\": \"per_patient\""));
    }

    #[test]
    fn test_export_csv_escapes() {
        let report = calculate_roi("Chelsea, Westminster", 7_200, &RoiOverrides::none());
        let export = RoiSummaryExport::from_report(&report, None);
        let csv = export.to_csv();
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(lines[0], "practice_name,practice_code,label,value,description");
        assert_eq!(lines.len(), 13);
        assert!(lines[1].starts_with("\"Chelsea, Westminster\",,Baseline note writing time,3m 30s,"));
        assert!(csv.contains(",Net savings ÷ license cost\n"));
    }

    #[test]
    fn test_export_text() {
        let export = RoiSummaryExport::from_report(&lister_report(), Some("E87001"));
        let text = export.to_text();

        assert!(text.starts_with("Scribe ROI Report\nThe Lister Medical Centre (E87001)\n8,500 registered patients\n"));
        assert!(text.contains("* Return on Investment"));
        assert!(!text.contains("Warning"));

        let costly = calculate_roi("Costly", 8_500, &RoiOverrides::none().with_hourly_cost(5.0));
        let text = RoiSummaryExport::from_report(&costly, None).to_text();
        assert!(text.contains("Warning: license cost exceeds monthly savings."));
        assert!(!text.contains("edit time exceeds"));

        let slow = calculate_roi("Slow", 8_500, &RoiOverrides::none().with_edit_time(400.0));
        let text = RoiSummaryExport::from_report(&slow, None).to_text();
        assert!(text.contains("Warning: edit time exceeds baseline note time."));
    }

    #[test]
    fn test_suggested_filename() {
        let export = RoiSummaryExport::from_report(&lister_report(), None);
        assert_eq!(export.suggested_filename(), "The_Lister_Medical_Centre_ROI_Report");
    }
}
