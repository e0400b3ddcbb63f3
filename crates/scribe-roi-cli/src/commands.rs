//! Subcommand handlers.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use tracing::{debug, info};

use scribe_roi_core::directory::FileSource;
use scribe_roi_core::export::format_count;
use scribe_roi_core::{
    validate_identifier_format, ManualPractice, PracticeDirectory, PracticeRecord, RoiConfig,
    RoiEngine, RoiOverrides, RoiSummaryExport,
};

use crate::cli::{CalculateArgs, OutputFormat};

const SUGGESTION_LIMIT: usize = 3;

/// Directory and engine configuration shared by every subcommand.
pub struct Context {
    directory: PracticeDirectory,
    config: RoiConfig,
}

impl Context {
    pub fn open(dataset: Option<&Path>, config: Option<&Path>) -> Result<Self> {
        let directory = match dataset {
            Some(path) => {
                debug!(path = %path.display(), "Using practice dataset file");
                PracticeDirectory::new(FileSource::new(path))
            }
            None => PracticeDirectory::embedded(),
        };

        let config = match config {
            Some(path) => RoiConfig::from_path(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => RoiConfig::default(),
        };

        Ok(Self { directory, config })
    }
}

pub fn lookup(ctx: &Context, code: &str) -> Result<()> {
    let practice = find_practice(&ctx.directory, code)?;
    print!("{}", render_practice(&practice));
    Ok(())
}

pub fn search(ctx: &Context, query: &str, limit: usize) -> Result<()> {
    let results = ctx.directory.search(query, limit);
    if results.is_empty() {
        println!("No practices match \"{}\"", query);
        return Ok(());
    }
    print!("{}", render_search_results(&results));
    Ok(())
}

pub fn validate(code: &str) -> Result<()> {
    if validate_identifier_format(code) {
        println!("{} is a well-formed ODS code", code.trim().to_uppercase());
        Ok(())
    } else {
        bail!("\"{}\" is not a valid ODS code (5-7 letters or digits)", code.trim())
    }
}

pub fn calculate(ctx: Context, args: CalculateArgs) -> Result<()> {
    let config = match args.pricing {
        Some(pricing) => ctx.config.with_pricing(pricing.into()),
        None => ctx.config,
    };
    let engine = RoiEngine::new(config);

    let overrides = RoiOverrides {
        monthly_volume: args.monthly_volume,
        hourly_cost: args.hourly_cost,
        baseline_time: args.baseline_time,
        edit_time: args.edit_time,
    };

    let (report, code) = match (args.code, args.name, args.list_size) {
        (Some(code), _, _) => {
            let practice = find_practice(&ctx.directory, &code)?;
            let report = engine.calculate_for(&practice, &overrides);
            (report, Some(practice.code))
        }
        (None, Some(name), Some(list_size)) => {
            let (name, list_size) = ManualPractice::new(name, list_size)
                .validate()
                .context("Invalid manual practice entry")?;
            (engine.calculate(&name, i64::from(list_size), &overrides), None)
        }
        _ => bail!("Either --code or both --name and --list-size are required"),
    };

    info!(
        practice = %report.practice_name,
        pricing = %report.pricing,
        roi = report.roi,
        "Calculated ROI"
    );

    let export = RoiSummaryExport::from_report(&report, code.as_deref());
    match args.output_dir {
        Some(dir) => {
            let path = save_report(&export, args.format, &dir)?;
            println!("Saved report to {}", path.display());
        }
        None => print!("{}", render_report(&export, args.format)?),
    }
    Ok(())
}

fn render_report(export: &RoiSummaryExport, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => export.to_text(),
        OutputFormat::Json => format!("{}\n", export.to_json()?),
        OutputFormat::Csv => export.to_csv(),
    })
}

/// Write the report as `<dir>/<Practice_Name>_ROI_Report.<ext>`.
fn save_report(export: &RoiSummaryExport, format: OutputFormat, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(format!("{}.{}", export.suggested_filename(), format.extension()));
    let contents = render_report(export, format)?;
    std::fs::write(&path, contents)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    debug!(path = %path.display(), "Saved report");
    Ok(path)
}

fn find_practice(directory: &PracticeDirectory, code: &str) -> Result<PracticeRecord> {
    if let Some(practice) = directory.lookup(code) {
        return Ok(practice);
    }

    let code = code.trim().to_uppercase();
    let suggestions = directory.suggest(&code, SUGGESTION_LIMIT);
    if suggestions.is_empty() {
        bail!("No practice found with code {}", code);
    }

    let hint = suggestions
        .iter()
        .map(|p| format!("{} ({})", p.code, p.name))
        .collect::<Vec<_>>()
        .join(", ");
    bail!("No practice found with code {}. Did you mean: {}?", code, hint)
}

fn render_practice(practice: &PracticeRecord) -> String {
    let mut out = format!(
        "{}  {}\n  {} registered patients\n",
        practice.code,
        practice.name,
        format_count(f64::from(practice.list_size))
    );
    if let Some(address) = &practice.address {
        out.push_str(&format!("  {}\n", address));
    }
    out
}

fn render_search_results(results: &[PracticeRecord]) -> String {
    let width = results.iter().map(|p| p.name.chars().count()).max().unwrap_or(0);
    results
        .iter()
        .map(|p| {
            format!(
                "{:<7} {:<width$}  {:>7}\n",
                p.code,
                p.name,
                format_count(f64::from(p.list_size)),
                width = width
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_unknown_code_suggests_neighbours() {
        let directory = PracticeDirectory::embedded();
        let err = find_practice(&directory, "e87009").unwrap_err().to_string();

        assert!(err.starts_with("No practice found with code E87009"));
        assert!(err.contains("Did you mean: E87001"));
    }

    #[test]
    fn test_render_practice() {
        let practice = PracticeRecord::new("E87001", "The Lister Medical Centre", 8_500)
            .with_address("London");
        assert_eq!(
            render_practice(&practice),
            "E87001  The Lister Medical Centre\n  8,500 registered patients\n  London\n"
        );
    }

    #[test]
    fn test_render_search_results_aligns_names() {
        let results = vec![
            PracticeRecord::new("A00001", "Short", 900),
            PracticeRecord::new("A00002", "Much Longer Name", 12_000),
        ];
        let lines: Vec<_> = render_search_results(&results)
            .lines()
            .map(str::to_string)
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), lines[1].len());
        assert!(lines[1].ends_with("12,000"));
    }

    #[test]
    fn test_context_with_dataset_and_config() {
        let mut dataset = tempfile::NamedTempFile::new().unwrap();
        writeln!(dataset, "code,name,list_size").unwrap();
        writeln!(dataset, "P00001,Harbour View Surgery,6400").unwrap();

        let mut config = tempfile::NamedTempFile::new().unwrap();
        write!(config, r#"{{"hourly_cost": 150.0}}"#).unwrap();

        let ctx = Context::open(Some(dataset.path()), Some(config.path())).unwrap();
        assert!(find_practice(&ctx.directory, "P00001").is_ok());
        assert!(ctx.directory.lookup("E87001").is_none());
        assert_eq!(ctx.config.hourly_cost, 150.0);
    }

    #[test]
    fn test_context_rejects_bad_config() {
        let mut config = tempfile::NamedTempFile::new().unwrap();
        write!(config, "not json").unwrap();

        let err = Context::open(None, Some(config.path())).err().unwrap();
        assert!(err.to_string().starts_with("Failed to load config"));
    }

    #[test]
    fn test_save_report_uses_practice_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let report =
            RoiEngine::default().calculate("Riverside Surgery", 7_400, &RoiOverrides::none());
        let export = RoiSummaryExport::from_report(&report, None);

        let path = save_report(&export, OutputFormat::Csv, dir.path()).unwrap();
        assert_eq!(path, dir.path().join("Riverside_Surgery_ROI_Report.csv"));

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("practice_name,practice_code,label,value,description\n"));
    }

    #[test]
    fn test_save_report_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let report =
            RoiEngine::default().calculate("Riverside Surgery", 7_400, &RoiOverrides::none());
        let export = RoiSummaryExport::from_report(&report, None);

        let err = save_report(&export, OutputFormat::Json, &dir.path().join("missing"))
            .unwrap_err()
            .to_string();
        assert!(err.starts_with("Failed to write report"));
    }

    #[test]
    fn test_validate_command() {
        assert!(validate(" e87001 ").is_ok());
        assert!(validate("E87-01").is_err());
    }
}
