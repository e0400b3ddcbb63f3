use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use scribe_roi_core::PricingStrategy;

#[derive(Parser, Debug)]
#[command(name = "scribe-roi")]
#[command(about = "GP practice lookup and Scribe ROI calculator", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Practice dataset CSV (defaults to the bundled sample practices)
    #[arg(long, global = true, env = "SCRIBE_ROI_DATASET")]
    pub dataset: Option<PathBuf>,

    /// Engine configuration JSON
    #[arg(long, global = true, env = "SCRIBE_ROI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up a practice by ODS code
    Lookup {
        /// ODS code, e.g. E87001
        code: String,
    },

    /// Search practices by code or name
    Search {
        /// Substring of the practice code or name
        query: String,

        /// Maximum number of results
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Check whether a code is a well-formed ODS code
    Validate {
        code: String,
    },

    /// Calculate ROI for a practice
    Calculate(CalculateArgs),
}

#[derive(Args, Debug)]
pub struct CalculateArgs {
    /// ODS code of a directory practice
    #[arg(long, conflicts_with_all = ["name", "list_size"], required_unless_present = "name")]
    pub code: Option<String>,

    /// Practice name for manual entry
    #[arg(long, requires = "list_size")]
    pub name: Option<String>,

    /// Registered patients for manual entry
    #[arg(long, requires = "name", allow_negative_numbers = true)]
    pub list_size: Option<i64>,

    /// Actual monthly Scribes, replacing the estimate
    #[arg(long)]
    pub monthly_volume: Option<f64>,

    /// Clinician cost per hour (£)
    #[arg(long)]
    pub hourly_cost: Option<f64>,

    /// Note writing time without Scribe (seconds)
    #[arg(long)]
    pub baseline_time: Option<f64>,

    /// Edit time with Scribe (seconds)
    #[arg(long)]
    pub edit_time: Option<f64>,

    /// License pricing strategy (overrides the config file)
    #[arg(long, value_enum)]
    pub pricing: Option<PricingArg>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Save the report into this directory instead of printing it
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PricingArg {
    /// Banded price per registered patient per year
    PerPatient,
    /// Banded price per Scribe
    PerUnit,
}

impl From<PricingArg> for PricingStrategy {
    fn from(arg: PricingArg) -> Self {
        match arg {
            PricingArg::PerPatient => PricingStrategy::PerPatient,
            PricingArg::PerUnit => PricingStrategy::PerUnit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}
