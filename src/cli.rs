//! Command-line interface argument parsing.

use std::path::PathBuf;

use clap::Parser;

/// saleslens - sales analytics dashboard for tabular sales data
///
/// Loads a sales dataset, filters it by Region / Category / Store_ID, and
/// prints summary metrics, revenue aggregates, a correlation matrix, and a
/// row preview. The filtered view can be exported as CSV.
///
/// Examples:
///   saleslens sales.csv
///   saleslens sales.csv --region East,West --category Electronics
///   saleslens sales.csv --store S001 --export east_s001.csv
///   saleslens sales.csv --format json
///   saleslens sales.csv --list-values
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Sales data file (.csv, .json, or .parquet)
    #[arg(value_name = "FILE")]
    pub data_file: PathBuf,

    /// Regions to include (repeatable or comma-separated)
    ///
    /// Unset means every region is selected.
    #[arg(long, value_name = "REGION", value_delimiter = ',')]
    pub region: Option<Vec<String>>,

    /// Product categories to include (repeatable or comma-separated)
    #[arg(long, value_name = "CATEGORY", value_delimiter = ',')]
    pub category: Option<Vec<String>>,

    /// Store IDs to include (repeatable or comma-separated)
    #[arg(long, value_name = "STORE", value_delimiter = ',')]
    pub store: Option<Vec<String>>,

    /// Write the filtered view to FILE as CSV
    #[arg(short, long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Output format for the dashboard (text, json)
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Rows shown in the preview table
    #[arg(long, default_value = "20", value_name = "ROWS")]
    pub preview: usize,

    /// Print the distinct values per filter dimension and exit
    #[arg(long)]
    pub list_values: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Output format for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain-text dashboard (default)
    #[default]
    Text,
    /// Pretty-printed JSON ViewModel
    Json,
}

impl Args {
    /// Log level derived from the verbosity flags.
    pub fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            log::LevelFilter::Error
        } else if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }
}
