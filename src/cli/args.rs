use crate::core::analytics::{DEFAULT_MIN_CONFIDENCE, DEFAULT_MIN_SUPPORT};
use crate::core::generator::GenerationConfig;
use crate::core::report::ReportOptions;
use crate::io::menu_source::DEFAULT_FETCH_TIMEOUT;
use crate::pipeline::{
    PipelineConfig, DEFAULT_MENU_URL, DEFAULT_OUTPUT_FILE, DEFAULT_TRANSACTION_COUNT,
};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// Generate a synthetic cafe point-of-sale dataset from a menu CSV
#[derive(Parser, Debug)]
#[command(name = "cafe-dataset-generator")]
#[command(about = "Generate a synthetic cafe transaction dataset from a menu CSV", long_about = None)]
pub struct CliArgs {
    /// Menu CSV location (file path or http(s) URL)
    #[arg(
        long = "menu",
        value_name = "SOURCE",
        default_value = DEFAULT_MENU_URL,
        help = "Menu CSV file path or URL with columns Category, Item, Price (INR)"
    )]
    pub menu: String,

    /// Number of transactions to generate
    #[arg(
        short = 'n',
        long = "count",
        value_name = "N",
        default_value_t = DEFAULT_TRANSACTION_COUNT,
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Number of transactions to generate"
    )]
    pub count: u32,

    /// Output CSV path
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        default_value = DEFAULT_OUTPUT_FILE,
        help = "Output CSV path (overwritten if it exists)"
    )]
    pub output: PathBuf,

    /// Seed for reproducible datasets
    #[arg(long = "seed", value_name = "SEED", help = "Seed for a reproducible dataset")]
    pub seed: Option<u64>,

    /// Sample rows printed in the report
    #[arg(
        long = "sample",
        value_name = "ROWS",
        default_value_t = 5,
        help = "Number of leading transactions shown in the report"
    )]
    pub sample: usize,

    /// Rows in the best-sellers table
    #[arg(
        long = "top",
        value_name = "ROWS",
        default_value_t = 10,
        help = "Number of best-selling items listed in the report"
    )]
    pub top: usize,

    /// Support threshold for item pairs
    #[arg(
        long = "min-support",
        value_name = "FRACTION",
        default_value_t = DEFAULT_MIN_SUPPORT,
        value_parser = parse_fraction,
        help = "Minimum share of orders (0 to 1) for an item pair to be reported"
    )]
    pub min_support: f64,

    /// Confidence threshold for association rules
    #[arg(
        long = "min-confidence",
        value_name = "FRACTION",
        default_value_t = DEFAULT_MIN_CONFIDENCE,
        value_parser = parse_fraction,
        help = "Minimum confidence (0 to 1) for an association rule to be reported"
    )]
    pub min_confidence: f64,

    /// HTTP fetch timeout in seconds
    #[arg(
        long = "timeout-secs",
        value_name = "SECS",
        help = "Menu download timeout in seconds (default: 30)"
    )]
    pub timeout_secs: Option<u64>,

    /// Report on an existing dataset instead of generating one
    #[arg(
        long = "summarize",
        value_name = "PATH",
        help = "Print the report for an existing transactions CSV and exit"
    )]
    pub summarize: Option<PathBuf>,

    /// Debug logging
    #[arg(short = 'v', long = "verbose", conflicts_with = "quiet")]
    pub verbose: bool,

    /// Errors only
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl CliArgs {
    /// Create a PipelineConfig from CLI arguments
    ///
    /// A zero timeout falls back to the default with a warning.
    pub fn to_pipeline_config(&self) -> PipelineConfig {
        let fetch_timeout = match self.timeout_secs {
            Some(0) => {
                warn!(
                    "Invalid timeout (0s), using default ({}s)",
                    DEFAULT_FETCH_TIMEOUT.as_secs()
                );
                DEFAULT_FETCH_TIMEOUT
            }
            Some(secs) => Duration::from_secs(secs),
            None => DEFAULT_FETCH_TIMEOUT,
        };

        PipelineConfig {
            menu_location: self.menu.clone(),
            fetch_timeout,
            transaction_count: self.count,
            output_path: self.output.clone(),
            seed: self.seed,
            generation: GenerationConfig::default(),
            report: self.to_report_options(),
        }
    }

    /// Report settings; the title reflects generate vs. summarize mode
    pub fn to_report_options(&self) -> ReportOptions {
        let title = match &self.summarize {
            Some(path) => format!("Summary of {}.", path.display()),
            None => ReportOptions::default().title,
        };

        ReportOptions {
            title,
            sample_size: self.sample,
            top_items: self.top,
            min_support: self.min_support,
            min_confidence: self.min_confidence,
        }
    }
}

fn parse_fraction(value: &str) -> Result<f64, String> {
    let fraction: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    if (0.0..=1.0).contains(&fraction) {
        Ok(fraction)
    } else {
        Err(format!("{} is outside 0..=1", fraction))
    }
}
