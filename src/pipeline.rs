//! End-to-end dataset pipeline
//!
//! Fetch menu → parse → generate → write CSV → compute statistics → report.
//!
//! Every stage is fatal on failure; nothing is retried and a failed run may
//! leave no output file (or, if statistics fail, a complete one).

use crate::core::generator::{GenerationConfig, TransactionGenerator};
use crate::core::report::{render_report, ReportOptions};
use crate::core::stats::{compute_stats, DatasetStats};
use crate::io::menu_format::parse_menu;
use crate::io::menu_source::{create_menu_source, MenuSource, DEFAULT_FETCH_TIMEOUT};
use crate::io::transaction_csv::{read_transactions_file, write_transactions_file};
use crate::types::{GeneratorError, MenuByCategory};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Public cafe menu used when no source is given
pub const DEFAULT_MENU_URL: &str =
    "https://hebbkx1anhila5yf.public.blob.vercel-storage.com/Cafe_Menu-sm46Uw6wyFqxL84PKGycYVkdLSGDuL.csv";

/// Default output file name
pub const DEFAULT_OUTPUT_FILE: &str = "cafe_transactions.csv";

/// Default number of generated transactions
pub const DEFAULT_TRANSACTION_COUNT: u32 = 10_000;

/// Settings for one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Menu file path or URL
    pub menu_location: String,
    /// Timeout for HTTP menu downloads
    pub fetch_timeout: Duration,
    pub transaction_count: u32,
    /// Destination CSV, overwritten if present
    pub output_path: PathBuf,
    /// Fixed seed for reproducible output; entropy when `None`
    pub seed: Option<u64>,
    pub generation: GenerationConfig,
    pub report: ReportOptions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            menu_location: DEFAULT_MENU_URL.to_string(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            transaction_count: DEFAULT_TRANSACTION_COUNT,
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            seed: None,
            generation: GenerationConfig::default(),
            report: ReportOptions::default(),
        }
    }
}

/// Fetch and parse a menu
pub fn load_menu(source: &dyn MenuSource) -> Result<MenuByCategory, GeneratorError> {
    let location = source.describe();
    let data = source.fetch()?;
    debug!(source = %location, bytes = data.len(), "Fetched menu");

    let menu = parse_menu(&data)?;
    info!(
        source = %location,
        items = menu.item_count(),
        categories = menu.category_count(),
        "Loaded menu"
    );
    Ok(menu)
}

/// Generates a dataset and reports on it
#[derive(Debug, Clone)]
pub struct DatasetPipeline {
    config: PipelineConfig,
}

impl DatasetPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run against the configured menu location
    ///
    /// The report goes to `out`; the dataset goes to the configured file.
    pub fn run(&self, out: &mut dyn Write) -> Result<DatasetStats, GeneratorError> {
        let source = create_menu_source(&self.config.menu_location, self.config.fetch_timeout);
        self.run_with_source(source.as_ref(), out)
    }

    /// Run against an explicit menu source
    pub fn run_with_source(
        &self,
        source: &dyn MenuSource,
        out: &mut dyn Write,
    ) -> Result<DatasetStats, GeneratorError> {
        let menu = load_menu(source)?;

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let generator = TransactionGenerator::new(&menu, self.config.generation.clone())?;
        let transactions = generator.generate(self.config.transaction_count, &mut rng);
        info!(
            count = transactions.len(),
            seed = ?self.config.seed,
            "Generated transactions"
        );

        write_transactions_file(&transactions, &self.config.output_path)?;
        info!(path = %self.config.output_path.display(), "Wrote dataset");

        let stats = compute_stats(&transactions)?;
        render_report(out, &transactions, &stats, &self.config.report)?;
        Ok(stats)
    }
}

/// Load an existing transactions file and report on it
pub fn summarize_file(
    path: &Path,
    options: &ReportOptions,
    out: &mut dyn Write,
) -> Result<DatasetStats, GeneratorError> {
    let transactions = read_transactions_file(path)?;
    info!(path = %path.display(), count = transactions.len(), "Loaded dataset");

    let stats = compute_stats(&transactions)?;
    render_report(out, &transactions, &stats, options)?;
    Ok(stats)
}
