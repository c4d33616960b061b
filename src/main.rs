//! Cafe Dataset Generator CLI
//!
//! Command-line interface for synthesizing cafe transactions from a menu CSV.
//!
//! # Usage
//!
//! ```bash
//! cargo run --
//! cargo run -- --menu data/cafe_menu.csv --count 500 --seed 42
//! cargo run -- --output out/transactions.csv --sample 10 --top 5
//! cargo run -- --summarize cafe_transactions.csv
//! ```
//!
//! The dataset is written to the output file (default `cafe_transactions.csv`);
//! the report goes to stdout and logs go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (menu unavailable, malformed menu, unwritable output, etc.)

use cafe_dataset_generator::cli;
use cafe_dataset_generator::pipeline::{summarize_file, DatasetPipeline};
use std::process;

fn main() {
    let args = cli::parse_args();
    cli::setup_logging(args.verbose, args.quiet);

    let mut output = std::io::stdout().lock();
    let result = match &args.summarize {
        Some(path) => summarize_file(path, &args.to_report_options(), &mut output),
        None => DatasetPipeline::new(args.to_pipeline_config()).run(&mut output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
