//! Core business logic module
//!
//! This module contains the dataset generation components:
//! - `generator` - Random order synthesis over a menu
//! - `stats` - Summary statistics of a dataset
//! - `analytics` - Payment, best-seller, revenue and basket breakdowns
//! - `report` - Human-readable rendering of the above

pub mod analytics;
pub mod generator;
pub mod report;
pub mod stats;

pub use generator::{generate, GenerationConfig, TransactionGenerator};
pub use report::{render_report, ReportOptions};
pub use stats::{compute_stats, DatasetStats};
