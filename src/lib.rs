//! Cafe Dataset Generator Library
//! # Overview
//!
//! This library synthesizes a point-of-sale transaction dataset for a cafe from
//! a menu CSV, writes it as CSV, and summarizes it.
//!
//! # Architecture
//!
//! The system is a linear pipeline organized into several components:
//!
//! - [`types`] - Core data types (MenuItem, Transaction, etc.)
//! - [`cli`] - CLI arguments parsing and log setup
//! - [`io`] - Menu sources, menu parsing and the transaction CSV format
//! - [`core`] - Business logic components:
//!   - [`core::generator`] - Random order synthesis
//!   - [`core::stats`] - Summary statistics
//!   - [`core::analytics`] - Sales breakdowns
//!   - [`core::report`] - Human-readable report
//! - [`pipeline`] - Stage orchestration
//!
//! # Order Model
//!
//! Each transaction gets:
//!
//! - **Date**: uniform over 2023-01-01..=2023-12-31
//! - **Time**: between 08:00 and 20:59
//! - **Items**: 1 to 3 main items (never from "Add-Ons"), quantity 1 or 2 each
//! - **Add-on**: with probability 0.5, one "Add-Ons" item at quantity 1
//! - **Payment**: Card, Cash, UPI or Mobile Wallet
//!
//! The random source is injected, so a seeded `StdRng` reproduces a dataset.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod pipeline;
pub mod types;

pub use crate::core::{compute_stats, generate, DatasetStats, GenerationConfig, TransactionGenerator};
pub use crate::io::{read_transactions_file, write_transactions_file};
pub use pipeline::{DatasetPipeline, PipelineConfig};
pub use types::{
    GeneratorError, MenuByCategory, MenuItem, PaymentMethod, Transaction, TransactionId,
};
