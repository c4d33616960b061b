//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `menu`: Menu items and their grouping by category
//! - `transaction`: Synthesized transactions and payment methods
//! - `error`: Error types for the dataset generator

pub mod error;
pub mod menu;
pub mod transaction;

pub use error::GeneratorError;
pub use menu::{MenuByCategory, MenuItem, ADD_ON_CATEGORY};
pub use transaction::{PaymentMethod, Transaction, TransactionId, LIST_SEPARATOR};
