//! I/O module
//!
//! Handles menu loading and the transaction CSV format.
//!
//! # Components
//!
//! - `menu_source` - Where menu text comes from (file or HTTP)
//! - `menu_format` - Menu CSV parsing and validation
//! - `transaction_csv` - Transaction dataset serialization and reading back

pub mod menu_format;
pub mod menu_source;
pub mod transaction_csv;

pub use menu_format::{parse_menu, parse_menu_items};
pub use menu_source::{create_menu_source, FileMenuSource, HttpMenuSource, MenuSource};
pub use transaction_csv::{
    read_transactions_csv, read_transactions_file, write_transactions_csv,
    write_transactions_file,
};
