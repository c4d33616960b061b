//! Error types for the cafe dataset generator
//!
//! Every failure in the pipeline is fatal: the binary reports it and exits.
//!
//! # Error Categories
//!
//! - **Source Errors**: menu file missing, HTTP failure, fetch timeout
//! - **Parse Errors**: malformed menu rows or transaction rows
//! - **Write Errors**: output file cannot be created or written
//! - **Dataset Errors**: statistics over nothing, menus with nothing to sell

use thiserror::Error;

/// Main error type for the dataset generator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeneratorError {
    /// The menu could not be fetched from its file or URL
    #[error("Menu source unavailable ({location}): {message}")]
    SourceUnavailable {
        /// File path or URL that was requested
        location: String,
        /// Description of the failure
        message: String,
    },

    /// A menu or transaction row could not be parsed
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// The output file could not be written
    #[error("Failed to write '{path}': {message}")]
    WriteError {
        /// Destination path
        path: String,
        /// Description of the I/O failure
        message: String,
    },

    /// Statistics were requested for zero transactions
    #[error("Cannot compute statistics for an empty dataset")]
    EmptyDataset,

    /// The menu has no item outside the add-on category
    #[error("Menu contains no purchasable items outside '{add_on_category}'")]
    EmptyMenu {
        /// Name of the excluded add-on category
        add_on_category: String,
    },
}

// Conversion from csv::Error to GeneratorError
impl From<csv::Error> for GeneratorError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        GeneratorError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl GeneratorError {
    /// Create a SourceUnavailable error
    pub fn source_unavailable(location: &str, message: impl ToString) -> Self {
        GeneratorError::SourceUnavailable {
            location: location.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a ParseError error
    pub fn parse_error(line: Option<u64>, message: impl ToString) -> Self {
        GeneratorError::ParseError {
            line,
            message: message.to_string(),
        }
    }

    /// Create a WriteError error
    pub fn write_error(path: &str, message: impl ToString) -> Self {
        GeneratorError::WriteError {
            path: path.to_string(),
            message: message.to_string(),
        }
    }
}
