//! Error handling for district segregation ranking.

use std::io;
use std::path::{Path, PathBuf};

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

pub mod util;

/// Specialized error type for the ranking pipeline
#[derive(Debug, thiserror::Error)]
pub enum SegregationError {
    /// A non-marker cell that is not a non-negative integer
    #[error("Data integrity error at row {row}, column '{column}': cannot parse '{value}' as a count")]
    DataIntegrity {
        /// 1-based data row number (header excluded)
        row: usize,
        /// Column the cell came from
        column: String,
        /// Raw cell text
        value: String,
    },

    /// A selector value outside its closed set
    #[error("Invalid {kind} '{value}', expected one of: {expected}")]
    InvalidSelector {
        /// Which selector was being parsed
        kind: &'static str,
        /// Rejected input
        value: String,
        /// Accepted values, comma separated
        expected: String,
    },

    /// A required input column is absent from the table
    #[error("Required column '{column}' not found in {source_name}")]
    MissingColumn {
        /// Column name from the mapping
        column: String,
        /// File or batch description
        source_name: String,
    },

    /// Error with configuration values or files
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error opening, reading or writing a file
    #[error("IO error{}: {source}", path_suffix(.path))]
    Io {
        /// Underlying error
        #[source]
        source: io::Error,
        /// Path involved, when known
        path: Option<PathBuf>,
    },

    /// Error processing Arrow data
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error processing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error converting between rows and record batches
    #[error("Serde arrow error: {0}")]
    SerdeArrow(#[from] serde_arrow::Error),

    /// Error reading or writing JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" ({})", p.display()))
        .unwrap_or_default()
}

impl From<io::Error> for SegregationError {
    fn from(source: io::Error) -> Self {
        Self::Io { source, path: None }
    }
}

impl SegregationError {
    /// Create an IO error tied to a path
    pub fn io_at(source: io::Error, path: &Path) -> Self {
        Self::Io {
            source,
            path: Some(path.to_path_buf()),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether the error came from the input data rather than the environment
    #[must_use]
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::DataIntegrity { .. } | Self::MissingColumn { .. }
        )
    }
}

/// Result type for ranking operations
pub type Result<T> = std::result::Result<T, SegregationError>;
