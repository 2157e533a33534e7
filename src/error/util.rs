//! Utility functions for error handling
//!
//! Helpers for opening and creating files with the offending path attached to
//! the error.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Result, SegregationError};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(SegregationError::io_at(
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found, needed for: {purpose}"),
            ),
            path,
        ));
    }

    if !path.is_file() {
        return Err(SegregationError::io_at(
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("path is not a file, expected a file for: {purpose}"),
            ),
            path,
        ));
    }

    fs::File::open(path).map_err(|e| SegregationError::io_at(e, path))
}

/// Create a file, creating missing parent directories first
pub fn safe_create_file(path: &Path) -> Result<fs::File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| SegregationError::io_at(e, parent))?;
        }
    }

    fs::File::create(path).map_err(|e| SegregationError::io_at(e, path))
}
