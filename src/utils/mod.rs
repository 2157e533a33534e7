//! Shared utilities for reading and writing tables

pub mod logging;

pub use logging::{create_spinner, finish_and_clear};

/// Default number of rows per record batch when reading input
pub const DEFAULT_BATCH_SIZE: usize = 16384;

/// Batch size from `SEGREGATION_BATCH_SIZE`, falling back to the default
#[must_use]
pub fn batch_size() -> usize {
    std::env::var("SEGREGATION_BATCH_SIZE")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_BATCH_SIZE)
}
