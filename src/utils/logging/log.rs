//! Log lines for table input and output
//!
//! Reading and writing share one format so a run's log shows each file with
//! its row count and timing.

use std::path::Path;
use std::time::Duration;

/// Log the start of a file operation
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{operation} {}", path.display());
}

/// Log the number of school rows read from an input table
pub fn log_rows_read(path: &Path, rows: usize, elapsed: Duration) {
    log::info!("Read {rows} school rows from {} in {elapsed:?}", path.display());
}

/// Log the number of district rows written to a result table
///
/// `elapsed` is omitted for small side outputs where timing adds nothing.
pub fn log_rows_written(path: &Path, rows: usize, elapsed: Option<Duration>) {
    match elapsed {
        Some(duration) => log::info!(
            "Wrote {rows} districts to {} in {duration:?}",
            path.display()
        ),
        None => log::info!("Wrote {rows} districts to {}", path.display()),
    }
}

/// Log a warning, optionally tied to a file
pub fn log_warning(message: &str, path: Option<&Path>) {
    match path {
        Some(path) => log::warn!("{message}: {}", path.display()),
        None => log::warn!("{message}"),
    }
}
