use std::path::PathBuf;

use resolver_ops_core::CoreError;

/// Errors reading snapshot files or writing the operation log.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed CSV in {}: {source}", .path.display())]
    Csv { path: PathBuf, source: csv::Error },

    /// A row parsed as CSV but its content is invalid. `row` counts data
    /// rows from 1, not counting the header.
    #[error("Invalid row {row} in {}: {source}", .path.display())]
    InvalidRow {
        path: PathBuf,
        row: usize,
        source: CoreError,
    },
}

pub type SnapshotResult<T> = Result<T, SnapshotError>;
