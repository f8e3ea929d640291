//! The operation log file read by the import routine.
//!
//! One row per operation, in plan order, under the header
//! `name,operation,key,value`. The header is written even when there are
//! no operations.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use resolver_ops_core::{CorrectiveOperation, OperationKind};

use crate::error::{SnapshotError, SnapshotResult};
use crate::loader::{for_each_row, parse_file};

/// Column names of the operation log, in order.
pub const OPERATION_LOG_HEADER: [&str; 4] = ["name", "operation", "key", "value"];

#[derive(Debug, Deserialize)]
struct OperationRow {
    name: String,
    operation: String,
    key: String,
    value: String,
}

/// Render `operations` as CSV bytes.
pub fn encode_operation_log(operations: &[CorrectiveOperation]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    // Serde emits the header along with the first row.
    if operations.is_empty() {
        writer.write_record(OPERATION_LOG_HEADER)?;
    }
    for op in operations {
        writer.serialize(op)?;
    }

    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

/// Write the operation log to `path`, replacing any previous file.
///
/// The whole log is rendered before the file is touched, so a failed run
/// never leaves a partial log behind.
pub async fn write_operation_log(
    path: &Path,
    operations: &[CorrectiveOperation],
) -> SnapshotResult<()> {
    let data = encode_operation_log(operations).map_err(|source| SnapshotError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    tokio::fs::write(path, &data)
        .await
        .map_err(|source| SnapshotError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::info!(
        path = %path.display(),
        operations = operations.len(),
        bytes = data.len(),
        "Operation log written",
    );
    Ok(())
}

/// Parse an operation log. An unknown `operation` cell fails the whole
/// parse with [`resolver_ops_core::CoreError::UnknownOperation`].
pub fn parse_operation_log<R: Read>(
    source: &Path,
    reader: R,
) -> SnapshotResult<Vec<CorrectiveOperation>> {
    let mut operations = Vec::new();
    for_each_row(source, reader, |row: OperationRow| {
        let kind = OperationKind::parse(&row.operation)?;
        operations.push(CorrectiveOperation {
            name: row.name,
            key: row.key,
            value: row.value,
            kind,
        });
        Ok(())
    })?;
    Ok(operations)
}

pub async fn read_operation_log(path: &Path) -> SnapshotResult<Vec<CorrectiveOperation>> {
    parse_file(path, |source, file| parse_operation_log(source, file)).await
}
