//! Snapshot directory layout.

use std::path::{Path, PathBuf};

/// Ownership snapshot, columns `name,owner`.
pub const OWNERSHIP_FILE: &str = "RegistrarRecords.csv";

/// Attribute snapshot, columns `name,key,value`.
pub const ATTRIBUTES_FILE: &str = "ResolverRecords.csv";

/// Reverse-pointer snapshot, columns `name,value`.
pub const REVERSE_POINTERS_FILE: &str = "ResolverReverseRecords.csv";

/// Generated operation log, columns `name,operation,key,value`.
pub const OPERATION_LOG_FILE: &str = "ImportResolverRecordOperations.csv";

/// Paths of the three input snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotFiles {
    pub ownership: PathBuf,
    pub attributes: PathBuf,
    pub reverse_pointers: PathBuf,
}

impl SnapshotFiles {
    /// The standard file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            ownership: dir.join(OWNERSHIP_FILE),
            attributes: dir.join(ATTRIBUTES_FILE),
            reverse_pointers: dir.join(REVERSE_POINTERS_FILE),
        }
    }
}

/// Default operation log location inside `dir`.
pub fn operation_log_path(dir: impl AsRef<Path>) -> PathBuf {
    dir.as_ref().join(OPERATION_LOG_FILE)
}
