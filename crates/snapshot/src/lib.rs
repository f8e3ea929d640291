//! Snapshot file I/O for the resolver operation generator.
//!
//! - [`loader`]: CSV snapshots into [`resolver_ops_core`] relations.
//! - [`log`]: the operation log, written for the import routine and read
//!   back for verification.
//! - [`files`]: standard file names inside a snapshot directory.

pub mod error;
pub mod files;
pub mod loader;
pub mod log;

pub use error::{SnapshotError, SnapshotResult};
pub use files::{operation_log_path, SnapshotFiles};
pub use loader::load_snapshot;
pub use log::{read_operation_log, write_operation_log};
