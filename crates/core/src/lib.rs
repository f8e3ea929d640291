//! Resolver operation reconciliation engine.
//!
//! Pure logic only (no I/O, no async). Given the ownership, attribute and
//! reverse-pointer relations of a registration snapshot, computes the
//! corrective operations that restore resolver consistency:
//!
//! - [`identifier`] / [`account_id`]: principal validation and the values
//!   derived from it.
//! - [`relation`]: ordered in-memory relations keyed by name.
//! - [`rules`]: the four consistency rules.
//! - [`planner`]: runs the rules in order and builds the operation log.
//! - [`replay`]: applies a log to an in-memory snapshot.

pub mod account_id;
pub mod error;
pub mod identifier;
pub mod keys;
pub mod operation;
pub mod planner;
pub mod relation;
pub mod replay;
pub mod rules;

#[cfg(test)]
mod testing;

pub use error::CoreError;
pub use identifier::{is_reserved_identifier, Identifier};
pub use operation::{CorrectiveOperation, OperationKind};
pub use planner::{plan_operations, OperationPlan, PlanSummary};
pub use relation::{
    AttributeRecord, AttributeRelation, OwnershipRecord, OwnershipRelation, ReversePointerRecord,
    ReversePointerRelation, Snapshot,
};
pub use replay::{apply_operations, ReplayStats};
