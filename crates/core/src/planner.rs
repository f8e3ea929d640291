//! Runs the consistency rules and flattens their output into one ordered
//! operation log.
//!
//! Rules run in [`RuleKind::ORDER`]. Their operations are concatenated as
//! they come: two rules touching the same `(name, key)` both end up in the
//! log, and the import routine plays them back in sequence.

use crate::error::CoreError;
use crate::operation::CorrectiveOperation;
use crate::relation::Snapshot;
use crate::rules::{self, RuleKind};

/// Number of operations each rule contributed to a plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanSummary {
    pub orphaned_attributes: usize,
    pub missing_default_attributes: usize,
    pub default_reverse_pointers: usize,
    pub mismatched_reverse_pointers: usize,
}

impl PlanSummary {
    pub fn count(&self, rule: RuleKind) -> usize {
        match rule {
            RuleKind::OrphanedAttribute => self.orphaned_attributes,
            RuleKind::MissingDefaultAttribute => self.missing_default_attributes,
            RuleKind::DefaultReversePointer => self.default_reverse_pointers,
            RuleKind::ReversePointerMismatch => self.mismatched_reverse_pointers,
        }
    }

    pub fn total(&self) -> usize {
        RuleKind::ORDER.iter().map(|rule| self.count(*rule)).sum()
    }
}

/// The ordered corrective operations for one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationPlan {
    pub operations: Vec<CorrectiveOperation>,
    pub summary: PlanSummary,
}

impl OperationPlan {
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// Compute every corrective operation `snapshot` needs.
pub fn plan_operations(snapshot: &Snapshot) -> Result<OperationPlan, CoreError> {
    let mut operations = Vec::new();
    let mut summary = PlanSummary::default();

    let orphaned = rules::orphaned_attributes(&snapshot.ownership, &snapshot.attributes);
    summary.orphaned_attributes = orphaned.len();
    operations.extend(orphaned);

    let missing = rules::missing_default_attributes(&snapshot.ownership, &snapshot.attributes)?;
    summary.missing_default_attributes = missing.len();
    operations.extend(missing.into_iter().map(|item| item.into_operation()));

    let defaults =
        rules::default_reverse_pointers(&snapshot.ownership, &snapshot.reverse_pointers);
    summary.default_reverse_pointers = defaults.len();
    operations.extend(defaults.into_iter().map(|item| item.into_operation()));

    let mismatched =
        rules::mismatched_reverse_pointers(&snapshot.ownership, &snapshot.reverse_pointers);
    summary.mismatched_reverse_pointers = mismatched.len();
    operations.extend(mismatched.into_iter().map(|item| item.into_operation()));

    Ok(OperationPlan {
        operations,
        summary,
    })
}
