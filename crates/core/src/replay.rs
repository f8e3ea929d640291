//! In-memory playback of an operation log.
//!
//! Mirrors what the import routine does against the live resolver, one
//! operation at a time and in log order:
//!
//! - `InsertOrIgnore` writes only when the key is absent.
//! - `Upsert` always writes.
//! - `Remove` deletes the key whatever its value.
//!
//! Writes to the reverse-resolution key also update the reverse-pointer
//! relation, so a replayed snapshot can be fed straight back to the planner.

use crate::error::CoreError;
use crate::identifier::Identifier;
use crate::keys::REVERSE_RESOLUTION_KEY;
use crate::operation::{CorrectiveOperation, OperationKind};
use crate::relation::{ReversePointerRecord, Snapshot};

/// Outcome counts of a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    /// Operations that changed the snapshot.
    pub applied: usize,
    /// Operations that were no-ops (existing key for `InsertOrIgnore`,
    /// missing key for `Remove`).
    pub ignored: usize,
}

/// Apply `operations` to `snapshot` in order.
///
/// Fails only if a reverse-pointer write carries a value that is not a
/// valid identifier; operations before the failing one stay applied.
pub fn apply_operations(
    snapshot: &mut Snapshot,
    operations: &[CorrectiveOperation],
) -> Result<ReplayStats, CoreError> {
    let mut stats = ReplayStats::default();

    for op in operations {
        let changed = apply_one(snapshot, op)?;
        if changed {
            stats.applied += 1;
        } else {
            stats.ignored += 1;
        }
    }

    Ok(stats)
}

fn apply_one(snapshot: &mut Snapshot, op: &CorrectiveOperation) -> Result<bool, CoreError> {
    let is_reverse_key = op.key == REVERSE_RESOLUTION_KEY;

    match op.kind {
        OperationKind::InsertOrIgnore => {
            if snapshot.attributes.value(&op.name, &op.key).is_some() {
                return Ok(false);
            }
            write(snapshot, op, is_reverse_key)?;
            Ok(true)
        }
        OperationKind::Upsert => {
            write(snapshot, op, is_reverse_key)?;
            Ok(true)
        }
        OperationKind::Remove => {
            let removed_attribute = snapshot.attributes.remove(&op.name, &op.key).is_some();
            let removed_pointer =
                is_reverse_key && snapshot.reverse_pointers.remove(&op.name).is_some();
            Ok(removed_attribute || removed_pointer)
        }
    }
}

fn write(snapshot: &mut Snapshot, op: &CorrectiveOperation, is_reverse_key: bool) -> Result<(), CoreError> {
    if is_reverse_key {
        let target = Identifier::parse(&op.value)?;
        snapshot.reverse_pointers.insert(ReversePointerRecord {
            name: op.name.clone(),
            target,
        });
    }
    snapshot
        .attributes
        .insert(op.name.clone(), op.key.clone(), op.value.clone());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{ACCOUNT_ID_KEY, PRINCIPAL_KEY};
    use crate::planner::plan_operations;
    use crate::testing::{owned, pointer, CANISTER_1, USER_1, USER_2, USER_3};

    #[test]
    fn insert_or_ignore_keeps_existing_value() {
        let mut snapshot = Snapshot::default();
        snapshot.attributes.insert("a.x", PRINCIPAL_KEY, "old");

        let stats = apply_operations(
            &mut snapshot,
            &[CorrectiveOperation::insert_or_ignore("a.x", PRINCIPAL_KEY, "new")],
        )
        .unwrap();

        assert_eq!(stats, ReplayStats { applied: 0, ignored: 1 });
        assert_eq!(snapshot.attributes.value("a.x", PRINCIPAL_KEY), Some("old"));
    }

    #[test]
    fn upsert_overwrites() {
        let mut snapshot = Snapshot::default();
        snapshot.attributes.insert("a.x", PRINCIPAL_KEY, "old");
        apply_operations(
            &mut snapshot,
            &[CorrectiveOperation::upsert("a.x", PRINCIPAL_KEY, "new")],
        )
        .unwrap();
        assert_eq!(snapshot.attributes.value("a.x", PRINCIPAL_KEY), Some("new"));
    }

    #[test]
    fn reverse_key_writes_update_pointer_relation() {
        let mut snapshot = Snapshot::default();
        apply_operations(
            &mut snapshot,
            &[CorrectiveOperation::upsert("a.x", REVERSE_RESOLUTION_KEY, USER_1)],
        )
        .unwrap();
        assert_eq!(
            snapshot.reverse_pointers.get("a.x").unwrap().target.as_str(),
            USER_1
        );

        apply_operations(
            &mut snapshot,
            &[CorrectiveOperation::remove("a.x", REVERSE_RESOLUTION_KEY)],
        )
        .unwrap();
        assert!(snapshot.reverse_pointers.is_empty());
        assert!(snapshot.attributes.is_empty());
    }

    #[test]
    fn invalid_reverse_target_fails() {
        let mut snapshot = Snapshot::default();
        let err = apply_operations(
            &mut snapshot,
            &[CorrectiveOperation::upsert("a.x", REVERSE_RESOLUTION_KEY, "bogus")],
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::MalformedIdentifier { .. }));
    }

    #[test]
    fn later_operation_wins() {
        let mut snapshot = Snapshot::default();
        apply_operations(
            &mut snapshot,
            &[
                CorrectiveOperation::upsert("a.x", REVERSE_RESOLUTION_KEY, USER_1),
                CorrectiveOperation::remove("a.x", REVERSE_RESOLUTION_KEY),
            ],
        )
        .unwrap();
        assert!(!snapshot.reverse_pointers.contains("a.x"));
    }

    /// A snapshot with every kind of inconsistency except a mismatched
    /// pointer on a name its owner still holds.
    fn messy_snapshot() -> Snapshot {
        let mut snapshot = Snapshot {
            ownership: [
                owned("alice.x", USER_1),
                owned("bob.x", USER_1),
                owned("carol.x", USER_2),
                owned("dave.x", USER_3),
                owned("erin.x", USER_3),
                owned("market.x", CANISTER_1),
            ]
            .into_iter()
            .collect(),
            reverse_pointers: [
                pointer("erin.x", USER_3),
                pointer("gone.x", USER_1),
            ]
            .into_iter()
            .collect(),
            ..Default::default()
        };
        snapshot.attributes.insert("ghost.x", ACCOUNT_ID_KEY, "deadbeef");
        snapshot.attributes.insert("ghost.x", "custom.note", "hello");
        snapshot.attributes.insert("bob.x", PRINCIPAL_KEY, USER_1);
        snapshot.attributes.insert("carol.x", ACCOUNT_ID_KEY, "stale");
        snapshot
            .attributes
            .insert("gone.x", REVERSE_RESOLUTION_KEY, USER_1);
        snapshot
    }

    #[test]
    fn replayed_plan_leaves_nothing_to_do() {
        let mut snapshot = messy_snapshot();
        let plan = plan_operations(&snapshot).unwrap();
        assert!(!plan.is_empty());

        apply_operations(&mut snapshot, &plan.operations).unwrap();

        let second = plan_operations(&snapshot).unwrap();
        assert!(second.is_empty(), "residual operations: {:?}", second.operations);
    }

    #[test]
    fn replay_of_empty_plan_is_noop() {
        let mut snapshot = messy_snapshot();
        let stats = apply_operations(&mut snapshot, &[]).unwrap();
        assert_eq!(stats, ReplayStats::default());
    }

    #[test]
    fn mismatch_on_held_name_converges_on_second_pass() {
        // alice.x points at USER_2 while USER_1 holds it. The pointer blocks
        // a default for USER_1 on the first pass and is removed; the second
        // pass creates the default.
        let mut snapshot = Snapshot {
            ownership: [owned("alice.x", USER_1)].into_iter().collect(),
            reverse_pointers: [pointer("alice.x", USER_2)].into_iter().collect(),
            ..Default::default()
        };
        snapshot
            .attributes
            .insert("alice.x", REVERSE_RESOLUTION_KEY, USER_2);

        let first = plan_operations(&snapshot).unwrap();
        assert_eq!(first.summary.default_reverse_pointers, 0);
        apply_operations(&mut snapshot, &first.operations).unwrap();

        let second = plan_operations(&snapshot).unwrap();
        assert_eq!(
            second.operations,
            vec![CorrectiveOperation::upsert(
                "alice.x",
                REVERSE_RESOLUTION_KEY,
                USER_1
            )]
        );
        apply_operations(&mut snapshot, &second.operations).unwrap();

        assert!(plan_operations(&snapshot).unwrap().is_empty());
    }
}
