//! Consistency rules.
//!
//! Each rule is a pure function over one or two relations that reports what
//! has to change to restore a single invariant:
//!
//! - [`orphaned_attributes`]: attributes of names nobody owns are removed.
//! - [`missing_default_attributes`]: user-owned names get the account-id
//!   and principal attributes of their owner.
//! - [`default_reverse_pointers`]: every user without a reverse pointer gets
//!   one on their lexicographically first name.
//! - [`mismatched_reverse_pointers`]: pointers on unowned names, or pointing
//!   at someone other than the owner, are removed.
//!
//! Rules never look at each other's output.

use crate::error::CoreError;
use crate::identifier::Identifier;
use crate::keys::{DefaultKey, REVERSE_RESOLUTION_KEY};
use crate::operation::CorrectiveOperation;
use crate::relation::{
    AttributeRelation, OwnershipRelation, ReversePointerRecord, ReversePointerRelation,
};

// ── Rule identities ──────────────────────────────────────────────────

/// The four rules, in the order the planner runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    OrphanedAttribute,
    MissingDefaultAttribute,
    DefaultReversePointer,
    ReversePointerMismatch,
}

impl RuleKind {
    pub const ORDER: [RuleKind; 4] = [
        RuleKind::OrphanedAttribute,
        RuleKind::MissingDefaultAttribute,
        RuleKind::DefaultReversePointer,
        RuleKind::ReversePointerMismatch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OrphanedAttribute => "orphaned_attribute",
            Self::MissingDefaultAttribute => "missing_default_attribute",
            Self::DefaultReversePointer => "default_reverse_pointer",
            Self::ReversePointerMismatch => "reverse_pointer_mismatch",
        }
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Rule items ───────────────────────────────────────────────────────

/// A default attribute a user-owned name lacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingAttributeItem {
    pub name: String,
    pub key: DefaultKey,
    pub value: String,
}

impl MissingAttributeItem {
    pub fn into_operation(self) -> CorrectiveOperation {
        CorrectiveOperation::insert_or_ignore(self.name, self.key.as_str(), self.value)
    }
}

/// The name chosen to carry an owner's reverse pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultReverseItem {
    pub name: String,
    pub owner: Identifier,
}

impl DefaultReverseItem {
    pub fn into_operation(self) -> CorrectiveOperation {
        CorrectiveOperation::upsert(self.name, REVERSE_RESOLUTION_KEY, self.owner.as_str())
    }
}

/// A reverse pointer that no longer matches ownership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MismatchedReverseItem {
    pub record: ReversePointerRecord,
}

impl MismatchedReverseItem {
    pub fn into_operation(self) -> CorrectiveOperation {
        CorrectiveOperation::remove(self.record.name, REVERSE_RESOLUTION_KEY)
    }
}

// ── Rules ────────────────────────────────────────────────────────────

/// Remove every attribute of every name that has no ownership record.
///
/// Operations follow attribute-relation order, then key order.
pub fn orphaned_attributes(
    ownership: &OwnershipRelation,
    attributes: &AttributeRelation,
) -> Vec<CorrectiveOperation> {
    attributes
        .records()
        .filter(|record| !ownership.contains(&record.name))
        .flat_map(|record| {
            record
                .attributes
                .keys()
                .map(move |key| CorrectiveOperation::remove(record.name.clone(), key.clone()))
        })
        .collect()
}

/// Find default attributes missing from names held by non-reserved owners.
///
/// For each qualifying name the account-id key is checked before the
/// principal key.
pub fn missing_default_attributes(
    ownership: &OwnershipRelation,
    attributes: &AttributeRelation,
) -> Result<Vec<MissingAttributeItem>, CoreError> {
    let mut items = Vec::new();

    for record in ownership.records() {
        if record.owner.is_reserved() {
            continue;
        }
        let existing = attributes.get(&record.name);
        for key in DefaultKey::REQUIRED {
            if existing.is_some_and(|attrs| attrs.has_key(key.as_str())) {
                continue;
            }
            let owner = owner_of(ownership, &record.name)?;
            items.push(MissingAttributeItem {
                name: record.name.clone(),
                key,
                value: key.default_value(owner),
            });
        }
    }

    Ok(items)
}

/// Pick a canonical name for every non-reserved owner none of whose names
/// carries a reverse pointer.
///
/// The canonical name is the smallest of the owner's names in byte order,
/// so repeated runs over the same snapshot always choose the same one.
pub fn default_reverse_pointers(
    ownership: &OwnershipRelation,
    reverse_pointers: &ReversePointerRelation,
) -> Vec<DefaultReverseItem> {
    ownership
        .holdings()
        .filter(|(owner, _)| !owner.is_reserved())
        .filter(|(_, names)| {
            !names
                .iter()
                .any(|record| reverse_pointers.contains(&record.name))
        })
        .filter_map(|(owner, names)| {
            let canonical = names.iter().map(|record| record.name.as_str()).min()?;
            Some(DefaultReverseItem {
                name: canonical.to_string(),
                owner: owner.clone(),
            })
        })
        .collect()
}

/// Find reverse pointers whose name is unowned or owned by someone other
/// than the pointer's target.
pub fn mismatched_reverse_pointers(
    ownership: &OwnershipRelation,
    reverse_pointers: &ReversePointerRelation,
) -> Vec<MismatchedReverseItem> {
    reverse_pointers
        .records()
        .filter(|record| match ownership.get(&record.name) {
            None => true,
            Some(owned) => owned.owner.as_str() != record.target.as_str(),
        })
        .map(|record| MismatchedReverseItem {
            record: record.clone(),
        })
        .collect()
}

fn owner_of<'a>(ownership: &'a OwnershipRelation, name: &str) -> Result<&'a Identifier, CoreError> {
    ownership
        .get(name)
        .map(|record| &record.owner)
        .ok_or_else(|| CoreError::MissingOwner {
            name: name.to_string(),
        })
}

// ── Tests ────────────────────────────────────────────────────────────
