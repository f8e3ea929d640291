//! In-memory relations built from the three registration snapshots.
//!
//! All relations are keyed by name in ordered maps. Iteration order is
//! ascending by name (byte order), which fixes the order in which rules
//! visit records and therefore the order of the emitted operation log.

use std::collections::BTreeMap;

use crate::identifier::Identifier;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Current holder of a registered name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipRecord {
    pub name: String,
    pub owner: Identifier,
}

/// Resolver attributes stored for one name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRecord {
    pub name: String,
    pub attributes: BTreeMap<String, String>,
}

impl AttributeRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }
}

/// Reverse-resolution pointer carried by one name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReversePointerRecord {
    pub name: String,
    pub target: Identifier,
}

// ---------------------------------------------------------------------------
// Ownership
// ---------------------------------------------------------------------------

/// Ownership records by name, plus an index of holdings per owner.
#[derive(Debug, Clone, Default)]
pub struct OwnershipRelation {
    by_name: BTreeMap<String, OwnershipRecord>,
    by_owner: BTreeMap<Identifier, Vec<OwnershipRecord>>,
}

impl OwnershipRelation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one snapshot row.
    ///
    /// A repeated name replaces the earlier row in the name map, but every
    /// row is appended to its owner's holdings.
    pub fn insert(&mut self, record: OwnershipRecord) {
        self.by_owner
            .entry(record.owner.clone())
            .or_default()
            .push(record.clone());
        self.by_name.insert(record.name.clone(), record);
    }

    pub fn get(&self, name: &str) -> Option<&OwnershipRecord> {
        self.by_name.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Records in ascending name order.
    pub fn records(&self) -> impl Iterator<Item = &OwnershipRecord> {
        self.by_name.values()
    }

    /// Owners in ascending identifier order, each with their holdings in
    /// snapshot row order.
    pub fn holdings(&self) -> impl Iterator<Item = (&Identifier, &[OwnershipRecord])> {
        self.by_owner
            .iter()
            .map(|(owner, records)| (owner, records.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl FromIterator<OwnershipRecord> for OwnershipRelation {
    fn from_iter<I: IntoIterator<Item = OwnershipRecord>>(iter: I) -> Self {
        let mut relation = Self::new();
        for record in iter {
            relation.insert(record);
        }
        relation
    }
}

// ---------------------------------------------------------------------------
// Attributes
// ---------------------------------------------------------------------------

/// Attribute records by name.
#[derive(Debug, Clone, Default)]
pub struct AttributeRelation {
    records: BTreeMap<String, AttributeRecord>,
}

impl AttributeRelation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value` on `name`, creating the record if needed.
    /// Returns the previous value of the key.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        let name = name.into();
        self.records
            .entry(name.clone())
            .or_insert_with(|| AttributeRecord::new(name))
            .attributes
            .insert(key.into(), value.into())
    }

    /// Delete `key` from `name`. A record left without attributes is
    /// dropped. Returns the removed value.
    pub fn remove(&mut self, name: &str, key: &str) -> Option<String> {
        let record = self.records.get_mut(name)?;
        let removed = record.attributes.remove(key);
        if record.attributes.is_empty() {
            self.records.remove(name);
        }
        removed
    }

    pub fn get(&self, name: &str) -> Option<&AttributeRecord> {
        self.records.get(name)
    }

    pub fn value(&self, name: &str, key: &str) -> Option<&str> {
        self.records
            .get(name)
            .and_then(|record| record.attributes.get(key))
            .map(String::as_str)
    }

    /// Records in ascending name order.
    pub fn records(&self) -> impl Iterator<Item = &AttributeRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Reverse pointers
// ---------------------------------------------------------------------------

/// Reverse-resolution pointers by name.
#[derive(Debug, Clone, Default)]
pub struct ReversePointerRelation {
    records: BTreeMap<String, ReversePointerRecord>,
}

impl ReversePointerRelation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the pointer on `record.name`.
    pub fn insert(&mut self, record: ReversePointerRecord) -> Option<ReversePointerRecord> {
        self.records.insert(record.name.clone(), record)
    }

    pub fn remove(&mut self, name: &str) -> Option<ReversePointerRecord> {
        self.records.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&ReversePointerRecord> {
        self.records.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    /// Records in ascending name order.
    pub fn records(&self) -> impl Iterator<Item = &ReversePointerRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<ReversePointerRecord> for ReversePointerRelation {
    fn from_iter<I: IntoIterator<Item = ReversePointerRecord>>(iter: I) -> Self {
        let mut relation = Self::new();
        for record in iter {
            relation.insert(record);
        }
        relation
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// The three relations a reconciliation run works on.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub ownership: OwnershipRelation,
    pub attributes: AttributeRelation,
    pub reverse_pointers: ReversePointerRelation,
}
