//! Corrective operations: the unit of repair written to the operation log.

use serde::Serialize;

use crate::error::CoreError;

/// How the import routine applies an operation to a name's attributes.
///
/// Serializes as the variant name, which is also what [`OperationKind::as_str`]
/// returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OperationKind {
    /// Write the value only if the key is absent.
    InsertOrIgnore,
    /// Always write the value.
    Upsert,
    /// Delete the key whatever its value.
    Remove,
}

impl OperationKind {
    /// Return the kind name as written to the operation log.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InsertOrIgnore => "InsertOrIgnore",
            Self::Upsert => "Upsert",
            Self::Remove => "Remove",
        }
    }

    /// Parse a kind name. Returns `None` for unknown values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "InsertOrIgnore" => Some(Self::InsertOrIgnore),
            "Upsert" => Some(Self::Upsert),
            "Remove" => Some(Self::Remove),
            _ => None,
        }
    }

    /// Like [`OperationKind::from_str`], failing with
    /// [`CoreError::UnknownOperation`].
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        Self::from_str(s).ok_or_else(|| CoreError::UnknownOperation(s.to_string()))
    }

    /// All valid kind names.
    pub const ALL: &'static [&'static str] = &["InsertOrIgnore", "Upsert", "Remove"];
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One write against a name's attribute store.
///
/// Field order is the column order of the operation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorrectiveOperation {
    pub name: String,
    #[serde(rename = "operation")]
    pub kind: OperationKind,
    pub key: String,
    /// Empty for [`OperationKind::Remove`].
    pub value: String,
}

impl CorrectiveOperation {
    pub fn insert_or_ignore(
        name: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            value: value.into(),
            kind: OperationKind::InsertOrIgnore,
        }
    }

    pub fn upsert(name: impl Into<String>, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            value: value.into(),
            kind: OperationKind::Upsert,
        }
    }

    pub fn remove(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            value: String::new(),
            kind: OperationKind::Remove,
        }
    }
}
