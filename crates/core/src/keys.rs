//! Resolver attribute keys the reconciliation rules care about.

use crate::identifier::Identifier;

/// Key holding a name's reverse-resolution pointer.
pub const REVERSE_RESOLUTION_KEY: &str = "settings.reverse_resolution.principal";

/// Key binding a name to its owner's ledger account identifier.
pub const ACCOUNT_ID_KEY: &str = "account_id.icp";

/// Key binding a name to its owner's principal.
pub const PRINCIPAL_KEY: &str = "principal.icp";

/// An attribute every user-owned name must carry, with a value derived
/// from the owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultKey {
    AccountId,
    Principal,
}

impl DefaultKey {
    /// Required keys, in the order their operations are emitted.
    pub const REQUIRED: [DefaultKey; 2] = [DefaultKey::AccountId, DefaultKey::Principal];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccountId => ACCOUNT_ID_KEY,
            Self::Principal => PRINCIPAL_KEY,
        }
    }

    /// Value this key should hold for a name owned by `owner`.
    pub fn default_value(&self, owner: &Identifier) -> String {
        match self {
            Self::AccountId => owner.account_id(),
            Self::Principal => owner.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for DefaultKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
