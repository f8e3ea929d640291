//! Principal identifiers as they appear in snapshot files.
//!
//! Owners and reverse-pointer targets are stored as principal text. The
//! text is validated when a row is loaded and kept verbatim afterwards:
//! rules compare identifiers by their text, and the principal attribute is
//! written back exactly as it was read.

use std::fmt;

use candid::Principal;

use crate::account_id;
use crate::error::CoreError;

/// Text of a platform canister id. Anything at most this long is treated
/// as a platform-internal identifier.
pub const RESERVED_IDENTIFIER_PROBE: &str = "fgzg4-siaaa-aaaam-aafpa-cai";

/// Maximum text length of a reserved (canister-style) identifier.
pub const RESERVED_IDENTIFIER_MAX_LEN: usize = RESERVED_IDENTIFIER_PROBE.len();

/// Returns `true` if the identifier text belongs to a platform-internal
/// principal (canister ids, the management canister, the anonymous
/// principal) rather than a user.
///
/// This is a shape test on already-validated text: canister ids render to
/// at most 27 characters while self-authenticating user principals render
/// to 63.
pub fn is_reserved_identifier(text: &str) -> bool {
    text.len() <= RESERVED_IDENTIFIER_MAX_LEN
}

/// A validated principal identifier.
///
/// Equality, ordering and hashing use the text as read.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier {
    text: String,
    principal: Principal,
}

impl Identifier {
    /// Parse principal text, rejecting anything that does not decode to a
    /// checksum-valid principal.
    pub fn parse(text: &str) -> Result<Self, CoreError> {
        let principal =
            Principal::from_text(text).map_err(|e| CoreError::MalformedIdentifier {
                value: text.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            text: text.to_string(),
            principal,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn is_reserved(&self) -> bool {
        is_reserved_identifier(&self.text)
    }

    /// Hex account identifier of this principal's default subaccount.
    pub fn account_id(&self) -> String {
        account_id::default_account_id_hex(&self.principal)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl std::str::FromStr for Identifier {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
