//! Ledger account identifiers derived from principals.
//!
//! An account identifier is `crc32(h) ‖ h` where
//! `h = sha224(0x0A ‖ "account-id" ‖ principal ‖ subaccount)`, rendered as
//! lower-case hex. Names only ever bind the default (all-zero) subaccount.

use candid::Principal;
use sha2::{Digest, Sha224};

/// Domain separator prefixed to every account-id hash.
const ACCOUNT_DOMAIN_SEPARATOR: &[u8] = b"\x0Aaccount-id";

/// The default subaccount: 32 zero bytes.
pub const DEFAULT_SUBACCOUNT: [u8; 32] = [0; 32];

/// Length of a rendered account identifier (4 checksum + 28 hash bytes).
pub const ACCOUNT_ID_HEX_LEN: usize = 64;

/// Compute the hex account identifier of `principal` for `subaccount`.
pub fn account_id_hex(principal: &Principal, subaccount: &[u8; 32]) -> String {
    let mut hasher = Sha224::new();
    hasher.update(ACCOUNT_DOMAIN_SEPARATOR);
    hasher.update(principal.as_slice());
    hasher.update(subaccount);
    let hash = hasher.finalize();

    let checksum = crc32fast::hash(&hash);
    format!("{checksum:08x}{hash:x}")
}

/// Hex account identifier for the default subaccount.
pub fn default_account_id_hex(principal: &Principal) -> String {
    account_id_hex(principal, &DEFAULT_SUBACCOUNT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{USER_1, USER_2};

    fn principal(text: &str) -> Principal {
        Principal::from_text(text).unwrap()
    }

    #[test]
    fn anonymous_principal_has_known_account_id() {
        assert_eq!(
            default_account_id_hex(&Principal::anonymous()),
            "1c7a48ba6a562aa9eaa2481a9049cdf0433b9738c992d698c31d8abf89cadc79"
        );
    }

    #[test]
    fn user_principals_have_known_account_ids() {
        assert_eq!(
            default_account_id_hex(&principal(USER_1)),
            "722488363080fac9465ab57bdeee0d5d7284afcdbb166873b8955a3c1464ce64"
        );
        assert_eq!(
            default_account_id_hex(&principal(USER_2)),
            "30cf8ddcc982567036de278e480b250c557b18d8aebcb2529a9b66424c336e3a"
        );
    }

    #[test]
    fn renders_64_lowercase_hex_chars() {
        let id = default_account_id_hex(&principal(USER_1));
        assert_eq!(id.len(), ACCOUNT_ID_HEX_LEN);
        assert!(id
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn checksum_prefix_covers_hash() {
        let id = default_account_id_hex(&principal(USER_1));
        let (checksum, hash) = id.split_at(8);
        let hash_bytes: Vec<u8> = (0..hash.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&hash[i..i + 2], 16).unwrap())
            .collect();
        assert_eq!(hash_bytes.len(), 28);
        assert_eq!(checksum, format!("{:08x}", crc32fast::hash(&hash_bytes)));
    }

    #[test]
    fn deterministic_per_principal() {
        let a = default_account_id_hex(&principal(USER_1));
        assert_eq!(a, default_account_id_hex(&principal(USER_1)));
        assert_ne!(a, default_account_id_hex(&principal(USER_2)));
    }

    #[test]
    fn subaccount_changes_identifier() {
        let mut subaccount = DEFAULT_SUBACCOUNT;
        subaccount[31] = 1;
        assert_ne!(
            account_id_hex(&principal(USER_1), &subaccount),
            default_account_id_hex(&principal(USER_1))
        );
    }
}
