//! Shared fixtures for unit tests.

use crate::identifier::Identifier;
use crate::relation::{OwnershipRecord, ReversePointerRecord};

pub const USER_1: &str = "h4a5i-5vcfo-5rusv-fmb6m-vrkia-mjnkc-jpoow-h5mam-nthnm-ldqlr-bqe";
pub const USER_2: &str = "bngem-gzprz-dtr6o-xnali-fgmfi-fjgpb-rya7j-x2idk-3eh6u-4v7tx-hqe";
pub const USER_3: &str = "347of-sq6dc-h53df-dtzkw-eama6-hfaxk-a7ghn-oumsd-jf2qy-tqvqc-wqe";
pub const CANISTER_1: &str = "rrkah-fqaaa-aaaaa-aaaaq-cai";

pub fn owned(name: &str, owner: &str) -> OwnershipRecord {
    OwnershipRecord {
        name: name.to_string(),
        owner: Identifier::parse(owner).unwrap(),
    }
}

pub fn pointer(name: &str, target: &str) -> ReversePointerRecord {
    ReversePointerRecord {
        name: name.to_string(),
        target: Identifier::parse(target).unwrap(),
    }
}
