/// Errors raised while building relations or planning corrective operations.
///
/// Every variant is fatal for a run: the input snapshot has to be fixed
/// upstream before the generator is re-run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Malformed identifier {value:?}: {reason}")]
    MalformedIdentifier { value: String, reason: String },

    #[error("No ownership record for name {name:?} while deriving default attributes")]
    MissingOwner { name: String },

    #[error("Unknown operation kind: {0:?}")]
    UnknownOperation(String),
}
