use crate::types::AccountId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage error: account [{0}] does not exist")]
    AccountNotFound(AccountId),
    #[error("Storage error: email [{0}] is already registered")]
    DuplicateEmail(String),
    #[error("Storage error: account [{account_id}] changed since it was read (expected version {expected}, found {found})")]
    VersionConflict {
        account_id: AccountId,
        expected: u64,
        found: u64
    },
    #[error("Storage error: account [{0}] staged more than once in one batch")]
    DuplicateWrite(AccountId),
    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Storage error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Storage error: {0}")]
    Unavailable(String)
}
