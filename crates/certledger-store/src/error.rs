//! Ledger error types

use thiserror::Error;

/// Errors surfaced by a ledger backend.
///
/// Messages are carried verbatim so callers can hand them straight back to
/// whoever issued the operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The backend failed to read or write
    #[error("ledger backend error: {0}")]
    Backend(String),

    /// A shared lock was poisoned by a panicking writer
    #[error("ledger lock poisoned: {0}")]
    LockPoisoned(String),

    /// A cursor failed while advancing
    #[error("range scan failed: {0}")]
    Scan(String),

    /// The backend could not be opened from its configuration
    #[error("failed to open ledger: {0}")]
    Open(String),
}

/// Result type alias for ledger operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

impl From<redb::DatabaseError> for StoreError {
    fn from(err: redb::DatabaseError) -> Self {
        StoreError::Open(err.to_string())
    }
}

impl From<redb::TransactionError> for StoreError {
    fn from(err: redb::TransactionError) -> Self {
        StoreError::Backend(err.to_string())
    }
}

impl From<redb::TableError> for StoreError {
    fn from(err: redb::TableError) -> Self {
        StoreError::Backend(err.to_string())
    }
}

impl From<redb::StorageError> for StoreError {
    fn from(err: redb::StorageError) -> Self {
        StoreError::Backend(err.to_string())
    }
}

impl From<redb::CommitError> for StoreError {
    fn from(err: redb::CommitError) -> Self {
        StoreError::Backend(err.to_string())
    }
}
