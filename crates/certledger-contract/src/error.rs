//! Contract error types

use certledger_store::StoreError;
use thiserror::Error;

/// Errors raised while dispatching or executing an operation
#[derive(Debug, Error)]
pub enum ContractError {
    /// The caller passed the wrong number of arguments
    #[error("incorrect number of arguments for '{operation}': expecting {expected}, got {actual}")]
    InvalidArgumentCount {
        operation: &'static str,
        expected: usize,
        actual: usize,
    },

    /// No operation is registered under this name
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),

    /// Propagated verbatim from the ledger
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A record could not be encoded
    #[error("failed to serialize record: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for contract operations
pub type ContractResult<T> = std::result::Result<T, ContractError>;
