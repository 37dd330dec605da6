//! Invocation responses

use serde::{Deserialize, Serialize};

/// Outcome of one invocation, handed back to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Response {
    Success { payload: Vec<u8> },
    Failure { message: String },
}

impl Response {
    /// Create a successful response carrying `payload`
    pub fn success(payload: Vec<u8>) -> Self {
        Response::Success { payload }
    }

    /// Create a failed response
    pub fn failure(message: impl Into<String>) -> Self {
        Response::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success { .. })
    }

    /// Payload of a success, empty for a failure
    pub fn payload(&self) -> &[u8] {
        match self {
            Response::Success { payload } => payload,
            Response::Failure { .. } => &[],
        }
    }

    /// Message of a failure
    pub fn message(&self) -> Option<&str> {
        match self {
            Response::Success { .. } => None,
            Response::Failure { message } => Some(message),
        }
    }
}
