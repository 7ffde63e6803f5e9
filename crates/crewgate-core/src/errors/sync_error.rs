//! Errors crossing the remote billing boundary.
//!
//! `Network` is transient and retried by the poller within its own session.
//! `BackendRejected` is an authoritative negative and must not be retried.
//! `Timeout` is ambiguous — confirmation was not obtained, but the mutation
//! is not assumed to have failed.

use super::error_code::{codes, ErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    #[error("network error: {message}")]
    Network { message: String },

    #[error("backend rejected the request: {reason}")]
    BackendRejected { reason: String },

    #[error("confirmation not obtained after {attempts} attempt(s)")]
    Timeout { attempts: u32 },
}

impl SyncError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Whether another attempt within the same session is worthwhile.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}

impl ErrorCode for SyncError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Network { .. } => codes::SYNC_NETWORK,
            Self::BackendRejected { .. } => codes::SYNC_BACKEND_REJECTED,
            Self::Timeout { .. } => codes::SYNC_TIMEOUT,
        }
    }
}
