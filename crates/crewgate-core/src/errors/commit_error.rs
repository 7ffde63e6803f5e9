//! Composite error for a seat commit, which can fail locally (invariant
//! check before any network call) or at the remote boundary.

use super::entitlement_error::EntitlementError;
use super::error_code::ErrorCode;
use super::sync_error::SyncError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeatCommitError {
    #[error(transparent)]
    Entitlement(#[from] EntitlementError),

    #[error(transparent)]
    Sync(#[from] SyncError),
}

impl ErrorCode for SeatCommitError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Entitlement(e) => e.error_code(),
            Self::Sync(e) => e.error_code(),
        }
    }
}
