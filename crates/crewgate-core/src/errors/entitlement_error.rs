//! Local entitlement errors — recoverable, returned synchronously to the
//! caller before any network call is made.

use super::error_code::{codes, ErrorCode};

/// Errors raised by local seat mutations and store invariant checks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntitlementError {
    #[error("seat capacity exceeded: {seated} of {max_seats} seats already assigned")]
    CapacityExceeded { seated: usize, max_seats: u32 },

    #[error("cannot revoke own seat: {user_id} is the only seated admin")]
    SelfLockViolation { user_id: String },

    #[error("entitlement invariant violated: {detail}")]
    InvariantViolation { detail: String },

    #[error("no company snapshot available yet")]
    MissingSnapshot,
}

impl ErrorCode for EntitlementError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::CapacityExceeded { .. } => codes::SEAT_CAPACITY_EXCEEDED,
            Self::SelfLockViolation { .. } => codes::SEAT_SELF_LOCK,
            Self::InvariantViolation { .. } => codes::ENTITLEMENT_INVARIANT,
            Self::MissingSnapshot => codes::ENTITLEMENT_NO_SNAPSHOT,
        }
    }
}
