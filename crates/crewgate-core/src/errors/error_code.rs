//! Stable error codes for every engine error.
//!
//! Codes are part of the external surface (logs, UI routing) and must not
//! change once shipped.

/// Stable string codes.
pub mod codes {
    pub const SEAT_CAPACITY_EXCEEDED: &str = "SEAT_CAPACITY_EXCEEDED";
    pub const SEAT_SELF_LOCK: &str = "SEAT_SELF_LOCK";
    pub const ENTITLEMENT_INVARIANT: &str = "ENTITLEMENT_INVARIANT";
    pub const ENTITLEMENT_NO_SNAPSHOT: &str = "ENTITLEMENT_NO_SNAPSHOT";
    pub const SYNC_NETWORK: &str = "SYNC_NETWORK";
    pub const SYNC_BACKEND_REJECTED: &str = "SYNC_BACKEND_REJECTED";
    pub const SYNC_TIMEOUT: &str = "SYNC_TIMEOUT";
}

/// Every engine error maps to exactly one stable code.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}
