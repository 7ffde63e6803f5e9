mod commit_error;
mod entitlement_error;
mod error_code;
mod sync_error;

pub use commit_error::SeatCommitError;
pub use entitlement_error::EntitlementError;
pub use error_code::{codes, ErrorCode};
pub use sync_error::SyncError;
