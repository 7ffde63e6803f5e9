//! # crewgate-core
//!
//! Foundation crate for the Crewgate entitlement engine.
//! Defines the company/seat data model, the error taxonomy, configuration,
//! the EntitlementStore (last-known subscription snapshot, single-writer),
//! and the EntitlementGate (pure access decision).
//!
//! Everything here is synchronous; the confirmation loop against the remote
//! billing backend lives in `crewgate-sync`.

pub mod config;
pub mod errors;
pub mod gate;
pub mod store;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::EntitlementConfig;
pub use errors::{EntitlementError, ErrorCode, SeatCommitError, SyncError};
pub use gate::{decide, AccessDecision, GraceBanner, LockReason};
pub use store::{EntitlementStore, Provenance, StoreEvent};
pub use types::collections::{FxHashMap, FxHashSet};
pub use types::{
    CompanyRecord, SeatAction, SeatMutation, SubscriptionPlan, SubscriptionStatus, User, UserRole,
};
