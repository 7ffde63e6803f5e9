//! Shared data model for the entitlement engine.
//!
//! - **company** — the cached company subscription record and its enums
//! - **user** — the read-only user identity consulted by the gate
//! - **mutation** — the ephemeral seat mutation intent
//! - **collections** — FxHashMap/FxHashSet re-exports

pub mod collections;
pub mod company;
pub mod mutation;
pub mod user;

pub use company::{CompanyRecord, SubscriptionPlan, SubscriptionStatus};
pub use mutation::{SeatAction, SeatMutation};
pub use user::{User, UserRole};
