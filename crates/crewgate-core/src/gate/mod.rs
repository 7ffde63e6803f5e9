pub mod decision;

pub use decision::{decide, AccessDecision, GraceBanner, LockReason};
