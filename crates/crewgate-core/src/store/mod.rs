pub mod entitlement_store;

pub use entitlement_store::{EntitlementStore, Provenance, StoreEvent};
