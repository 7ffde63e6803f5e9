pub mod entitlement_config;

pub use entitlement_config::EntitlementConfig;
