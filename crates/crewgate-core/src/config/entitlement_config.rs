//! Entitlement engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the entitlement engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EntitlementConfig {
    // Activation poller
    pub poll_interval_ms: u64,
    pub poll_max_attempts: u32,

    // Access windows
    pub grace_period_days: u32,
    pub trial_period_days: u32,
}

impl Default for EntitlementConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 3000, // fixed, not exponential
            poll_max_attempts: 10,  // ~30s upper bound
            grace_period_days: 7,
            trial_period_days: 14,
        }
    }
}

impl EntitlementConfig {
    /// Parse from a TOML document; absent keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
