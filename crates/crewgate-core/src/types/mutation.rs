//! Seat mutation intents.
//!
//! An intent exists only for the duration of an allocation attempt — it is
//! returned to the caller for submission bookkeeping and never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a seat mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatAction {
    Grant,
    Revoke,
}

/// An ephemeral record of one requested seat change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatMutation {
    pub target_user_id: String,
    pub action: SeatAction,
    pub requested_at: DateTime<Utc>,
}

impl SeatMutation {
    pub fn new(target_user_id: impl Into<String>, action: SeatAction) -> Self {
        Self {
            target_user_id: target_user_id.into(),
            action,
            requested_at: Utc::now(),
        }
    }
}
