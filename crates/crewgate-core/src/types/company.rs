//! The company subscription record — the unit of state this engine reconciles.
//!
//! The authoritative copy lives in the remote billing backend; the engine only
//! ever holds the last fetched snapshot, possibly overlaid with an optimistic
//! local seat edit that is provisional until the next refresh confirms it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::EntitlementError;
use crate::types::collections::FxHashSet;
use crate::types::user::User;

/// Lifecycle state of the company subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Trial,
    Active,
    Grace,
    Expired,
    Cancelled,
}

impl SubscriptionStatus {
    pub const ALL: [SubscriptionStatus; 5] = [
        Self::Trial,
        Self::Active,
        Self::Grace,
        Self::Expired,
        Self::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trial => "trial",
            Self::Active => "active",
            Self::Grace => "grace",
            Self::Expired => "expired",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "trial" => Some(Self::Trial),
            "active" => Some(Self::Active),
            "grace" => Some(Self::Grace),
            "expired" => Some(Self::Expired),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Terminal negative states. A backend reporting one of these is an
    /// authoritative "no", not a transient condition worth re-polling.
    pub fn is_terminal_negative(&self) -> bool {
        matches!(self, Self::Expired | Self::Cancelled)
    }
}

/// Purchased plan. Seat capacity comes from `max_seats` on the record, not
/// from the plan — the backend resolves plan + add-ons into a single number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    Starter,
    Team,
    Business,
}

impl SubscriptionPlan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Starter => "starter",
            Self::Team => "team",
            Self::Business => "business",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "starter" => Some(Self::Starter),
            "team" => Some(Self::Team),
            "business" => Some(Self::Business),
            _ => None,
        }
    }
}

/// Snapshot of a company's subscription and seat assignments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecord {
    pub company_id: String,
    pub subscription_status: SubscriptionStatus,
    pub subscription_plan: SubscriptionPlan,
    pub max_seats: u32,
    pub seated_user_ids: FxHashSet<String>,
    /// Set exactly when `subscription_status == Grace`; cleared on exit.
    #[serde(default)]
    pub grace_started_at: Option<DateTime<Utc>>,
    /// When the trial began; consulted only while `subscription_status == Trial`.
    #[serde(default)]
    pub trial_started_at: Option<DateTime<Utc>>,
}

impl CompanyRecord {
    /// Check the record invariants:
    /// seat count within capacity, grace timestamp present iff in grace.
    pub fn validate(&self) -> Result<(), EntitlementError> {
        if self.seated_user_ids.len() > self.max_seats as usize {
            return Err(EntitlementError::InvariantViolation {
                detail: format!(
                    "company {}: {} seats assigned but max_seats is {}",
                    self.company_id,
                    self.seated_user_ids.len(),
                    self.max_seats
                ),
            });
        }
        match (self.subscription_status, self.grace_started_at) {
            (SubscriptionStatus::Grace, None) => Err(EntitlementError::InvariantViolation {
                detail: format!("company {}: in grace without grace_started_at", self.company_id),
            }),
            (status, Some(_)) if status != SubscriptionStatus::Grace => {
                Err(EntitlementError::InvariantViolation {
                    detail: format!(
                        "company {}: grace_started_at set while status is {}",
                        self.company_id,
                        status.as_str()
                    ),
                })
            }
            _ => Ok(()),
        }
    }

    pub fn is_seated(&self, user_id: &str) -> bool {
        self.seated_user_ids.contains(user_id)
    }

    pub fn seats_remaining(&self) -> u32 {
        (self.max_seats as usize).saturating_sub(self.seated_user_ids.len()) as u32
    }

    /// Ids of seated users that are company admins, given the user roster.
    pub fn seated_admins<'a>(&self, roster: &'a [User]) -> Vec<&'a str> {
        roster
            .iter()
            .filter(|u| u.is_company_admin && self.is_seated(&u.id))
            .map(|u| u.id.as_str())
            .collect()
    }

    /// The seated set as a sorted vector — the canonical wire form for the
    /// full-set replacement submitted to the backend.
    pub fn seated_sorted(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.seated_user_ids.iter().cloned().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::user::UserRole;

    fn record(status: SubscriptionStatus, seated: &[&str], max_seats: u32) -> CompanyRecord {
        CompanyRecord {
            company_id: "co_1".to_string(),
            subscription_status: status,
            subscription_plan: SubscriptionPlan::Team,
            max_seats,
            seated_user_ids: seated.iter().map(|s| s.to_string()).collect(),
            grace_started_at: None,
            trial_started_at: None,
        }
    }

    #[test]
    fn status_str_roundtrip() {
        for status in &SubscriptionStatus::ALL {
            assert_eq!(SubscriptionStatus::parse(status.as_str()), Some(*status));
        }
        assert_eq!(SubscriptionStatus::parse("nonsense"), None);
    }

    #[test]
    fn validate_rejects_overfull_seat_set() {
        let rec = record(SubscriptionStatus::Active, &["a", "b", "c"], 2);
        assert!(rec.validate().is_err());
    }

    #[test]
    fn validate_requires_grace_timestamp_iff_grace() {
        let mut rec = record(SubscriptionStatus::Grace, &["a"], 3);
        assert!(rec.validate().is_err());
        rec.grace_started_at = Some(Utc::now());
        assert!(rec.validate().is_ok());
        rec.subscription_status = SubscriptionStatus::Active;
        assert!(rec.validate().is_err());
    }

    #[test]
    fn seated_sorted_is_deterministic() {
        let rec = record(SubscriptionStatus::Active, &["c", "a", "b"], 5);
        assert_eq!(rec.seated_sorted(), vec!["a", "b", "c"]);
        assert_eq!(rec.seats_remaining(), 2);
    }

    #[test]
    fn seated_admins_intersects_roster_with_the_seat_set() {
        let rec = record(SubscriptionStatus::Active, &["a", "b"], 5);
        let roster = vec![
            User::admin("a"),
            User::admin("c"),
            User {
                id: "b".to_string(),
                role: UserRole::FieldCrew,
                is_company_admin: false,
            },
        ];
        assert_eq!(rec.seated_admins(&roster), vec!["a"]);
    }

    #[test]
    fn record_serializes_with_wire_field_names() {
        let rec = record(SubscriptionStatus::Active, &["a"], 3);
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["subscriptionStatus"], "active");
        assert_eq!(json["subscriptionPlan"], "team");
        assert_eq!(json["maxSeats"], 3);
    }
}
