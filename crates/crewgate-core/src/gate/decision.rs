//! EntitlementGate — the single access decision.
//!
//! `decide` is a pure function over the current snapshot; it is re-evaluated
//! after every store change and is the only thing the rest of the application
//! consults to choose between locked and unlocked content. Seat absence
//! always overrides an otherwise-healthy status: capacity alone never grants
//! access, only an explicit seat does.

use chrono::{DateTime, Utc};

use crate::config::EntitlementConfig;
use crate::types::{CompanyRecord, SubscriptionStatus, User};

/// Remediation banner shown while a billing problem is in its grace window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraceBanner {
    /// Whole days left in the grace window, clamped to >= 0.
    pub days_remaining: i64,
}

/// Why access is locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockReason {
    NoSeatAssigned,
    SubscriptionInactive,
    TrialExpired,
    /// No snapshot has been fetched yet (cold start, offline first launch).
    NoCompanyRecord,
}

impl LockReason {
    /// Human-facing lock-out message.
    pub fn message(&self) -> &'static str {
        match self {
            Self::NoSeatAssigned => "You don't have a seat on your company's plan. Ask an admin to assign you one.",
            Self::SubscriptionInactive => "Your company's subscription is no longer active. A new subscription is required.",
            Self::TrialExpired => "Your company's trial has ended. Subscribe to keep using the app.",
            Self::NoCompanyRecord => "Your company's subscription could not be loaded yet.",
        }
    }
}

/// Outcome of the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allowed { grace_banner: Option<GraceBanner> },
    Locked { reason: LockReason },
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    pub fn lock_reason(&self) -> Option<LockReason> {
        match self {
            Self::Locked { reason } => Some(*reason),
            Self::Allowed { .. } => None,
        }
    }

    pub fn grace_banner(&self) -> Option<GraceBanner> {
        match self {
            Self::Allowed { grace_banner } => *grace_banner,
            Self::Locked { .. } => None,
        }
    }
}

/// Map the current snapshot and user to an access decision.
///
/// Evaluation order: terminal subscription states first, then seat
/// membership, then trial expiry, then the grace banner.
pub fn decide(
    snapshot: Option<&CompanyRecord>,
    user: &User,
    now: DateTime<Utc>,
    config: &EntitlementConfig,
) -> AccessDecision {
    let Some(record) = snapshot else {
        return AccessDecision::Locked {
            reason: LockReason::NoCompanyRecord,
        };
    };

    if record.subscription_status.is_terminal_negative() {
        return AccessDecision::Locked {
            reason: LockReason::SubscriptionInactive,
        };
    }

    if !record.is_seated(&user.id) {
        return AccessDecision::Locked {
            reason: LockReason::NoSeatAssigned,
        };
    }

    match record.subscription_status {
        SubscriptionStatus::Trial => {
            if trial_elapsed(record, now, config) {
                AccessDecision::Locked {
                    reason: LockReason::TrialExpired,
                }
            } else {
                AccessDecision::Allowed { grace_banner: None }
            }
        }
        SubscriptionStatus::Grace => AccessDecision::Allowed {
            grace_banner: Some(GraceBanner {
                days_remaining: grace_days_remaining(record, now, config),
            }),
        },
        SubscriptionStatus::Active => AccessDecision::Allowed { grace_banner: None },
        // Terminal states were handled above.
        SubscriptionStatus::Expired | SubscriptionStatus::Cancelled => AccessDecision::Locked {
            reason: LockReason::SubscriptionInactive,
        },
    }
}

fn trial_elapsed(record: &CompanyRecord, now: DateTime<Utc>, config: &EntitlementConfig) -> bool {
    match record.trial_started_at {
        Some(started) => (now - started).num_days() >= config.trial_period_days as i64,
        // Without an anchor the backend has not yet told us the trial clock;
        // treat it as still running.
        None => false,
    }
}

fn grace_days_remaining(
    record: &CompanyRecord,
    now: DateTime<Utc>,
    config: &EntitlementConfig,
) -> i64 {
    let window = config.grace_period_days as i64;
    match record.grace_started_at {
        Some(started) => (window - (now - started).num_days()).max(0),
        None => window,
    }
}
