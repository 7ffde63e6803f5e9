//! EntitlementGate decision tests.
//!
//! Covers the full decision table: active/trial with and without a seat,
//! grace banner computation with clamping, terminal statuses overriding seat
//! membership, trial expiry, and the cold-start (no snapshot) case.

use chrono::{Duration, Utc};
use crewgate_core::{
    decide, AccessDecision, CompanyRecord, EntitlementConfig, LockReason, SubscriptionPlan,
    SubscriptionStatus, User, UserRole,
};

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

fn field_crew(id: &str) -> User {
    User::new(id, UserRole::FieldCrew, false)
}

// ============================================================
// Active / seat membership
// ============================================================

#[test]
fn active_and_seated_is_allowed() {
    let rec = record(SubscriptionStatus::Active, &["u1", "u2"], 3);
    let decision = decide(Some(&rec), &field_crew("u1"), Utc::now(), &EntitlementConfig::default());
    assert!(decision.is_allowed());
    assert_eq!(decision.grace_banner(), None);
}

#[test]
fn active_without_seat_is_locked_even_with_capacity_free() {
    // maxSeats 3, two seated: capacity alone never grants access.
    let rec = record(SubscriptionStatus::Active, &["u1", "u2"], 3);
    let decision = decide(Some(&rec), &field_crew("u3"), Utc::now(), &EntitlementConfig::default());
    assert_eq!(decision.lock_reason(), Some(LockReason::NoSeatAssigned));
}

// ============================================================
// Grace period
// ============================================================

#[test]
fn grace_seated_is_allowed_with_banner() {
    let mut rec = record(SubscriptionStatus::Grace, &["u1"], 3);
    rec.grace_started_at = Some(Utc::now() - Duration::days(2));
    let decision = decide(Some(&rec), &field_crew("u1"), Utc::now(), &EntitlementConfig::default());
    assert!(decision.is_allowed());
    // 7-day window, started 2 days ago.
    assert_eq!(decision.grace_banner().unwrap().days_remaining, 5);
}

#[test]
fn grace_days_remaining_clamps_to_zero() {
    let mut rec = record(SubscriptionStatus::Grace, &["u1"], 3);
    rec.grace_started_at = Some(Utc::now() - Duration::days(30));
    let decision = decide(Some(&rec), &field_crew("u1"), Utc::now(), &EntitlementConfig::default());
    assert_eq!(decision.grace_banner().unwrap().days_remaining, 0);
}

#[test]
fn grace_without_seat_is_locked() {
    let mut rec = record(SubscriptionStatus::Grace, &["u1"], 3);
    rec.grace_started_at = Some(Utc::now());
    let decision = decide(Some(&rec), &field_crew("u2"), Utc::now(), &EntitlementConfig::default());
    assert_eq!(decision.lock_reason(), Some(LockReason::NoSeatAssigned));
}

// ============================================================
// Terminal statuses
// ============================================================

#[test]
fn cancelled_locks_regardless_of_seat_membership() {
    let rec = record(SubscriptionStatus::Cancelled, &["u1"], 3);
    let decision = decide(Some(&rec), &field_crew("u1"), Utc::now(), &EntitlementConfig::default());
    assert_eq!(decision.lock_reason(), Some(LockReason::SubscriptionInactive));
}

#[test]
fn expired_locks_regardless_of_seat_membership() {
    let rec = record(SubscriptionStatus::Expired, &["u1"], 3);
    let decision = decide(Some(&rec), &field_crew("u1"), Utc::now(), &EntitlementConfig::default());
    assert_eq!(decision.lock_reason(), Some(LockReason::SubscriptionInactive));
}

// ============================================================
// Trial
// ============================================================

#[test]
fn trial_within_window_is_allowed() {
    let mut rec = record(SubscriptionStatus::Trial, &["u1"], 3);
    rec.trial_started_at = Some(Utc::now() - Duration::days(3));
    let decision = decide(Some(&rec), &field_crew("u1"), Utc::now(), &EntitlementConfig::default());
    assert!(decision.is_allowed());
}

#[test]
fn trial_elapsed_is_locked() {
    let mut rec = record(SubscriptionStatus::Trial, &["u1"], 3);
    rec.trial_started_at = Some(Utc::now() - Duration::days(20));
    let decision = decide(Some(&rec), &field_crew("u1"), Utc::now(), &EntitlementConfig::default());
    assert_eq!(decision.lock_reason(), Some(LockReason::TrialExpired));
}

#[test]
fn trial_without_anchor_still_runs() {
    let rec = record(SubscriptionStatus::Trial, &["u1"], 3);
    let decision = decide(Some(&rec), &field_crew("u1"), Utc::now(), &EntitlementConfig::default());
    assert!(decision.is_allowed());
}

// ============================================================
// Cold start
// ============================================================

#[test]
fn missing_snapshot_fails_closed() {
    let decision = decide(None, &field_crew("u1"), Utc::now(), &EntitlementConfig::default());
    assert_eq!(decision.lock_reason(), Some(LockReason::NoCompanyRecord));
}

#[test]
fn lock_reasons_carry_messages() {
    for reason in [
        LockReason::NoSeatAssigned,
        LockReason::SubscriptionInactive,
        LockReason::TrialExpired,
        LockReason::NoCompanyRecord,
    ] {
        assert!(!reason.message().is_empty());
    }
    let locked = AccessDecision::Locked {
        reason: LockReason::NoSeatAssigned,
    };
    assert!(!locked.is_allowed());
}
