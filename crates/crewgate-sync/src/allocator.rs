//! SeatAllocator — optimistic seat mutations under the capacity and
//! self-lock invariants, committed to the backend as a full-set replacement.
//!
//! Grant/revoke are local and synchronous; they fail fast without touching
//! the network. `commit` submits the pending optimistic set; `commit_set` is
//! the bulk-save path used when an admin edits the whole roster at once and
//! carries the acting-admin safety net. On submission failure the store is
//! rolled back to the last confirmed snapshot and the caller receives the
//! underlying error.

use std::sync::{Arc, RwLock};

use tracing::{debug, info, warn};

use crewgate_core::{
    CompanyRecord, EntitlementError, EntitlementStore, FxHashSet, SeatAction, SeatCommitError,
    SeatMutation, User,
};

use crate::remote::RemoteSync;

pub struct SeatAllocator<R: RemoteSync> {
    store: Arc<EntitlementStore>,
    remote: Arc<R>,
    acting_user: User,
    /// Read-only user directory, used to find other seated admins.
    roster: RwLock<Vec<User>>,
}

impl<R: RemoteSync> SeatAllocator<R> {
    pub fn new(
        store: Arc<EntitlementStore>,
        remote: Arc<R>,
        acting_user: User,
        roster: Vec<User>,
    ) -> Self {
        Self {
            store,
            remote,
            acting_user,
            roster: RwLock::new(roster),
        }
    }

    /// Replace the user directory (it loads independently of the snapshot).
    pub fn set_roster(&self, roster: Vec<User>) {
        *self.roster.write().unwrap() = roster;
    }

    /// Assign a seat. Fails with `CapacityExceeded` when the company is at
    /// capacity; granting to an already-seated user is a no-op.
    pub fn grant_seat(&self, target_user_id: &str) -> Result<SeatMutation, EntitlementError> {
        let record = self
            .store
            .snapshot()
            .ok_or(EntitlementError::MissingSnapshot)?;

        if !record.is_seated(target_user_id) {
            if record.seated_user_ids.len() >= record.max_seats as usize {
                return Err(EntitlementError::CapacityExceeded {
                    seated: record.seated_user_ids.len(),
                    max_seats: record.max_seats,
                });
            }
            let mut seated = record.seated_user_ids.clone();
            seated.insert(target_user_id.to_string());
            self.store.apply_optimistic(seated)?;
        }

        debug!(target = target_user_id, "seat granted (optimistic)");
        Ok(SeatMutation::new(target_user_id, SeatAction::Grant))
    }

    /// Remove a seat. Fails with `SelfLockViolation` when the acting user
    /// would revoke their own seat while being the only seated admin —
    /// revoking a *different* admin is always permitted.
    pub fn revoke_seat(&self, target_user_id: &str) -> Result<SeatMutation, EntitlementError> {
        let record = self
            .store
            .snapshot()
            .ok_or(EntitlementError::MissingSnapshot)?;

        if target_user_id == self.acting_user.id
            && self.acting_user.is_company_admin
            && record.is_seated(&self.acting_user.id)
            && !self.another_admin_seated(&record)
        {
            return Err(EntitlementError::SelfLockViolation {
                user_id: target_user_id.to_string(),
            });
        }

        if record.is_seated(target_user_id) {
            let mut seated = record.seated_user_ids.clone();
            seated.remove(target_user_id);
            self.store.apply_optimistic(seated)?;
        }

        debug!(target = target_user_id, "seat revoked (optimistic)");
        Ok(SeatMutation::new(target_user_id, SeatAction::Revoke))
    }

    /// Submit the currently pending seated set to the backend.
    pub async fn commit(&self) -> Result<CompanyRecord, SeatCommitError> {
        let record = self
            .store
            .snapshot()
            .ok_or(EntitlementError::MissingSnapshot)?;
        self.submit(record.seated_user_ids.clone()).await
    }

    /// Bulk save of a complete seated set, as produced by a roster-editing
    /// screen. The acting admin is always included: a save that would drop
    /// the person performing it is treated as accidental. Explicit
    /// self-revocation goes through `revoke_seat` + `commit` instead.
    pub async fn commit_set(
        &self,
        seated_user_ids: impl IntoIterator<Item = String>,
    ) -> Result<CompanyRecord, SeatCommitError> {
        let mut seated: FxHashSet<String> = seated_user_ids.into_iter().collect();
        if self.acting_user.is_company_admin && seated.insert(self.acting_user.id.clone()) {
            debug!(
                acting = %self.acting_user.id,
                "acting admin re-added to submitted seat set"
            );
        }
        self.submit(seated).await
    }

    async fn submit(&self, seated: FxHashSet<String>) -> Result<CompanyRecord, SeatCommitError> {
        let candidate = self.store.apply_optimistic(seated)?;
        let payload = candidate.seated_sorted();

        match self
            .remote
            .update_seated_employees(&candidate.company_id, &payload)
            .await
        {
            Ok(confirmed) => {
                self.store.apply_remote(confirmed.clone())?;
                info!(
                    company_id = %confirmed.company_id,
                    seated = confirmed.seated_user_ids.len(),
                    "seat set committed"
                );
                Ok(confirmed)
            }
            Err(e) => {
                self.store.rollback();
                warn!(
                    company_id = %candidate.company_id,
                    error = %e,
                    "seat commit failed, optimistic state rolled back"
                );
                Err(e.into())
            }
        }
    }

    fn another_admin_seated(&self, record: &CompanyRecord) -> bool {
        let roster = self.roster.read().unwrap();
        record
            .seated_admins(&roster)
            .iter()
            .any(|id| *id != self.acting_user.id)
    }
}
