//! EntitlementStore — the last-known company subscription snapshot.
//!
//! Single mutable shared resource of the engine. Remote refreshes overwrite
//! unconditionally (remote is authoritative); local seat edits overlay the
//! snapshot as unconfirmed until the next refresh or an explicit rollback.
//! Every write emits one change event to all subscribers — that channel is
//! the store's only way of talking to the rest of the system.

use std::sync::{Mutex, RwLock};

use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::debug;

use crate::errors::EntitlementError;
use crate::types::collections::FxHashSet;
use crate::types::CompanyRecord;

/// Whether the current snapshot has been confirmed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Snapshot came from a remote refresh.
    Confirmed,
    /// Snapshot carries a local seat edit not yet confirmed remotely.
    Optimistic,
}

/// Change notification emitted after every store write.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreEvent {
    pub record: CompanyRecord,
    pub provenance: Provenance,
}

struct StoreState {
    current: Option<CompanyRecord>,
    /// Last remotely confirmed snapshot — the rollback target.
    confirmed: Option<CompanyRecord>,
    provenance: Provenance,
}

/// Snapshot holder with serialized writes and non-blocking reads.
pub struct EntitlementStore {
    state: RwLock<StoreState>,
    subscribers: Mutex<Vec<Sender<StoreEvent>>>,
}

impl EntitlementStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState {
                current: None,
                confirmed: None,
                provenance: Provenance::Confirmed,
            }),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Current snapshot, if any. Never blocks on a writer for longer than the
    /// in-progress write itself.
    pub fn snapshot(&self) -> Option<CompanyRecord> {
        self.state.read().unwrap().current.clone()
    }

    /// Whether the current snapshot is remotely confirmed.
    pub fn is_confirmed(&self) -> bool {
        self.state.read().unwrap().provenance == Provenance::Confirmed
    }

    /// Overwrite with an authoritative remote record. Also becomes the new
    /// rollback target for subsequent optimistic edits.
    pub fn apply_remote(&self, record: CompanyRecord) -> Result<(), EntitlementError> {
        record.validate()?;
        {
            let mut state = self.state.write().unwrap();
            state.current = Some(record.clone());
            state.confirmed = Some(record.clone());
            state.provenance = Provenance::Confirmed;
        }
        debug!(
            company_id = %record.company_id,
            status = record.subscription_status.as_str(),
            seated = record.seated_user_ids.len(),
            "applied remote snapshot"
        );
        self.notify(StoreEvent {
            record,
            provenance: Provenance::Confirmed,
        });
        Ok(())
    }

    /// Overlay a locally mutated seated set on the current snapshot, marked
    /// unconfirmed. Fails if there is no snapshot to mutate or the candidate
    /// breaks a record invariant; the store is unchanged on failure.
    pub fn apply_optimistic(
        &self,
        seated_user_ids: FxHashSet<String>,
    ) -> Result<CompanyRecord, EntitlementError> {
        let candidate = {
            let state = self.state.read().unwrap();
            let mut record = state
                .current
                .clone()
                .ok_or(EntitlementError::MissingSnapshot)?;
            record.seated_user_ids = seated_user_ids;
            record
        };
        candidate.validate()?;
        {
            let mut state = self.state.write().unwrap();
            state.current = Some(candidate.clone());
            state.provenance = Provenance::Optimistic;
        }
        debug!(
            company_id = %candidate.company_id,
            seated = candidate.seated_user_ids.len(),
            "applied optimistic seat edit"
        );
        self.notify(StoreEvent {
            record: candidate.clone(),
            provenance: Provenance::Optimistic,
        });
        Ok(candidate)
    }

    /// Discard any optimistic overlay and restore the last confirmed
    /// snapshot. Returns the restored record, if one exists.
    pub fn rollback(&self) -> Option<CompanyRecord> {
        let restored = {
            let mut state = self.state.write().unwrap();
            if state.provenance == Provenance::Confirmed {
                return state.current.clone();
            }
            state.current = state.confirmed.clone();
            state.provenance = Provenance::Confirmed;
            state.current.clone()
        };
        if let Some(record) = &restored {
            debug!(company_id = %record.company_id, "rolled back to confirmed snapshot");
            self.notify(StoreEvent {
                record: record.clone(),
                provenance: Provenance::Confirmed,
            });
        }
        restored
    }

    /// Subscribe to change notifications. Each write delivers exactly one
    /// event to every live subscriber; dropped receivers are pruned lazily.
    pub fn subscribe(&self) -> Receiver<StoreEvent> {
        let (tx, rx) = unbounded();
        self.subscribers
            .lock()
            .unwrap()
            .push(tx);
        rx
    }

    fn notify(&self, event: StoreEvent) {
        let mut subs = self.subscribers.lock().unwrap();
        subs.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

impl Default for EntitlementStore {
    fn default() -> Self {
        Self::new()
    }
}
