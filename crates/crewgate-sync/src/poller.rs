//! ActivationPoller — bounded confirmation loop after a payment or seat
//! mutation event.
//!
//! The backend settles eventually, not synchronously with the client's
//! action, so the engine re-fetches the company record at a fixed interval
//! until a caller-supplied terminal predicate is observed or attempts run
//! out. A failed fetch still counts as an attempt. The loop runs as a
//! detached tokio task keyed by company, independent of any UI lifetime;
//! starting a new session cancels the prior one (last-writer-wins), and
//! cancellation interrupts the inter-attempt wait immediately while merely
//! discarding the result of a fetch that was already dispatched.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crewgate_core::{CompanyRecord, EntitlementConfig, EntitlementStore, SyncError};

use crate::remote::RemoteSync;

/// What the terminal predicate concluded from a fetched record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredicateOutcome {
    /// The expected condition has been observed — confirmation obtained.
    Satisfied,
    /// Not there yet; keep polling.
    Pending,
    /// Authoritative negative (e.g. backend reports cancelled). Stop now;
    /// further polling cannot change the answer.
    Rejected { reason: String },
}

/// Caller-supplied condition defining "confirmed" for one session.
pub type TerminalPredicate = Box<dyn Fn(&CompanyRecord) -> PredicateOutcome + Send + Sync>;

/// Stock predicates for the two common session kinds.
pub mod predicates {
    use crewgate_core::{CompanyRecord, SubscriptionStatus};

    use super::{PredicateOutcome, TerminalPredicate};

    /// After a payment completes: subscription reaches active or trial.
    pub fn subscription_active() -> TerminalPredicate {
        Box::new(|record: &CompanyRecord| {
            let status = record.subscription_status;
            if status.is_terminal_negative() {
                PredicateOutcome::Rejected {
                    reason: format!("subscription is {}", status.as_str()),
                }
            } else if matches!(status, SubscriptionStatus::Active | SubscriptionStatus::Trial) {
                PredicateOutcome::Satisfied
            } else {
                PredicateOutcome::Pending
            }
        })
    }

    /// After a seat self-assignment: the user shows up in the seated set.
    pub fn user_seated(user_id: impl Into<String>) -> TerminalPredicate {
        let user_id = user_id.into();
        Box::new(move |record: &CompanyRecord| {
            if record.subscription_status.is_terminal_negative() {
                PredicateOutcome::Rejected {
                    reason: format!("subscription is {}", record.subscription_status.as_str()),
                }
            } else if record.is_seated(&user_id) {
                PredicateOutcome::Satisfied
            } else {
                PredicateOutcome::Pending
            }
        })
    }
}

/// Session progress, published on a watch channel for progress display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollStatus {
    Idle,
    Polling { attempt: u32 },
    Succeeded,
    /// Attempts exhausted without a definitive result. Not a failure — the
    /// mutation may still land; the caller should offer a manual re-check.
    TimedOut,
    /// Terminal negative from the backend; retrying is pointless.
    Rejected { reason: String },
    /// Every attempt failed at the transport level.
    Failed { message: String },
}

/// Per-session parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollParams {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollParams {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(3000),
            max_attempts: 10,
        }
    }
}

impl From<&EntitlementConfig> for PollParams {
    fn from(config: &EntitlementConfig) -> Self {
        Self {
            interval: config.poll_interval(),
            max_attempts: config.poll_max_attempts,
        }
    }
}

/// One poller per signed-in company context. Owns at most one live session.
pub struct ActivationPoller<R: RemoteSync> {
    company_id: String,
    store: Arc<EntitlementStore>,
    remote: Arc<R>,
    params: PollParams,
    status_tx: watch::Sender<PollStatus>,
    // Held so the watch channel stays open with no external subscribers.
    _status_rx: watch::Receiver<PollStatus>,
    session: Mutex<Option<watch::Sender<bool>>>,
    /// Bumped on every start/cancel. A session may only publish status while
    /// its own generation is still the current one, so a superseded session
    /// that wakes from an in-flight fetch or a wait cannot overwrite the
    /// live session's status.
    generation: Arc<AtomicU64>,
}

impl<R: RemoteSync + 'static> ActivationPoller<R> {
    pub fn new(
        company_id: impl Into<String>,
        store: Arc<EntitlementStore>,
        remote: Arc<R>,
        params: PollParams,
    ) -> Self {
        let (status_tx, status_rx) = watch::channel(PollStatus::Idle);
        Self {
            company_id: company_id.into(),
            store,
            remote,
            params,
            status_tx,
            _status_rx: status_rx,
            session: Mutex::new(None),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Subscribe to session status without starting anything.
    pub fn status(&self) -> watch::Receiver<PollStatus> {
        self.status_tx.subscribe()
    }

    /// Start a confirmation session with the poller's default parameters,
    /// cancelling any prior one.
    ///
    /// If the cached snapshot already satisfies the predicate (a fully
    /// discounted purchase marks the subscription active with no payment
    /// round-trip), the session completes as `Succeeded` without a single
    /// fetch.
    pub fn start(&self, predicate: TerminalPredicate) -> watch::Receiver<PollStatus> {
        self.start_with_params(predicate, self.params)
    }

    /// Start a confirmation session with per-session parameters.
    pub fn start_with_params(
        &self,
        predicate: TerminalPredicate,
        params: PollParams,
    ) -> watch::Receiver<PollStatus> {
        self.take_session();
        let session = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(snapshot) = self.store.snapshot() {
            if predicate(&snapshot) == PredicateOutcome::Satisfied {
                info!(
                    company_id = %self.company_id,
                    "terminal condition already satisfied, skipping confirmation loop"
                );
                let _ = self.status_tx.send(PollStatus::Succeeded);
                return self.status_tx.subscribe();
            }
        }

        let (cancel_tx, cancel_rx) = watch::channel(false);
        tokio::spawn(run_session(
            self.company_id.clone(),
            Arc::clone(&self.store),
            Arc::clone(&self.remote),
            params,
            predicate,
            SessionPublisher {
                status_tx: self.status_tx.clone(),
                generation: Arc::clone(&self.generation),
                session,
            },
            cancel_rx,
        ));
        *self.session.lock().unwrap() = Some(cancel_tx);
        self.status_tx.subscribe()
    }

    /// Cancel the active session, if any. Observable within one interval.
    pub fn cancel(&self) {
        if self.take_session() {
            debug!(company_id = %self.company_id, "polling session cancelled");
        }
        self.generation.fetch_add(1, Ordering::SeqCst);
        let _ = self.status_tx.send(PollStatus::Idle);
    }

    fn take_session(&self) -> bool {
        match self.session.lock().unwrap().take() {
            Some(cancel_tx) => {
                let _ = cancel_tx.send(true);
                true
            }
            None => false,
        }
    }
}

impl<R: RemoteSync> Drop for ActivationPoller<R> {
    fn drop(&mut self) {
        if let Some(cancel_tx) = self.session.lock().unwrap().take() {
            self.generation.fetch_add(1, Ordering::SeqCst);
            let _ = cancel_tx.send(true);
        }
    }
}

/// Status sender bound to one session generation. Publishing goes through
/// `send_if_modified` with the generation check inside the closure, so a
/// stale session racing the live one can never land a write: the watch
/// channel serializes senders, and the generation is re-read under that
/// serialization.
struct SessionPublisher {
    status_tx: watch::Sender<PollStatus>,
    generation: Arc<AtomicU64>,
    session: u64,
}

impl SessionPublisher {
    fn publish(&self, status: PollStatus) {
        self.status_tx.send_if_modified(|current| {
            if self.generation.load(Ordering::SeqCst) == self.session {
                *current = status;
                true
            } else {
                false
            }
        });
    }
}

async fn run_session<R: RemoteSync>(
    company_id: String,
    store: Arc<EntitlementStore>,
    remote: Arc<R>,
    params: PollParams,
    predicate: TerminalPredicate,
    publisher: SessionPublisher,
    mut cancel_rx: watch::Receiver<bool>,
) {
    let mut saw_snapshot = false;
    let mut last_error: Option<SyncError> = None;

    for attempt in 0..params.max_attempts {
        if *cancel_rx.borrow() {
            publisher.publish(PollStatus::Idle);
            return;
        }
        publisher.publish(PollStatus::Polling { attempt });

        match remote.refresh_company(&company_id).await {
            Ok(record) => {
                if *cancel_rx.borrow() {
                    // The fetch was already in flight when the session was
                    // cancelled; its result is discarded.
                    debug!(company_id = %company_id, "discarding refresh result after cancel");
                    publisher.publish(PollStatus::Idle);
                    return;
                }
                match store.apply_remote(record.clone()) {
                    Ok(()) => {
                        saw_snapshot = true;
                        match predicate(&record) {
                            PredicateOutcome::Satisfied => {
                                info!(company_id = %company_id, attempt, "confirmation observed");
                                publisher.publish(PollStatus::Succeeded);
                                return;
                            }
                            PredicateOutcome::Rejected { reason } => {
                                warn!(
                                    company_id = %company_id,
                                    attempt,
                                    reason = %reason,
                                    "backend reported a terminal negative"
                                );
                                publisher.publish(PollStatus::Rejected { reason });
                                return;
                            }
                            PredicateOutcome::Pending => {}
                        }
                    }
                    Err(e) => {
                        warn!(company_id = %company_id, error = %e, "refresh returned an invalid record");
                        last_error = Some(SyncError::BackendRejected {
                            reason: e.to_string(),
                        });
                    }
                }
            }
            Err(e) => {
                // Network errors do not get bonus retries.
                debug!(company_id = %company_id, attempt, error = %e, "refresh failed, attempt still counts");
                last_error = Some(e);
            }
        }

        if attempt + 1 < params.max_attempts {
            tokio::select! {
                _ = tokio::time::sleep(params.interval) => {}
                changed = cancel_rx.changed() => {
                    if changed.is_err() || *cancel_rx.borrow() {
                        debug!(company_id = %company_id, "polling session cancelled during wait");
                        publisher.publish(PollStatus::Idle);
                        return;
                    }
                }
            }
        }
    }

    if saw_snapshot || last_error.is_none() {
        info!(
            company_id = %company_id,
            attempts = params.max_attempts,
            "confirmation window exhausted, backend still processing"
        );
        publisher.publish(PollStatus::TimedOut);
    } else {
        let message = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "unknown error".to_string());
        warn!(company_id = %company_id, message = %message, "polling session failed");
        publisher.publish(PollStatus::Failed { message });
    }
}
