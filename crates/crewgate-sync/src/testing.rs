//! Scripted RemoteSync double for tests.
//!
//! `refresh_company` serves a scripted queue of results (falling back to the
//! current base record when the queue is empty) and `update_seated_employees`
//! records every submitted seat set so tests can assert on the exact wire
//! payloads.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crewgate_core::{CompanyRecord, SyncError};

use crate::remote::RemoteSync;

pub struct ScriptedRemote {
    base: Mutex<CompanyRecord>,
    refresh_script: Mutex<VecDeque<Result<CompanyRecord, SyncError>>>,
    recorded_updates: Mutex<Vec<Vec<String>>>,
    update_error: Mutex<Option<SyncError>>,
    refresh_delay: Mutex<Option<Duration>>,
    refresh_calls: AtomicU32,
}

impl ScriptedRemote {
    pub fn new(base: CompanyRecord) -> Self {
        Self {
            base: Mutex::new(base),
            refresh_script: Mutex::new(VecDeque::new()),
            recorded_updates: Mutex::new(Vec::new()),
            update_error: Mutex::new(None),
            refresh_delay: Mutex::new(None),
            refresh_calls: AtomicU32::new(0),
        }
    }

    /// Queue the next `refresh_company` result.
    pub fn script_refresh(&self, result: Result<CompanyRecord, SyncError>) {
        self.refresh_script.lock().unwrap().push_back(result);
    }

    /// Queue `n` identical refresh results.
    pub fn script_refresh_repeated(&self, result: Result<CompanyRecord, SyncError>, n: usize) {
        let mut script = self.refresh_script.lock().unwrap();
        for _ in 0..n {
            script.push_back(result.clone());
        }
    }

    /// Make the next `refresh_company` call sleep before answering, so a
    /// test can hold a fetch in flight.
    pub fn delay_next_refresh(&self, delay: Duration) {
        *self.refresh_delay.lock().unwrap() = Some(delay);
    }

    /// Make the next seat update fail with the given error.
    pub fn fail_next_update(&self, err: SyncError) {
        *self.update_error.lock().unwrap() = Some(err);
    }

    /// Every seat set submitted so far, in call order.
    pub fn recorded_updates(&self) -> Vec<Vec<String>> {
        self.recorded_updates.lock().unwrap().clone()
    }

    pub fn refresh_calls(&self) -> u32 {
        self.refresh_calls.load(Ordering::SeqCst)
    }
}

impl RemoteSync for ScriptedRemote {
    async fn refresh_company(&self, _company_id: &str) -> Result<CompanyRecord, SyncError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        let delay = self.refresh_delay.lock().unwrap().take();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.refresh_script.lock().unwrap().pop_front();
        match next {
            Some(result) => {
                if let Ok(record) = &result {
                    *self.base.lock().unwrap() = record.clone();
                }
                result
            }
            None => Ok(self.base.lock().unwrap().clone()),
        }
    }

    async fn update_seated_employees(
        &self,
        _company_id: &str,
        seated_user_ids: &[String],
    ) -> Result<CompanyRecord, SyncError> {
        self.recorded_updates
            .lock()
            .unwrap()
            .push(seated_user_ids.to_vec());
        if let Some(err) = self.update_error.lock().unwrap().take() {
            return Err(err);
        }
        let mut base = self.base.lock().unwrap();
        base.seated_user_ids = seated_user_ids.iter().cloned().collect();
        Ok(base.clone())
    }
}
