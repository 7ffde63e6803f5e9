//! RemoteSync — the boundary to the authoritative billing backend.
//!
//! The engine depends on this trait but never implements the transport.
//! Both operations are idempotent at the backend: refreshing is a read, and
//! the seat update replaces the whole seated set, so resubmitting the same
//! set is safe.

use std::future::Future;

use crewgate_core::{CompanyRecord, SyncError};

pub trait RemoteSync: Send + Sync {
    /// Fetch the authoritative company record.
    fn refresh_company(
        &self,
        company_id: &str,
    ) -> impl Future<Output = Result<CompanyRecord, SyncError>> + Send;

    /// Replace the full seated set (not a delta — a delta risks lost updates
    /// under concurrent admin edits) and return the resulting record.
    fn update_seated_employees(
        &self,
        company_id: &str,
        seated_user_ids: &[String],
    ) -> impl Future<Output = Result<CompanyRecord, SyncError>> + Send;
}
