//! Report store
//!
//! Fetches stored reports for the current session.

mod client;
mod error;

use chrono::{DateTime, Utc};

use crate::db::Database;
use crate::models::{RawReport, Session};

pub use client::{interpret_response, HttpReportStore, ReportStore};
pub use error::ReportError;

/// Fetch a report with the stored session token.
///
/// A missing or expired token fails with `AuthMissing` before any request is
/// made. Single attempt, no retry.
pub async fn fetch_report(
    store: &dyn ReportStore,
    db: &Database,
    id: &str,
    now: DateTime<Utc>,
) -> Result<RawReport, ReportError> {
    let token = db
        .with_conn(|conn| Session::active_token(conn, now))?
        .ok_or(ReportError::AuthMissing)?;

    match store.get_report(id, &token).await {
        Ok(report) => Ok(report),
        Err(ReportError::Fetch(reason)) => {
            tracing::warn!(report_id = id, %reason, "Error fetching health report");
            Err(ReportError::Fetch(reason))
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use async_trait::async_trait;
    use chrono::Duration;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Records calls and replays a canned outcome
    struct FakeStore {
        calls: AtomicUsize,
        seen_token: Mutex<Option<String>>,
        reject_with: Option<String>,
    }

    impl FakeStore {
        fn ok() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                seen_token: Mutex::new(None),
                reject_with: None,
            }
        }

        fn rejecting(message: &str) -> Self {
            Self {
                reject_with: Some(message.to_string()),
                ..Self::ok()
            }
        }
    }

    #[async_trait]
    impl ReportStore for FakeStore {
        async fn get_report(&self, _id: &str, token: &str) -> Result<RawReport, ReportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.seen_token.lock().unwrap() = Some(token.to_string());
            match &self.reject_with {
                Some(message) => Err(ReportError::ServerRejected(message.clone())),
                None => Ok(RawReport {
                    aqi: Some(42.0),
                    ..Default::default()
                }),
            }
        }
    }

    fn database() -> Database {
        let db = Database::in_memory().unwrap();
        db.with_conn(|conn| run_migrations(conn)).unwrap();
        db
    }

    #[tokio::test]
    async fn test_missing_token_short_circuits() {
        let db = database();
        let store = FakeStore::ok();

        let err = fetch_report(&store, &db, "r1", Utc::now()).await.unwrap_err();
        assert!(matches!(err, ReportError::AuthMissing));
        assert_eq!(err.to_string(), "Please log in to view health reports");
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_expired_token_short_circuits() {
        let db = database();
        let now = Utc::now();
        db.with_conn(|conn| Session::set(conn, "tok", Some(now - Duration::seconds(1))))
            .unwrap();
        let store = FakeStore::ok();

        let err = fetch_report(&store, &db, "r1", now).await.unwrap_err();
        assert!(matches!(err, ReportError::AuthMissing));
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fetch_passes_token() {
        let db = database();
        db.with_conn(|conn| Session::set(conn, "secret-token", None)).unwrap();
        let store = FakeStore::ok();

        let report = fetch_report(&store, &db, "r1", Utc::now()).await.unwrap();
        assert_eq!(report.aqi, Some(42.0));
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.seen_token.lock().unwrap().as_deref(), Some("secret-token"));
    }

    #[tokio::test]
    async fn test_rejection_passes_through() {
        let db = database();
        db.with_conn(|conn| Session::set(conn, "tok", None)).unwrap();
        let store = FakeStore::rejecting("Report not found");

        let err = fetch_report(&store, &db, "missing", Utc::now()).await.unwrap_err();
        assert_eq!(err.to_string(), "Report not found");
    }
}
