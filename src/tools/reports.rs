//! Health report tools
//!
//! Fetch a stored report, resolve it into a view, and export that view to PDF.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::Database;
use crate::export::{export_report, ExportError, ExportGuard, ExportResponse};
use crate::models::normalize;
use crate::store::{fetch_report, ReportError, ReportStore};
use crate::view::ReportView;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthReportResponse {
    pub success: bool,
    pub report: Option<ReportView>,
    pub error: Option<String>,
    pub error_kind: Option<&'static str>,
}

impl From<Result<ReportView, ReportError>> for HealthReportResponse {
    fn from(result: Result<ReportView, ReportError>) -> Self {
        match result {
            Ok(view) => Self {
                success: true,
                report: Some(view),
                error: None,
                error_kind: None,
            },
            Err(e) => Self {
                success: false,
                report: None,
                error: Some(e.to_string()),
                error_kind: Some(e.kind()),
            },
        }
    }
}

// ============================================================================
// Operations
// ============================================================================

/// Fetch, normalize and resolve one report
pub async fn load_report_view(
    store: &dyn ReportStore,
    db: &Database,
    id: &str,
    now: DateTime<Utc>,
) -> Result<ReportView, ReportError> {
    let raw = fetch_report(store, db, id, now).await?;
    let canonical = normalize(&raw);
    tracing::debug!(report_id = id, aqi = ?canonical.aqi_value, "Loaded health report");
    Ok(ReportView::build(id, &canonical, now))
}

pub async fn get_health_report(
    store: &dyn ReportStore,
    db: &Database,
    id: &str,
) -> HealthReportResponse {
    load_report_view(store, db, id, Utc::now()).await.into()
}

/// Export a report to `<dir>/health-report.pdf`.
///
/// Only one export runs at a time; an overlapping call is answered with a
/// failed response instead of waiting. Rendering happens on a blocking task
/// that owns the guard ticket, so the guard is released however it ends.
pub async fn export_health_report(
    store: &dyn ReportStore,
    db: &Database,
    guard: &Arc<ExportGuard>,
    id: &str,
    dir: &Path,
) -> ExportResponse {
    let Some(ticket) = guard.try_begin() else {
        tracing::debug!(report_id = id, "Export rejected, another export is running");
        return ExportResponse::failed(ExportError::InProgress.to_string());
    };

    let view = match load_report_view(store, db, id, Utc::now()).await {
        Ok(view) => view,
        Err(e) => {
            tracing::warn!(report_id = id, error = %e, "Cannot export health report");
            return ExportResponse::failed(e.to_string());
        }
    };

    let dir = dir.to_path_buf();
    let rendered = tokio::task::spawn_blocking(move || {
        let _ticket = ticket;
        std::fs::create_dir_all(&dir)?;
        export_report(&view, &dir)
    })
    .await
    .unwrap_or_else(|e| Err(ExportError::Task(e.to_string())));

    match rendered {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(report_id = id, error = %e, "Error generating PDF");
            ExportResponse::failed(format!("Error generating PDF: {}", e))
        }
    }
}
