//! Document export
//!
//! Renders a report view to `health-report.pdf`, one export at a time.

mod chart;
mod guard;
mod pdf;

use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;
use thiserror::Error;

use crate::view::ReportView;

pub use chart::{category_spans, render_aqi_scale, SCALE_MAX};
pub use guard::{ExportGuard, ExportTicket};
pub use pdf::{render_pdf, wrap_text, PAGE_WIDTH_MM};

pub const EXPORT_FILE_NAME: &str = "health-report.pdf";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("An export is already in progress")]
    InProgress,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Export task failed: {0}")]
    Task(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportResponse {
    pub success: bool,
    pub file_path: Option<String>,
    pub page_width_mm: Option<f32>,
    pub page_height_mm: Option<f32>,
    pub message: String,
}

impl ExportResponse {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            file_path: None,
            page_width_mm: None,
            page_height_mm: None,
            message: message.into(),
        }
    }
}

/// Write the view to `<dir>/health-report.pdf`
pub fn export_report(view: &ReportView, dir: &Path) -> Result<ExportResponse, ExportError> {
    let path: PathBuf = dir.join(EXPORT_FILE_NAME);
    let page_height = render_pdf(view, &path, Local::now())?;

    tracing::info!(
        report_id = %view.report_id,
        path = %path.display(),
        page_height_mm = page_height,
        "Exported health report"
    );

    Ok(ExportResponse {
        success: true,
        file_path: Some(path.display().to_string()),
        page_width_mm: Some(PAGE_WIDTH_MM),
        page_height_mm: Some(page_height),
        message: format!("Health report {} exported", view.report_id),
    })
}
