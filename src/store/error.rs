//! Report store errors

use thiserror::Error;

use crate::db::DbError;

/// Failures while obtaining a report. The display text is what the user sees.
#[derive(Debug, Error)]
pub enum ReportError {
    /// No usable session token; checked locally, nothing was sent
    #[error("Please log in to view health reports")]
    AuthMissing,

    /// Transport failure or an unreadable response; the reason is only logged
    #[error("Failed to fetch health report")]
    Fetch(String),

    /// The store answered with `success: false`
    #[error("{0}")]
    ServerRejected(String),

    #[error("Invalid report store URL: {0}")]
    InvalidUrl(String),

    #[error("Session store error: {0}")]
    Session(#[from] DbError),
}

impl ReportError {
    pub fn kind(&self) -> &'static str {
        match self {
            ReportError::AuthMissing => "auth_missing",
            ReportError::Fetch(_) => "fetch_failure",
            ReportError::ServerRejected(_) => "server_rejected",
            ReportError::InvalidUrl(_) => "invalid_url",
            ReportError::Session(_) => "session_error",
        }
    }
}

impl From<reqwest::Error> for ReportError {
    fn from(e: reqwest::Error) -> Self {
        ReportError::Fetch(e.to_string())
    }
}
