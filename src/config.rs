//! Runtime configuration
//!
//! Read once from the environment at startup.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_REPORT_STORE_URL: &str = "http://localhost:5000/api/health";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite file holding the session token
    pub database_path: PathBuf,
    /// Base URL of the report store, without trailing slash
    pub report_store_url: String,
    /// Directory that receives exported PDFs
    pub export_dir: PathBuf,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let data_dir = default_data_dir();

        let database_path = std::env::var("AQHR_DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("aqhr.db"));

        let report_store_url = std::env::var("AQHR_REPORT_STORE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_REPORT_STORE_URL.to_string());

        let export_dir = std::env::var("AQHR_EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("exports"));

        let timeout_secs = match std::env::var("AQHR_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => parse_timeout(&raw).unwrap_or_else(|| {
                tracing::warn!(
                    value = %raw,
                    default = DEFAULT_REQUEST_TIMEOUT_SECS,
                    "Ignoring invalid AQHR_REQUEST_TIMEOUT_SECS"
                );
                DEFAULT_REQUEST_TIMEOUT_SECS
            }),
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Self {
            database_path,
            report_store_url: normalize_base_url(&report_store_url),
            export_dir,
            request_timeout: Duration::from_secs(timeout_secs),
        }
    }
}

/// `<project>/data`, resolving a binary under target/{debug,release} back to the project root
pub fn default_data_dir() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(grandparent) = path.parent().and_then(|p| p.parent()) {
            path = grandparent.to_path_buf();
        }
    }

    path.push("data");
    path
}

fn parse_timeout(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|secs| *secs > 0)
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
