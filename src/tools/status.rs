//! AQHR Status Tool
//!
//! Provides runtime status information about the AQHR service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::config::Config;

/// Report workflow instructions for AI assistants
pub const REPORT_INSTRUCTIONS: &str = r#"
# AQHR Health Report Instructions

This guide explains how to view and export air quality health reports with the
Air Quality Health Report (AQHR) tools.

## Overview

A health report combines:
1. **Air quality** - the AQI value and status label at the time of the report
2. **Health profile** - the user's name, age and reported symptoms
3. **Recommendations** - outdoor activity, mask and medicine guidance

Recommendations come from the report store when it supplied them. Missing ones
are derived locally from the AQI and the health profile.

---

## Step 1: Log In

Reports are private. The report store requires a bearer token.

**Tool:** `set_session_token`
- `token` - the token issued by the report store at login
- `expires_at` - optional RFC 3339 expiry (e.g. `"2026-01-13T18:00:00Z"`)

An expired token is treated as logged out; no request is sent. Use
`clear_session_token` to log out.

---

## Step 2: View a Report

**Tool:** `get_health_report`
- `report_id` - the report identifier from the report store

The result is either `{"success": true, "report": {...}}` or
`{"success": false, "error": "...", "error_kind": "..."}`.

| error_kind | Meaning | What to do |
|------------|---------|------------|
| `auth_missing` | No token, or the token expired | Ask the user to log in again |
| `server_rejected` | The store refused (e.g. unknown report) | Show the message as-is |
| `fetch_failure` | Network or response problem | Retry later |

Fields shown as `"N/A"` were absent from the stored report.

---

## Step 3: Export to PDF

**Tool:** `export_health_report_pdf`
- `report_id` - the same identifier

Writes `health-report.pdf` to the export directory and returns its path. Only
one export runs at a time; a second request while one is running returns
`success: false` with "An export is already in progress".

---

## Trying the Rules Directly

**Tool:** `derive_advisories`
- `aqi`, `age`, `symptoms`, and optional server values

Useful for "what if" questions ("what should I do at AQI 180 with asthma?").
Recognized symptoms: Asthma, Allergies, Cough, Shortness of breath,
Eye irritation, Headache, Throat irritation, Respiratory condition. Labels
must match exactly; anything else is ignored.

---

## Presenting Results

- Always include the medicine disclaimer when the report carries one.
- Recommendations are general guidance, not medical advice.
"#;

#[derive(Debug, Clone, Serialize)]
pub struct AqhrStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    /// Report store and export settings
    pub report_store_url: String,
    pub export_dir: String,
    pub request_timeout_seconds: u64,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
    report_store_url: String,
    export_dir: PathBuf,
    request_timeout_seconds: u64,
}

impl StatusTracker {
    pub fn new(config: &Config) -> Self {
        Self {
            start_time: Instant::now(),
            database_path: config.database_path.clone(),
            report_store_url: config.report_store_url.clone(),
            export_dir: config.export_dir.clone(),
            request_timeout_seconds: config.request_timeout.as_secs(),
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> AqhrStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        AqhrStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            report_store_url: self.report_store_url.clone(),
            export_dir: self.export_dir.display().to_string(),
            request_timeout_seconds: self.request_timeout_seconds,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
