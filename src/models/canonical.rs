//! Canonical report
//!
//! One typed view over both report shapes. Consumers read `None` as
//! "unknown" and never re-check the raw structure.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::report::{HealthProfile, RawReport, ServerRecommendations};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CanonicalReport {
    pub aqi_value: Option<f64>,
    pub aqi_status: Option<String>,
    /// Recommendation generation time, else reading time
    pub observed_at: Option<DateTime<Utc>>,
    pub profile: HealthProfile,
    pub recommendations: ServerRecommendations,
}

/// Reconcile a raw report into its canonical form.
///
/// The nested `aqiData` fields win over the legacy top-level `aqi`/`status`.
/// An empty nested status falls through to the legacy one; a zero AQI does
/// not, since zero is a real reading.
pub fn normalize(raw: &RawReport) -> CanonicalReport {
    let reading = raw.aqi_data.as_ref();

    let aqi_value = reading.and_then(|r| r.value).or(raw.aqi);

    let aqi_status = reading
        .and_then(|r| r.status.as_deref())
        .filter(|s| !s.is_empty())
        .or_else(|| raw.status.as_deref().filter(|s| !s.is_empty()))
        .map(str::to_string);

    let observed_at = raw
        .report
        .as_ref()
        .and_then(|r| r.timestamp)
        .or_else(|| reading.and_then(|r| r.timestamp));

    CanonicalReport {
        aqi_value,
        aqi_status,
        observed_at,
        profile: raw.health_data.clone().unwrap_or_default(),
        recommendations: raw.report.clone().unwrap_or_default(),
    }
}
