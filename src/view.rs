//! Report view
//!
//! Everything the report screen shows, resolved to display strings. Built
//! from the canonical report and its advisory bundle; consumed by the
//! `get_health_report` tool and by the PDF exporter.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::advisory::{format_aqi, format_number, AdviceSource, AdvisoryBundle, AqiCategory, MEDICINE_DISCLAIMER};
use crate::models::CanonicalReport;

pub const NOT_AVAILABLE: &str = "N/A";

pub const TIME_OF_DAY_ADVICE: &str = "Air quality is typically better in the early morning and late evening. If you must go outside, try to do so during these less polluted times.";

pub const REPORT_DISCLAIMER: &str = "This report is generated based on current air quality data and your provided health information. It is intended as general guidance and not as medical advice. Please consult with a healthcare professional for personalized medical recommendations.";

#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    pub report_id: String,

    pub aqi_value: Option<f64>,
    pub aqi_display: String,
    pub aqi_status: String,
    pub aqi_category: Option<AqiCategory>,
    /// Report time, or the time of viewing when the report carries none
    pub observed_at: DateTime<Utc>,

    pub name: String,
    pub age: String,

    pub general_recommendation: Option<String>,
    pub age_specific_recommendation: Option<String>,
    pub health_specific_recommendation: Option<String>,
    pub time_of_day_advice: &'static str,

    pub advisories: AdvisoryBundle,
    /// Present only when the medicine text was rule-derived
    pub medicine_disclaimer: Option<&'static str>,
    pub disclaimer: &'static str,
}

impl ReportView {
    pub fn build(report_id: &str, report: &CanonicalReport, now: DateTime<Utc>) -> Self {
        let advisories = AdvisoryBundle::derive(report);
        let rec = &report.recommendations;

        let medicine_disclaimer = match advisories.medicine_source {
            AdviceSource::Derived => Some(MEDICINE_DISCLAIMER),
            AdviceSource::Server => None,
        };

        Self {
            report_id: report_id.to_string(),
            aqi_value: report.aqi_value,
            aqi_display: report
                .aqi_value
                .map(|v| format_aqi(Some(v)))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            aqi_status: report
                .aqi_status
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            aqi_category: report.aqi_value.map(AqiCategory::classify),
            observed_at: report.observed_at.unwrap_or(now),
            name: report
                .profile
                .name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            age: report
                .profile
                .age
                .map(|age| format!("{} years", format_number(age)))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            general_recommendation: rec.general().map(str::to_string),
            age_specific_recommendation: rec.age_specific().map(str::to_string),
            health_specific_recommendation: rec.health_specific().map(str::to_string),
            time_of_day_advice: TIME_OF_DAY_ADVICE,
            advisories,
            medicine_disclaimer,
            disclaimer: REPORT_DISCLAIMER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{normalize, RawReport};
    use chrono::TimeZone;
    use serde_json::json;

    fn view(value: serde_json::Value) -> ReportView {
        let raw: RawReport = serde_json::from_value(value).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        ReportView::build("r-1", &normalize(&raw), now)
    }

    #[test]
    fn test_empty_report_view() {
        let v = view(json!({}));
        assert_eq!(v.aqi_display, NOT_AVAILABLE);
        assert_eq!(v.aqi_status, NOT_AVAILABLE);
        assert_eq!(v.aqi_category, None);
        assert_eq!(v.name, NOT_AVAILABLE);
        assert_eq!(v.age, NOT_AVAILABLE);
        assert_eq!(v.observed_at, Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
        assert_eq!(v.medicine_disclaimer, Some(MEDICINE_DISCLAIMER));
        assert!(v.general_recommendation.is_none());
    }

    #[test]
    fn test_populated_view() {
        let v = view(json!({
            "healthData": { "name": "Ada", "age": 34, "symptoms": ["Headache"] },
            "aqiData": { "value": 120, "status": "Unhealthy for Sensitive Groups" },
            "report": {
                "generalRecommendations": ["Limit outdoor exercise", "second"],
                "medicineRecommendations": ["Server medicine"]
            }
        }));
        assert_eq!(v.aqi_display, "120");
        assert_eq!(v.aqi_category, Some(AqiCategory::UnhealthyForSensitiveGroups));
        assert_eq!(v.name, "Ada");
        assert_eq!(v.age, "34 years");
        assert_eq!(v.general_recommendation.as_deref(), Some("Limit outdoor exercise"));
        assert_eq!(v.advisories.medicine, "Server medicine");
        assert_eq!(v.medicine_disclaimer, None);
    }

    #[test]
    fn test_fractional_age() {
        let v = view(json!({ "healthData": { "age": 65.5 } }));
        assert_eq!(v.age, "65.5 years");
        assert_eq!(v.advisories.mask.personalized, crate::advisory::MASK_SENIOR);
    }
}
