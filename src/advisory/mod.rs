//! Advisory engine
//!
//! Pure rules turning an AQI value and a health profile into recommendation
//! text. Every function prefers a non-empty server value and otherwise falls
//! back to the rule tables; none of them can fail.

mod activity;
mod aqi;
mod mask;
mod medicine;
mod symptoms;

use serde::Serialize;

use crate::models::CanonicalReport;

pub use activity::{
    derive_activity, ACTIVITY_ALLOWED, ACTIVITY_LIMIT_PROLONGED, ACTIVITY_STAY_INDOORS,
};
pub use aqi::{AqiCategory, COLOR_UNKNOWN};
pub use mask::{
    derive_mask, MaskAdvice, MASK_CHILD, MASK_EXTENDED_OUTDOORS, MASK_FOLLOW_GENERAL,
    MASK_RESPIRATORY, MASK_SENIOR, MASK_STRONGLY_RECOMMENDED, MASK_SURGICAL_OPTIONAL,
    MASK_UNNECESSARY,
};
pub use medicine::{
    derive_medicine, MEDICINE_DISCLAIMER, MEDICINE_GUIDANCE, MEDICINE_RESCUE_CLAUSE,
    MEDICINE_UNRECOGNIZED,
};
pub use symptoms::Symptom;

/// Where an advisory string came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdviceSource {
    Server,
    Derived,
}

impl AdviceSource {
    fn of(server: Option<&str>) -> Self {
        if server_value(server).is_some() {
            AdviceSource::Server
        } else {
            AdviceSource::Derived
        }
    }
}

/// Activity, mask and medicine advice for one report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdvisoryBundle {
    pub activity: String,
    pub activity_source: AdviceSource,
    pub mask: MaskAdvice,
    pub mask_source: AdviceSource,
    pub medicine: String,
    pub medicine_source: AdviceSource,
}

impl AdvisoryBundle {
    pub fn derive(report: &CanonicalReport) -> Self {
        let rec = &report.recommendations;
        let aqi = report.aqi_value;

        Self {
            activity: derive_activity(aqi, rec.outdoor()),
            activity_source: AdviceSource::of(rec.outdoor()),
            mask: derive_mask(aqi, rec.mask(), &report.profile),
            mask_source: AdviceSource::of(rec.mask()),
            medicine: derive_medicine(aqi, rec.medicine(), &report.profile),
            medicine_source: AdviceSource::of(rec.medicine()),
        }
    }
}

/// A server string counts only when non-empty
fn server_value(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// First tier whose floor the AQI exceeds; `fallback` when none does or the AQI is unknown
fn tiered(aqi: Option<f64>, tiers: &[(f64, &'static str)], fallback: &'static str) -> &'static str {
    aqi.and_then(|value| {
        tiers
            .iter()
            .find(|(floor, _)| value > *floor)
            .map(|(_, text)| *text)
    })
    .unwrap_or(fallback)
}

/// AQI for display, `unknown` when absent
pub fn format_aqi(aqi: Option<f64>) -> String {
    aqi.map(format_number).unwrap_or_else(|| "unknown".to_string())
}

/// Whole numbers without a decimal point
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{normalize, HealthProfile, RawReport};
    use serde_json::json;

    fn canonical(value: serde_json::Value) -> CanonicalReport {
        let raw: RawReport = serde_json::from_value(value).unwrap();
        normalize(&raw)
    }

    #[test]
    fn test_format_aqi() {
        assert_eq!(format_aqi(Some(40.0)), "40");
        assert_eq!(format_aqi(Some(40.5)), "40.5");
        assert_eq!(format_aqi(None), "unknown");
    }

    #[test]
    fn test_unknown_aqi_yields_text_everywhere() {
        let profile = HealthProfile::default();
        assert!(!derive_activity(None, None).is_empty());
        let mask = derive_mask(None, None, &profile);
        assert!(!mask.general.is_empty());
        assert!(!mask.personalized.is_empty());
        assert!(!derive_medicine(None, None, &profile).is_empty());
    }

    #[test]
    fn test_bundle_from_empty_report() {
        let bundle = AdvisoryBundle::derive(&canonical(json!({})));
        assert_eq!(bundle.activity, ACTIVITY_ALLOWED);
        assert_eq!(bundle.mask.general, MASK_UNNECESSARY);
        assert_eq!(bundle.mask.personalized, MASK_FOLLOW_GENERAL);
        assert!(bundle.medicine.contains("(AQI: unknown)"));
        assert_eq!(bundle.medicine_source, AdviceSource::Derived);
    }

    #[test]
    fn test_bundle_is_idempotent() {
        let report = canonical(json!({
            "healthData": { "age": 70, "symptoms": ["Cough", "Asthma"] },
            "aqiData": { "value": 180 }
        }));
        assert_eq!(AdvisoryBundle::derive(&report), AdvisoryBundle::derive(&report));
    }

    #[test]
    fn test_bundle_prefers_server_values() {
        let bundle = AdvisoryBundle::derive(&canonical(json!({
            "aqiData": { "value": 180 },
            "report": {
                "activityGuidelines": { "outdoor": "Server activity" },
                "protectiveMeasures": ["Server mask", "ignored"],
                "medicineRecommendations": [""]
            }
        })));
        assert_eq!(bundle.activity, "Server activity");
        assert_eq!(bundle.activity_source, AdviceSource::Server);
        assert_eq!(bundle.mask.general, "Server mask");
        assert_eq!(bundle.mask_source, AdviceSource::Server);
        // An empty first entry does not count as a server value
        assert_eq!(bundle.medicine_source, AdviceSource::Derived);
        assert!(bundle.medicine.ends_with(MEDICINE_RESCUE_CLAUSE));
    }

    #[test]
    fn test_misshapen_sections_fall_back_to_rules() {
        let bundle = AdvisoryBundle::derive(&canonical(json!({
            "aqiData": { "value": 180 },
            "report": { "activityGuidelines": "Stay in" }
        })));
        assert_eq!(bundle.activity, ACTIVITY_STAY_INDOORS);
        assert_eq!(bundle.activity_source, AdviceSource::Derived);

        let bundle = AdvisoryBundle::derive(&canonical(json!({ "aqiData": "n/a", "aqi": 120 })));
        assert_eq!(bundle.activity, ACTIVITY_LIMIT_PROLONGED);
        assert_eq!(bundle.mask.general, MASK_EXTENDED_OUTDOORS);

        let bundle = AdvisoryBundle::derive(&canonical(json!({ "healthData": "none", "aqi": 40 })));
        assert_eq!(bundle.mask.personalized, MASK_FOLLOW_GENERAL);
        assert!(bundle.medicine.contains("(AQI: 40)"));
    }

    #[test]
    fn test_unhealthy_senior_asthmatic_scenario() {
        let bundle = AdvisoryBundle::derive(&canonical(json!({
            "healthData": { "age": 70, "symptoms": ["Asthma"] },
            "aqiData": { "value": 180 }
        })));
        assert_eq!(bundle.mask.general, MASK_STRONGLY_RECOMMENDED);
        assert_eq!(bundle.mask.personalized, MASK_RESPIRATORY);
        assert_eq!(bundle.activity, ACTIVITY_STAY_INDOORS);
    }

    #[test]
    fn test_clean_air_no_symptoms_scenario() {
        let bundle = AdvisoryBundle::derive(&canonical(json!({
            "healthData": { "symptoms": [] },
            "aqiData": { "value": 40 }
        })));
        assert_eq!(
            bundle.medicine,
            "Based on the current air quality (AQI: 40), no specific medications are recommended at this time. \
             Stay hydrated and monitor for any developing symptoms."
        );
    }
}
