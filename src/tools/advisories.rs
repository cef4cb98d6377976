//! Advisory derivation tool
//!
//! Runs the advisory engine on caller-supplied inputs, without a stored report.

use serde::Serialize;

use crate::advisory::{format_aqi, AdvisoryBundle, AqiCategory, Symptom};
use crate::models::{ActivityGuidelines, CanonicalReport, HealthProfile, ServerRecommendations};

/// Inputs for one derivation; server values take precedence when non-empty
#[derive(Debug, Clone, Default)]
pub struct AdvisoryInput {
    pub aqi: Option<f64>,
    pub age: Option<f64>,
    pub symptoms: Vec<String>,
    pub server_outdoor: Option<String>,
    pub server_mask: Option<String>,
    pub server_medicine: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeriveAdvisoriesResponse {
    pub aqi: String,
    pub aqi_category: Option<AqiCategory>,
    /// Symptoms the rules recognize; anything else was ignored
    pub recognized_symptoms: Vec<&'static str>,
    pub ignored_symptoms: Vec<String>,
    pub advisories: AdvisoryBundle,
}

impl AdvisoryInput {
    fn into_report(self) -> CanonicalReport {
        let recommendations = ServerRecommendations {
            activity_guidelines: self.server_outdoor.map(|outdoor| ActivityGuidelines {
                outdoor: Some(outdoor),
            }),
            protective_measures: self.server_mask.into_iter().collect(),
            medicine_recommendations: self.server_medicine.into_iter().collect(),
            ..Default::default()
        };

        CanonicalReport {
            aqi_value: self.aqi,
            profile: HealthProfile {
                name: None,
                age: self.age,
                symptoms: self.symptoms,
            },
            recommendations,
            ..Default::default()
        }
    }
}

pub fn derive_advisories(input: AdvisoryInput) -> DeriveAdvisoriesResponse {
    let report = input.into_report();

    let mut recognized_symptoms = Vec::new();
    let mut ignored_symptoms = Vec::new();
    for label in &report.profile.symptoms {
        match Symptom::from_label(label) {
            Some(symptom) => recognized_symptoms.push(symptom.label()),
            None => ignored_symptoms.push(label.clone()),
        }
    }

    DeriveAdvisoriesResponse {
        aqi: format_aqi(report.aqi_value),
        aqi_category: report.aqi_value.map(AqiCategory::classify),
        recognized_symptoms,
        ignored_symptoms,
        advisories: AdvisoryBundle::derive(&report),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::{AdviceSource, MASK_RESPIRATORY, MASK_STRONGLY_RECOMMENDED};

    #[test]
    fn test_derive_from_inputs() {
        let response = derive_advisories(AdvisoryInput {
            aqi: Some(180.0),
            age: Some(70.0),
            symptoms: vec!["Asthma".to_string(), "Sneezing".to_string()],
            ..Default::default()
        });

        assert_eq!(response.aqi, "180");
        assert_eq!(response.aqi_category, Some(AqiCategory::Unhealthy));
        assert_eq!(response.recognized_symptoms, vec!["Asthma"]);
        assert_eq!(response.ignored_symptoms, vec!["Sneezing".to_string()]);
        assert_eq!(response.advisories.mask.general, MASK_STRONGLY_RECOMMENDED);
        assert_eq!(response.advisories.mask.personalized, MASK_RESPIRATORY);
    }

    #[test]
    fn test_server_values_win() {
        let response = derive_advisories(AdvisoryInput {
            aqi: Some(20.0),
            server_outdoor: Some("Stay in".to_string()),
            server_medicine: Some(String::new()),
            ..Default::default()
        });

        assert_eq!(response.advisories.activity, "Stay in");
        assert_eq!(response.advisories.activity_source, AdviceSource::Server);
        assert_eq!(response.advisories.medicine_source, AdviceSource::Derived);
    }

    #[test]
    fn test_unknown_aqi() {
        let response = derive_advisories(AdvisoryInput::default());
        assert_eq!(response.aqi, "unknown");
        assert!(response.aqi_category.is_none());
        assert!(!response.advisories.activity.is_empty());
    }
}
