//! Medicine guidance
//!
//! Symptom sentences are emitted in the order of `MEDICINE_GUIDANCE`, not the
//! order symptoms appear in the profile.

use super::{format_aqi, server_value, Symptom};
use crate::models::HealthProfile;

pub const MEDICINE_ASTHMA: &str = "For asthma symptoms, ensure you have your prescribed rescue inhaler readily available. Consider using your controller medications as directed by your healthcare provider, especially before going outdoors in current air quality conditions.";
pub const MEDICINE_ALLERGIES: &str = "For allergy symptoms, non-drowsy antihistamines like Cetirizine or Loratadine may help reduce symptoms. Nasal saline rinses can help clear irritants from nasal passages.";
pub const MEDICINE_COUGH: &str = "For cough symptoms, consider honey-based cough suppressants (if over 1 year old) or over-the-counter expectorants like Guaifenesin to help loosen congestion.";
pub const MEDICINE_SHORTNESS_OF_BREATH: &str = "Shortness of breath can be serious. If you have a prescribed inhaler, use as directed. If symptoms persist or worsen, seek immediate medical attention.";
pub const MEDICINE_EYE_IRRITATION: &str = "For eye irritation, preservative-free lubricating eye drops can help flush irritants and provide relief.";
pub const MEDICINE_HEADACHE: &str = "For headaches, over-the-counter pain relievers like Acetaminophen or Ibuprofen may provide relief. Stay hydrated and consider rest in a dark, quiet room.";
pub const MEDICINE_THROAT_IRRITATION: &str = "For throat irritation, throat lozenges, warm saltwater gargles, or soothing herbal teas with honey may provide relief.";

/// Used when the profile lists symptoms but none of them has a sentence.
pub const MEDICINE_UNRECOGNIZED: &str = "Based on your reported symptoms, staying hydrated and monitoring your condition is recommended. If symptoms persist or worsen, consult with a healthcare provider.";

pub const MEDICINE_RESCUE_CLAUSE: &str = " If you have pre-existing respiratory conditions, keep rescue medications readily available.";

/// Shown alongside rule-derived medicine text
pub const MEDICINE_DISCLAIMER: &str = "Important: These medicine recommendations are provided as general guidance only and not as medical advice. Always consult with a healthcare professional before starting any medication, especially if you have pre-existing conditions, are pregnant, or are taking other medications.";

const RESCUE_CLAUSE_ABOVE: f64 = 100.0;

pub const MEDICINE_GUIDANCE: [(Symptom, &str); 7] = [
    (Symptom::Asthma, MEDICINE_ASTHMA),
    (Symptom::Allergies, MEDICINE_ALLERGIES),
    (Symptom::Cough, MEDICINE_COUGH),
    (Symptom::ShortnessOfBreath, MEDICINE_SHORTNESS_OF_BREATH),
    (Symptom::EyeIrritation, MEDICINE_EYE_IRRITATION),
    (Symptom::Headache, MEDICINE_HEADACHE),
    (Symptom::ThroatIrritation, MEDICINE_THROAT_IRRITATION),
];

pub fn derive_medicine(aqi: Option<f64>, server_medicine: Option<&str>, profile: &HealthProfile) -> String {
    if let Some(server) = server_value(server_medicine) {
        return server.to_string();
    }

    if profile.symptoms.is_empty() {
        return no_symptom_guidance(aqi);
    }

    let sentences: Vec<&str> = MEDICINE_GUIDANCE
        .iter()
        .filter(|(symptom, _)| profile.has_symptom(*symptom))
        .map(|(_, sentence)| *sentence)
        .collect();

    if sentences.is_empty() {
        MEDICINE_UNRECOGNIZED.to_string()
    } else {
        sentences.join(" ")
    }
}

fn no_symptom_guidance(aqi: Option<f64>) -> String {
    let mut text = format!(
        "Based on the current air quality (AQI: {}), no specific medications are recommended at this time. \
         Stay hydrated and monitor for any developing symptoms.",
        format_aqi(aqi)
    );
    if aqi.is_some_and(|v| v > RESCUE_CLAUSE_ABOVE) {
        text.push_str(MEDICINE_RESCUE_CLAUSE);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(symptoms: &[&str]) -> HealthProfile {
        HealthProfile {
            symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_server_value_verbatim() {
        let text = derive_medicine(Some(200.0), Some("Take nothing"), &profile(&["Asthma"]));
        assert_eq!(text, "Take nothing");
    }

    #[test]
    fn test_single_symptom() {
        assert_eq!(derive_medicine(None, None, &profile(&["Eye irritation"])), MEDICINE_EYE_IRRITATION);
    }

    #[test]
    fn test_vocabulary_order_not_input_order() {
        let text = derive_medicine(None, None, &profile(&["Cough", "Asthma"]));
        assert_eq!(text, format!("{} {}", MEDICINE_ASTHMA, MEDICINE_COUGH));

        let asthma = text.find(MEDICINE_ASTHMA).unwrap();
        let cough = text.find(MEDICINE_COUGH).unwrap();
        assert!(asthma < cough);
    }

    #[test]
    fn test_all_symptoms() {
        let text = derive_medicine(
            None,
            None,
            &profile(&[
                "Throat irritation",
                "Headache",
                "Eye irritation",
                "Shortness of breath",
                "Cough",
                "Allergies",
                "Asthma",
            ]),
        );
        let expected: Vec<&str> = MEDICINE_GUIDANCE.iter().map(|(_, s)| *s).collect();
        assert_eq!(text, expected.join(" "));
    }

    #[test]
    fn test_unrecognized_symptoms_only() {
        assert_eq!(derive_medicine(None, None, &profile(&["Fatigue", "asthma"])), MEDICINE_UNRECOGNIZED);
    }

    #[test]
    fn test_respiratory_condition_has_no_medicine_sentence() {
        assert_eq!(
            derive_medicine(Some(180.0), None, &profile(&["Respiratory condition"])),
            MEDICINE_UNRECOGNIZED
        );
    }

    #[test]
    fn test_unrecognized_mixed_with_known_is_skipped() {
        let text = derive_medicine(None, None, &profile(&["Fatigue", "Headache"]));
        assert_eq!(text, MEDICINE_HEADACHE);
    }

    #[test]
    fn test_no_symptoms_low_aqi() {
        let text = derive_medicine(Some(40.0), None, &profile(&[]));
        assert!(text.contains("(AQI: 40)"));
        assert!(!text.contains(MEDICINE_RESCUE_CLAUSE.trim()));
    }

    #[test]
    fn test_no_symptoms_rescue_clause_above_100() {
        assert!(!derive_medicine(Some(100.0), None, &profile(&[])).ends_with(MEDICINE_RESCUE_CLAUSE));
        assert!(derive_medicine(Some(101.0), None, &profile(&[])).ends_with(MEDICINE_RESCUE_CLAUSE));
    }

    #[test]
    fn test_no_symptoms_unknown_aqi() {
        let text = derive_medicine(None, None, &profile(&[]));
        assert!(text.contains("(AQI: unknown)"));
        assert!(!text.ends_with(MEDICINE_RESCUE_CLAUSE));
    }
}
