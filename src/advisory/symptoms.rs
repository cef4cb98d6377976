//! Symptom vocabulary

use serde::Serialize;

/// Recognized symptom labels. Profiles may carry other strings; those are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Symptom {
    Asthma,
    Allergies,
    Cough,
    ShortnessOfBreath,
    EyeIrritation,
    Headache,
    ThroatIrritation,
    RespiratoryCondition,
}

impl Symptom {
    pub const ALL: [Symptom; 8] = [
        Symptom::Asthma,
        Symptom::Allergies,
        Symptom::Cough,
        Symptom::ShortnessOfBreath,
        Symptom::EyeIrritation,
        Symptom::Headache,
        Symptom::ThroatIrritation,
        Symptom::RespiratoryCondition,
    ];

    /// Label as sent by the report store
    pub fn label(&self) -> &'static str {
        match self {
            Symptom::Asthma => "Asthma",
            Symptom::Allergies => "Allergies",
            Symptom::Cough => "Cough",
            Symptom::ShortnessOfBreath => "Shortness of breath",
            Symptom::EyeIrritation => "Eye irritation",
            Symptom::Headache => "Headache",
            Symptom::ThroatIrritation => "Throat irritation",
            Symptom::RespiratoryCondition => "Respiratory condition",
        }
    }

    /// Exact, case-sensitive match against the store labels
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}
