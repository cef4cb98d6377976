//! Mask guidance
//!
//! The general part follows the AQI (or the server's first protective
//! measure); the personalized part depends only on the health profile.

use serde::Serialize;

use super::{server_value, tiered, Symptom};
use crate::models::HealthProfile;

pub const MASK_STRONGLY_RECOMMENDED: &str = "Given the unhealthy air quality, wearing a high-quality N95 or KN95 mask is strongly recommended if you have to go outdoors. A simple cloth mask won't provide adequate protection.";
pub const MASK_EXTENDED_OUTDOORS: &str = "For the current air quality level, an N95 or KN95 mask is recommended if you need to spend extended time outdoors, especially if you have respiratory conditions.";
pub const MASK_SURGICAL_OPTIONAL: &str = "A standard surgical mask may provide some protection during outdoor activities, though it's not essential at this air quality level unless you have respiratory sensitivities.";
pub const MASK_UNNECESSARY: &str = "At the current air quality level, masks are generally not necessary for outdoor activities unless you have specific health concerns.";

pub const MASK_RESPIRATORY: &str = "Based on your reported respiratory conditions, an N95 or KN95 mask is recommended even at moderate AQI levels to provide adequate protection for your sensitive respiratory system.";
pub const MASK_SENIOR: &str = "As a senior adult, your respiratory system may be more vulnerable to air pollution. A properly fitted N95 mask is recommended when air quality is poor.";
pub const MASK_CHILD: &str = "For children, specially sized masks designed for younger users are important. Standard adult masks won't provide proper protection due to fit issues.";
pub const MASK_FOLLOW_GENERAL: &str = "Based on your profile, follow the general mask recommendations for your current air quality level.";

const MASK_TIERS: [(f64, &str); 3] = [
    (150.0, MASK_STRONGLY_RECOMMENDED),
    (100.0, MASK_EXTENDED_OUTDOORS),
    (50.0, MASK_SURGICAL_OPTIONAL),
];

const SENIOR_AGE_ABOVE: f64 = 65.0;
const CHILD_AGE_BELOW: f64 = 12.0;

type ProfileRule = (fn(&HealthProfile) -> bool, &'static str);

/// Evaluated in order; the first match is the only one applied.
const PERSONAL_MASK_RULES: [ProfileRule; 3] = [
    (has_respiratory_condition, MASK_RESPIRATORY),
    (is_senior, MASK_SENIOR),
    (is_child, MASK_CHILD),
];

fn has_respiratory_condition(profile: &HealthProfile) -> bool {
    profile.has_any_symptom(&[Symptom::Asthma, Symptom::RespiratoryCondition])
}

fn is_senior(profile: &HealthProfile) -> bool {
    profile.age.is_some_and(|age| age > SENIOR_AGE_ABOVE)
}

fn is_child(profile: &HealthProfile) -> bool {
    profile.age.is_some_and(|age| age < CHILD_AGE_BELOW)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaskAdvice {
    pub general: String,
    pub personalized: String,
}

pub fn derive_mask(aqi: Option<f64>, server_mask: Option<&str>, profile: &HealthProfile) -> MaskAdvice {
    let general = match server_value(server_mask) {
        Some(server) => server.to_string(),
        None => tiered(aqi, &MASK_TIERS, MASK_UNNECESSARY).to_string(),
    };

    let personalized = PERSONAL_MASK_RULES
        .iter()
        .find(|(applies, _)| applies(profile))
        .map(|(_, text)| *text)
        .unwrap_or(MASK_FOLLOW_GENERAL);

    MaskAdvice {
        general,
        personalized: personalized.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(age: Option<f64>, symptoms: &[&str]) -> HealthProfile {
        HealthProfile {
            name: None,
            age,
            symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_general_tiers() {
        let p = HealthProfile::default();
        assert_eq!(derive_mask(Some(151.0), None, &p).general, MASK_STRONGLY_RECOMMENDED);
        assert_eq!(derive_mask(Some(150.0), None, &p).general, MASK_EXTENDED_OUTDOORS);
        assert_eq!(derive_mask(Some(101.0), None, &p).general, MASK_EXTENDED_OUTDOORS);
        assert_eq!(derive_mask(Some(100.0), None, &p).general, MASK_SURGICAL_OPTIONAL);
        assert_eq!(derive_mask(Some(51.0), None, &p).general, MASK_SURGICAL_OPTIONAL);
        assert_eq!(derive_mask(Some(50.0), None, &p).general, MASK_UNNECESSARY);
        assert_eq!(derive_mask(None, None, &p).general, MASK_UNNECESSARY);
    }

    #[test]
    fn test_server_mask_only_replaces_general() {
        let p = profile(Some(70.0), &[]);
        let advice = derive_mask(Some(20.0), Some("Wear a respirator"), &p);
        assert_eq!(advice.general, "Wear a respirator");
        assert_eq!(advice.personalized, MASK_SENIOR);
    }

    #[test]
    fn test_respiratory_beats_age() {
        let advice = derive_mask(Some(40.0), None, &profile(Some(70.0), &["Asthma"]));
        assert_eq!(advice.personalized, MASK_RESPIRATORY);

        let advice = derive_mask(Some(40.0), None, &profile(Some(8.0), &["Respiratory condition"]));
        assert_eq!(advice.personalized, MASK_RESPIRATORY);
    }

    #[test]
    fn test_age_bands() {
        assert_eq!(derive_mask(None, None, &profile(Some(66.0), &[])).personalized, MASK_SENIOR);
        assert_eq!(derive_mask(None, None, &profile(Some(65.0), &[])).personalized, MASK_FOLLOW_GENERAL);
        assert_eq!(derive_mask(None, None, &profile(Some(11.0), &[])).personalized, MASK_CHILD);
        assert_eq!(derive_mask(None, None, &profile(Some(12.0), &[])).personalized, MASK_FOLLOW_GENERAL);
        assert_eq!(derive_mask(None, None, &profile(Some(0.0), &[])).personalized, MASK_CHILD);
        assert_eq!(derive_mask(None, None, &profile(Some(65.5), &[])).personalized, MASK_SENIOR);
        assert_eq!(derive_mask(None, None, &profile(Some(11.9), &[])).personalized, MASK_CHILD);
    }

    #[test]
    fn test_unknown_age_matches_no_age_rule() {
        let advice = derive_mask(Some(180.0), None, &profile(None, &["Cough"]));
        assert_eq!(advice.personalized, MASK_FOLLOW_GENERAL);
    }

    #[test]
    fn test_unhealthy_senior_asthmatic() {
        let advice = derive_mask(Some(180.0), None, &profile(Some(70.0), &["Asthma"]));
        assert_eq!(advice.general, MASK_STRONGLY_RECOMMENDED);
        assert_eq!(advice.personalized, MASK_RESPIRATORY);
    }
}
