//! Outdoor activity assessment

use super::{server_value, tiered};

pub const ACTIVITY_STAY_INDOORS: &str = "Based on the current AQI, outdoor activities are not recommended. It's best to stay indoors as much as possible.";
pub const ACTIVITY_LIMIT_PROLONGED: &str = "The current air quality is not ideal for prolonged outdoor activities. Consider limiting time outside, especially if you have respiratory issues.";
pub const ACTIVITY_ALLOWED: &str = "The current air quality allows for outdoor activities, but stay aware of any changes in air quality or your health condition.";

/// Highest floor first; a value must exceed the floor to land in its tier.
const ACTIVITY_TIERS: [(f64, &str); 2] = [
    (150.0, ACTIVITY_STAY_INDOORS),
    (100.0, ACTIVITY_LIMIT_PROLONGED),
];

/// Outdoor activity guidance. A non-empty server value is returned unchanged.
pub fn derive_activity(aqi: Option<f64>, server_outdoor: Option<&str>) -> String {
    match server_value(server_outdoor) {
        Some(server) => server.to_string(),
        None => tiered(aqi, &ACTIVITY_TIERS, ACTIVITY_ALLOWED).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers() {
        assert_eq!(derive_activity(Some(300.0), None), ACTIVITY_STAY_INDOORS);
        assert_eq!(derive_activity(Some(120.0), None), ACTIVITY_LIMIT_PROLONGED);
        assert_eq!(derive_activity(Some(20.0), None), ACTIVITY_ALLOWED);
    }

    #[test]
    fn test_boundaries_are_exclusive() {
        assert_eq!(derive_activity(Some(151.0), None), ACTIVITY_STAY_INDOORS);
        assert_eq!(derive_activity(Some(150.0), None), ACTIVITY_LIMIT_PROLONGED);
        assert_eq!(derive_activity(Some(101.0), None), ACTIVITY_LIMIT_PROLONGED);
        assert_eq!(derive_activity(Some(100.0), None), ACTIVITY_ALLOWED);
        assert_ne!(derive_activity(Some(151.0), None), derive_activity(Some(150.0), None));
        assert_ne!(derive_activity(Some(101.0), None), derive_activity(Some(100.0), None));
    }

    #[test]
    fn test_unknown_aqi_allows_activity() {
        assert_eq!(derive_activity(None, None), ACTIVITY_ALLOWED);
    }

    #[test]
    fn test_server_value_wins() {
        for aqi in [None, Some(0.0), Some(100.0), Some(151.0), Some(499.0)] {
            assert_eq!(derive_activity(aqi, Some("X")), "X");
        }
    }

    #[test]
    fn test_empty_server_value_is_ignored() {
        assert_eq!(derive_activity(Some(200.0), Some("")), ACTIVITY_STAY_INDOORS);
    }
}
