//! AQI categories
//!
//! US EPA bands, used for colouring the report and its chart. The advisory
//! rules use their own thresholds and never consult the category.

use serde::Serialize;

pub const COLOR_GOOD: (u8, u8, u8) = (0, 228, 0);
pub const COLOR_MODERATE: (u8, u8, u8) = (255, 255, 0);
pub const COLOR_SENSITIVE: (u8, u8, u8) = (255, 126, 0);
pub const COLOR_UNHEALTHY: (u8, u8, u8) = (255, 0, 0);
pub const COLOR_VERY_UNHEALTHY: (u8, u8, u8) = (143, 63, 151);
pub const COLOR_HAZARDOUS: (u8, u8, u8) = (126, 0, 35);
pub const COLOR_UNKNOWN: (u8, u8, u8) = (128, 128, 128);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AqiCategory {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiCategory {
    /// Category bands in ascending order with their exclusive lower bound
    pub const BANDS: [(f64, AqiCategory); 6] = [
        (f64::NEG_INFINITY, AqiCategory::Good),
        (50.0, AqiCategory::Moderate),
        (100.0, AqiCategory::UnhealthyForSensitiveGroups),
        (150.0, AqiCategory::Unhealthy),
        (200.0, AqiCategory::VeryUnhealthy),
        (300.0, AqiCategory::Hazardous),
    ];

    pub fn classify(aqi: f64) -> Self {
        Self::BANDS
            .iter()
            .rev()
            .find(|(floor, _)| aqi > *floor)
            .map(|(_, category)| *category)
            .unwrap_or(AqiCategory::Good)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            AqiCategory::Unhealthy => "Unhealthy",
            AqiCategory::VeryUnhealthy => "Very Unhealthy",
            AqiCategory::Hazardous => "Hazardous",
        }
    }

    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            AqiCategory::Good => COLOR_GOOD,
            AqiCategory::Moderate => COLOR_MODERATE,
            AqiCategory::UnhealthyForSensitiveGroups => COLOR_SENSITIVE,
            AqiCategory::Unhealthy => COLOR_UNHEALTHY,
            AqiCategory::VeryUnhealthy => COLOR_VERY_UNHEALTHY,
            AqiCategory::Hazardous => COLOR_HAZARDOUS,
        }
    }

    /// Inclusive display range, e.g. "101-150"
    pub fn range_label(&self) -> &'static str {
        match self {
            AqiCategory::Good => "0-50",
            AqiCategory::Moderate => "51-100",
            AqiCategory::UnhealthyForSensitiveGroups => "101-150",
            AqiCategory::Unhealthy => "151-200",
            AqiCategory::VeryUnhealthy => "201-300",
            AqiCategory::Hazardous => "301+",
        }
    }
}
