//! Report wire model
//!
//! Shapes returned by the report store. Every field is optional: reports
//! written before server-side recommendations existed simply lack them.
//! Fields are read leniently, so a malformed value (a scalar of the wrong
//! type, or a nested section of the wrong shape) reads as absent instead of
//! failing the whole report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::advisory::Symptom;

/// Envelope returned by `GET /report/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub report: Option<RawReport>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub message: Option<String>,
}

/// A stored report in either the nested or the legacy flat shape
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReport {
    #[serde(default, deserialize_with = "lenient::object")]
    pub health_data: Option<HealthProfile>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub aqi_data: Option<AirQualityReading>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub report: Option<ServerRecommendations>,

    /// Legacy flat AQI value
    #[serde(default, deserialize_with = "lenient::number")]
    pub aqi: Option<f64>,
    /// Legacy flat status label
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthProfile {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::age")]
    pub age: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub symptoms: Vec<String>,
}

impl HealthProfile {
    /// Exact label match; unrecognized entries in `symptoms` never match anything
    pub fn has_symptom(&self, symptom: Symptom) -> bool {
        self.symptoms.iter().any(|s| s == symptom.label())
    }

    pub fn has_any_symptom(&self, symptoms: &[Symptom]) -> bool {
        symptoms.iter().any(|s| self.has_symptom(*s))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AirQualityReading {
    #[serde(default, deserialize_with = "lenient::number")]
    pub value: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerRecommendations {
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub general_recommendations: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub age_specific_recommendations: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub health_specific_recommendations: Vec<String>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub activity_guidelines: Option<ActivityGuidelines>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub protective_measures: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub medicine_recommendations: Vec<String>,
    /// When the server generated these recommendations
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ServerRecommendations {
    pub fn outdoor(&self) -> Option<&str> {
        self.activity_guidelines
            .as_ref()
            .and_then(|g| g.outdoor.as_deref())
    }

    // Only the first entry of each list is ever shown.

    pub fn general(&self) -> Option<&str> {
        self.general_recommendations.first().map(String::as_str)
    }

    pub fn age_specific(&self) -> Option<&str> {
        self.age_specific_recommendations.first().map(String::as_str)
    }

    pub fn health_specific(&self) -> Option<&str> {
        self.health_specific_recommendations.first().map(String::as_str)
    }

    pub fn mask(&self) -> Option<&str> {
        self.protective_measures.first().map(String::as_str)
    }

    pub fn medicine(&self) -> Option<&str> {
        self.medicine_recommendations.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityGuidelines {
    #[serde(default, deserialize_with = "lenient::string")]
    pub outdoor: Option<String>,
}

mod lenient {
    use chrono::{DateTime, TimeZone, Utc};
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn value<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Value>, D::Error> {
        Option::<Value>::deserialize(d)
    }

    fn as_number(v: &Value) -> Option<f64> {
        let n = match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        n.filter(|n| n.is_finite())
    }

    /// A nested section; anything that is not the expected shape is absent
    pub fn object<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(value(d)?.and_then(|v| serde_json::from_value(v).ok()))
    }

    pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(value(d)?.as_ref().and_then(as_number))
    }

    /// Non-negative years, fractions kept so `65.5` still counts as over 65
    pub fn age<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(value(d)?.as_ref().and_then(as_number).filter(|n| *n >= 0.0))
    }

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match value(d)? {
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
    }

    /// Keeps the string entries of an array, drops everything else
    pub fn string_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        Ok(match value(d)? {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        })
    }

    /// RFC 3339 string or epoch milliseconds
    pub fn timestamp<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        Ok(match value(d)? {
            Some(Value::String(s)) => DateTime::parse_from_rfc3339(s.trim())
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            Some(Value::Number(n)) => n
                .as_i64()
                .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
            _ => None,
        })
    }
}
