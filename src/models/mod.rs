//! Data models
//!
//! Report wire types, the canonical report, and the local session.

mod canonical;
mod report;
mod session;

pub use canonical::{normalize, CanonicalReport};
pub use report::{
    ActivityGuidelines, AirQualityReading, HealthProfile, RawReport, ServerRecommendations,
    StoreResponse,
};
pub use session::Session;
