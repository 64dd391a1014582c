use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod platform;
pub mod title;

pub use platform::{Platform, PlatformFlags, PlatformTally};
pub use title::{RawTitle, TitleRecord, TitleSummary, TitleType};

use crate::services::similarity::SimilarityMode;

/// Request for titles similar to one catalog title
#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub title: String,
}

/// A neighbor of the query title with its similarity score
#[derive(Debug, Clone, Serialize)]
pub struct RecommendedTitle {
    pub title: String,
    #[serde(rename = "type")]
    pub title_type: TitleType,
    pub score: f64,
    pub platforms: Vec<Platform>,
}

/// Recommended titles plus the platforms that carry most of them
#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    /// The catalog title the query resolved to
    pub query: String,
    /// Most similar titles, best first
    pub recommendations: Vec<RecommendedTitle>,
    /// Platform display names ordered by vote count, best first
    pub ranking: Vec<String>,
    /// Raw vote counts per platform
    pub tally: PlatformTally,
}

/// Summary of a built recommender index
#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    pub titles: usize,
    pub vocabulary: usize,
    pub mode: SimilarityMode,
    pub built_at: DateTime<Utc>,
}
