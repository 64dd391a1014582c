use serde::{Deserialize, Serialize, Serializer};
use std::fmt::Display;

use super::PlatformFlags;

/// Kind of catalog entry as given by the catalog's `type` column
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TitleType {
    Movie,
    TvShow,
    /// Anything else is kept verbatim so it still separates dedup keys
    Other(String),
}

impl TitleType {
    pub fn as_str(&self) -> &str {
        match self {
            TitleType::Movie => "movie",
            TitleType::TvShow => "tv_show",
            TitleType::Other(raw) => raw,
        }
    }
}

impl From<&str> for TitleType {
    fn from(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("movie") {
            TitleType::Movie
        } else if trimmed.eq_ignore_ascii_case("tv show") {
            TitleType::TvShow
        } else {
            TitleType::Other(trimmed.to_string())
        }
    }
}

impl Display for TitleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for TitleType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A catalog row as it appears in a platform CSV
///
/// Only the columns the recommender uses are read; missing columns and empty
/// cells become empty strings.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RawTitle {
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub cast: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub release_year: Option<i32>,
}

/// A deduplicated title with its platform membership
#[derive(Debug, Clone, PartialEq)]
pub struct TitleRecord {
    pub title: String,
    pub title_type: TitleType,
    pub director: String,
    pub cast: String,
    pub description: String,
    pub release_year: Option<i32>,
    pub platforms: PlatformFlags,
}

impl TitleRecord {
    /// Builds a record from a raw row, tagging it with the given membership
    pub fn from_raw(raw: RawTitle, platforms: PlatformFlags) -> Self {
        Self {
            title_type: TitleType::from(raw.kind.as_str()),
            title: raw.title,
            director: raw.director,
            cast: raw.cast,
            description: raw.description,
            release_year: raw.release_year,
            platforms,
        }
    }
}

/// Title entry returned by the listing endpoint
#[derive(Debug, Clone, Serialize)]
pub struct TitleSummary {
    pub title: String,
    #[serde(rename = "type")]
    pub title_type: TitleType,
    pub release_year: Option<i32>,
}

impl From<&TitleRecord> for TitleSummary {
    fn from(record: &TitleRecord) -> Self {
        Self {
            title: record.title.clone(),
            title_type: record.title_type.clone(),
            release_year: record.release_year,
        }
    }
}
