use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;

use crate::{
    models::Platform,
    services::{
        providers::{csv_file::CsvCatalogSource, CatalogSource},
        similarity::SimilarityMode,
    },
};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Directory holding the catalog CSV files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_netflix_catalog")]
    pub netflix_catalog: String,

    #[serde(default = "default_amazon_catalog")]
    pub amazon_catalog: String,

    #[serde(default = "default_hulu_catalog")]
    pub hulu_catalog: String,

    #[serde(default = "default_disney_catalog")]
    pub disney_catalog: String,

    /// `eager` materializes the full similarity matrix, `lazy` scores per query
    #[serde(default)]
    pub similarity_mode: SimilarityMode,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log filter used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_netflix_catalog() -> String {
    "netflix_titles.csv".to_string()
}

fn default_amazon_catalog() -> String {
    "amazon_prime_titles.csv".to_string()
}

fn default_hulu_catalog() -> String {
    "hulu_titles.csv".to_string()
}

fn default_disney_catalog() -> String {
    "disney_plus_titles.csv".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Catalog file for a platform, resolved against `data_dir`
    pub fn catalog_path(&self, platform: Platform) -> PathBuf {
        let file = match platform {
            Platform::Netflix => &self.netflix_catalog,
            Platform::Amazon => &self.amazon_catalog,
            Platform::Hulu => &self.hulu_catalog,
            Platform::Disney => &self.disney_catalog,
        };
        self.data_dir.join(file)
    }

    /// One CSV source per platform
    pub fn catalog_sources(&self) -> Vec<Arc<dyn CatalogSource>> {
        Platform::ALL
            .into_iter()
            .map(|platform| {
                Arc::new(CsvCatalogSource::new(platform, self.catalog_path(platform)))
                    as Arc<dyn CatalogSource>
            })
            .collect()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Config {
        envy::from_iter::<_, Config>(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = from_pairs(&[]);
        assert_eq!(config.similarity_mode, SimilarityMode::Lazy);
        assert_eq!(config.port, 3000);
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(
            config.catalog_path(Platform::Disney),
            PathBuf::from("data/disney_plus_titles.csv")
        );
    }

    #[test]
    fn test_overrides() {
        let config = from_pairs(&[
            ("DATA_DIR", "/srv/catalogs"),
            ("HULU_CATALOG", "hulu.csv"),
            ("SIMILARITY_MODE", "eager"),
            ("PORT", "8080"),
        ]);
        assert_eq!(config.similarity_mode, SimilarityMode::Eager);
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.catalog_path(Platform::Hulu),
            PathBuf::from("/srv/catalogs/hulu.csv")
        );
    }

    #[test]
    fn test_catalog_sources_cover_every_platform() {
        let sources = from_pairs(&[]).catalog_sources();
        let platforms: Vec<Platform> = sources.iter().map(|s| s.platform()).collect();
        assert_eq!(platforms, Platform::ALL.to_vec());
    }
}
