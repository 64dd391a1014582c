use crate::{
    error::AppResult,
    models::{Platform, RawTitle},
};

use super::CatalogSource;

/// Source backed by rows already in memory
#[derive(Debug, Clone)]
pub struct InMemoryCatalogSource {
    platform: Platform,
    rows: Vec<RawTitle>,
}

impl InMemoryCatalogSource {
    pub fn new(platform: Platform, rows: Vec<RawTitle>) -> Self {
        Self { platform, rows }
    }
}

#[async_trait::async_trait]
impl CatalogSource for InMemoryCatalogSource {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn load(&self) -> AppResult<Vec<RawTitle>> {
        Ok(self.rows.clone())
    }
}
