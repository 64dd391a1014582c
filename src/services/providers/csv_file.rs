use std::io::Read;
use std::path::{Path, PathBuf};

use crate::{
    error::{AppError, AppResult},
    models::{Platform, RawTitle},
};

use super::CatalogSource;

/// Platform catalog stored as a CSV file with a header row
///
/// Columns are matched by header name; extra columns are ignored and missing
/// ones read as empty.
#[derive(Debug, Clone)]
pub struct CsvCatalogSource {
    platform: Platform,
    path: PathBuf,
}

impl CsvCatalogSource {
    pub fn new(platform: Platform, path: impl Into<PathBuf>) -> Self {
        Self {
            platform,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parses catalog rows from any CSV reader
pub fn parse_catalog<R: Read>(reader: R) -> AppResult<Vec<RawTitle>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in csv_reader.deserialize() {
        let row: RawTitle = result?;
        rows.push(row);
    }
    Ok(rows)
}

#[async_trait::async_trait]
impl CatalogSource for CsvCatalogSource {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn load(&self) -> AppResult<Vec<RawTitle>> {
        let path = self.path().to_path_buf();
        tracing::debug!(platform = %self.platform, path = %path.display(), "Reading catalog");

        tokio::task::spawn_blocking(move || -> AppResult<Vec<RawTitle>> {
            let file = std::fs::File::open(&path)?;
            parse_catalog(std::io::BufReader::new(file))
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
