//! Catalog sources
//!
//! Each platform's titles come from one source. Sources are loaded
//! concurrently and merged in platform declaration order, so the merge result
//! does not depend on which load finishes first.

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Platform, RawTitle},
};

pub mod csv_file;
pub mod memory;

/// Supplier of one platform's raw catalog rows
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Platform whose membership flag the rows receive
    fn platform(&self) -> Platform;

    /// Loads every row, in source order
    async fn load(&self) -> AppResult<Vec<RawTitle>>;
}

/// Loads all sources in parallel and returns the tables in platform order
///
/// Any failing source fails the whole load: a missing catalog would silently
/// skew every platform tally.
pub async fn load_all(
    sources: &[Arc<dyn CatalogSource>],
) -> AppResult<Vec<(Platform, Vec<RawTitle>)>> {
    let mut tasks = Vec::new();

    for source in sources {
        let source = Arc::clone(source);
        let platform = source.platform();
        let task = tokio::spawn(async move { source.load().await });
        tasks.push((platform, task));
    }

    let mut tables = Vec::with_capacity(tasks.len());
    for (platform, task) in tasks {
        match task.await {
            Ok(Ok(rows)) => {
                tracing::info!(platform = %platform, rows = rows.len(), "Catalog loaded");
                tables.push((platform, rows));
            }
            Ok(Err(e)) => {
                tracing::error!(platform = %platform, error = %e, "Catalog load failed");
                return Err(e);
            }
            Err(e) => {
                tracing::error!(platform = %platform, error = %e, "Task join error");
                return Err(AppError::Internal(e.to_string()));
            }
        }
    }

    tables.sort_by_key(|(platform, _)| *platform);
    Ok(tables)
}
