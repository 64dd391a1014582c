use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::IndexStats,
    services::{
        catalog::{build_catalog, MergedCatalog},
        features::{build_soup, normalize},
        providers::{load_all, CatalogSource},
        similarity::{SimilarityIndex, SimilarityMode},
        vectorizer::VectorSpace,
    },
};

/// Everything a query needs, built once and read-only afterwards
///
/// A new catalog means a new context; nothing here is mutated in place.
#[derive(Debug)]
pub struct RecommenderContext {
    catalog: MergedCatalog,
    index: SimilarityIndex,
    title_rows: HashMap<String, usize>,
    stats: IndexStats,
}

impl RecommenderContext {
    /// Builds soups, the similarity index and the title map from a merged catalog
    pub fn build(catalog: MergedCatalog, mode: SimilarityMode) -> AppResult<Self> {
        if catalog.is_empty() {
            return Err(AppError::EmptyCatalog);
        }

        let soups: Vec<String> = catalog.records().iter().map(build_soup).collect();
        let index = SimilarityIndex::build(VectorSpace::fit(&soups), mode);

        let mut title_rows: HashMap<String, usize> = HashMap::with_capacity(catalog.len());
        let mut shadowed = 0usize;
        for (row, record) in catalog.records().iter().enumerate() {
            // first row wins when several titles normalize to the same key
            if title_rows.contains_key(&normalize(&record.title)) {
                shadowed += 1;
            } else {
                title_rows.insert(normalize(&record.title), row);
            }
        }
        if shadowed > 0 {
            tracing::warn!(
                shadowed,
                "Titles sharing a normalized key are only reachable through the first row"
            );
        }

        if index.len() != catalog.len() || title_rows.len() + shadowed != index.len() {
            return Err(AppError::InvariantViolation(format!(
                "index has {} rows, catalog {} rows, title map {} entries",
                index.len(),
                catalog.len(),
                title_rows.len()
            )));
        }

        let stats = IndexStats {
            titles: catalog.len(),
            vocabulary: index.space().vocabulary_size(),
            mode,
            built_at: Utc::now(),
        };

        tracing::info!(
            titles = stats.titles,
            vocabulary = stats.vocabulary,
            mode = ?mode,
            "Recommender index built"
        );

        Ok(Self {
            catalog,
            index,
            title_rows,
            stats,
        })
    }

    pub fn catalog(&self) -> &MergedCatalog {
        &self.catalog
    }

    pub fn index(&self) -> &SimilarityIndex {
        &self.index
    }

    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    /// Resolves a user-supplied title to its row, normalizing it first
    pub fn row_of(&self, title: &str) -> AppResult<usize> {
        self.title_rows
            .get(&normalize(title))
            .copied()
            .ok_or_else(|| AppError::NotFound(title.to_string()))
    }
}

/// Loads every source, merges them and builds a context
///
/// The merge and index construction run on the blocking pool.
pub async fn load_context(
    sources: &[Arc<dyn CatalogSource>],
    mode: SimilarityMode,
) -> AppResult<RecommenderContext> {
    let tables = load_all(sources).await?;

    tokio::task::spawn_blocking(move || {
        let catalog = build_catalog(tables)?;
        RecommenderContext::build(catalog, mode)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))?
}
