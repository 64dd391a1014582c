use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    error::AppResult,
    models::IndexStats,
    services::{
        context::{load_context, RecommenderContext},
        providers::CatalogSource,
        similarity::SimilarityMode,
    },
};

/// Shared application state
///
/// Requests grab a cheap clone of the current context and release the lock
/// immediately. A reload builds a complete replacement before swapping it in.
#[derive(Clone)]
pub struct AppState {
    context: Arc<RwLock<Arc<RecommenderContext>>>,
    sources: Arc<Vec<Arc<dyn CatalogSource>>>,
    mode: SimilarityMode,
}

impl AppState {
    pub fn new(
        context: RecommenderContext,
        sources: Vec<Arc<dyn CatalogSource>>,
        mode: SimilarityMode,
    ) -> Self {
        Self {
            context: Arc::new(RwLock::new(Arc::new(context))),
            sources: Arc::new(sources),
            mode,
        }
    }

    /// The context serving requests right now
    pub async fn current(&self) -> Arc<RecommenderContext> {
        Arc::clone(&*self.context.read().await)
    }

    /// Rebuilds the context from the configured sources and swaps it in
    ///
    /// On failure the previous context keeps serving.
    pub async fn reload(&self) -> AppResult<IndexStats> {
        let fresh = load_context(&self.sources, self.mode).await?;
        let stats = fresh.stats().clone();

        *self.context.write().await = Arc::new(fresh);
        tracing::info!(titles = stats.titles, "Recommender context swapped");

        Ok(stats)
    }
}
