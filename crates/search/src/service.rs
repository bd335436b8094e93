//! Orchestrates normalize→(store|index) search for both search modes.

use std::sync::Arc;

use comics_core::{Comic, CoreError};
use comics_rpc::NormalizerClient;
use comics_store::Store;

use crate::index::Index;

pub struct SearchSvc {
    store: Arc<Store>,
    normalizer: NormalizerClient,
    index: Arc<Index>,
}

impl SearchSvc {
    pub fn new(store: Arc<Store>, normalizer: NormalizerClient, index: Arc<Index>) -> Self {
        Self {
            store,
            normalizer,
            index,
        }
    }

    /// `Normalizer.Norm` → `Store.SearchByKeywords`. A normalize failure is
    /// fatal; an empty phrase after normalization yields an empty result.
    pub async fn search(&self, limit: usize, phrase: &str) -> Result<Vec<Comic>, CoreError> {
        let keywords = self
            .normalizer
            .norm(phrase)
            .await
            .map_err(|e| CoreError::Normalize(e.to_string()))?;

        if keywords.is_empty() {
            return Ok(Vec::new());
        }

        self.store.search_by_keywords(limit as i64, &keywords).await
    }

    /// `Normalizer.Norm` → `Index.SearchByIndex`.
    pub async fn index_search(&self, limit: usize, phrase: &str) -> Result<Vec<Comic>, CoreError> {
        let keywords = self
            .normalizer
            .norm(phrase)
            .await
            .map_err(|e| CoreError::Normalize(e.to_string()))?;

        if keywords.is_empty() {
            return Ok(Vec::new());
        }

        self.index.search_by_index(limit, &keywords).await
    }
}
