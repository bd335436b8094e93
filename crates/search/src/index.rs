//! In-memory inverted index, periodically rebuilt from the `Store`.
//!
//! Publication is a single `ArcSwap` reference swap: readers never block the
//! refresher and vice versa, and a reader observes one snapshot, old or
//! new, never a partial one, for the full duration of a lookup.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use comics_core::{Comic, CoreError};
use comics_store::Store;
use tracing::{error, info};

/// Immutable keyword→ids map published by the refresher.
#[derive(Debug, Default)]
pub struct IndexSnapshot {
    storage: HashMap<String, Vec<u32>>,
}

impl IndexSnapshot {
    fn build(rows: &[comics_core::IndexRow]) -> Self {
        let mut storage: HashMap<String, Vec<u32>> = HashMap::new();
        for row in rows {
            for keyword in &row.keywords {
                storage.entry(keyword.clone()).or_default().push(row.id);
            }
        }
        Self { storage }
    }
}

pub struct Index {
    store: Arc<Store>,
    snapshot: ArcSwap<IndexSnapshot>,
}

impl Index {
    /// Builds an initial (possibly empty) snapshot and spawns the background
    /// refresher ticking every `ttl`. The refresher runs for the lifetime of
    /// the returned `Index`; drop it to stop refreshing.
    pub async fn spawn(store: Arc<Store>, ttl: Duration) -> Arc<Self> {
        let initial = match store.list_all().await {
            Ok(rows) => IndexSnapshot::build(&rows),
            Err(e) => {
                error!(error = %e, "failed initial index build, starting empty");
                IndexSnapshot::default()
            }
        };

        let index = Arc::new(Self {
            store,
            snapshot: ArcSwap::from_pointee(initial),
        });

        let refresher = Arc::clone(&index);
        tokio::spawn(async move {
            refresher.refresh_loop(ttl).await;
        });

        index
    }

    async fn refresh_loop(&self, ttl: Duration) {
        let mut ticker = tokio::time::interval(ttl);
        ticker.tick().await; // first tick fires immediately; skip it, we already built
        loop {
            ticker.tick().await;
            info!("rebuilding index");
            match self.store.list_all().await {
                Ok(rows) => {
                    self.snapshot.store(Arc::new(IndexSnapshot::build(&rows)));
                }
                Err(e) => {
                    error!(error = %e, "index refresh failed, keeping previous snapshot");
                }
            }
        }
    }

    /// Scored lookup: per-comic score is the count of query keywords present
    /// in that comic's entries, ranked `(score desc, id desc)`, truncated to
    /// `limit`. Empty on no matches, never an error. URL resolution failure
    /// (distinct from NOT_FOUND, which is skippable) fails the whole call so
    /// a partial, rank-misrepresenting result is never returned.
    pub async fn search_by_index(
        &self,
        limit: usize,
        keywords: &[String],
    ) -> Result<Vec<Comic>, CoreError> {
        let snapshot = self.snapshot.load();

        let mut scores: HashMap<u32, usize> = HashMap::new();
        for keyword in keywords {
            if let Some(ids) = snapshot.storage.get(keyword) {
                for &id in ids {
                    *scores.entry(id).or_insert(0) += 1;
                }
            }
        }

        if scores.is_empty() {
            return Ok(Vec::new());
        }

        let mut ranked: Vec<(u32, usize)> = scores.into_iter().collect();
        ranked.sort_by(|(id_a, score_a), (id_b, score_b)| {
            score_b.cmp(score_a).then_with(|| id_b.cmp(id_a))
        });
        ranked.truncate(limit);

        let mut result = Vec::with_capacity(ranked.len());
        for (id, _score) in ranked {
            let url = self.store.get_image_url(id).await?;
            if url.is_empty() {
                continue;
            }
            result.push(Comic::summary(id, url));
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comics_core::IndexRow;

    fn row(id: u32, keywords: &[&str]) -> IndexRow {
        IndexRow {
            id,
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn ranks_by_overlap_count_then_id_descending() {
        let snapshot = IndexSnapshot::build(&[
            row(1, &["cat", "dog"]),
            row(2, &["cat"]),
            row(3, &["dog"]),
        ]);

        let mut scores: HashMap<u32, usize> = HashMap::new();
        for keyword in ["cat", "dog"] {
            if let Some(ids) = snapshot.storage.get(keyword) {
                for &id in ids {
                    *scores.entry(id).or_insert(0) += 1;
                }
            }
        }
        let mut ranked: Vec<(u32, usize)> = scores.into_iter().collect();
        ranked.sort_by(|(id_a, score_a), (id_b, score_b)| {
            score_b.cmp(score_a).then_with(|| id_b.cmp(id_a))
        });

        assert_eq!(
            ranked.into_iter().map(|(id, _)| id).collect::<Vec<_>>(),
            vec![1, 3, 2]
        );
    }

    #[test]
    fn empty_query_yields_empty_snapshot_lookup() {
        let snapshot = IndexSnapshot::build(&[row(1, &["cat"])]);
        assert!(snapshot.storage.get("dog").is_none());
    }
}
