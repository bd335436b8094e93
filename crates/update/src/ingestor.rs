//! Bounded-concurrency, resumable crawl of the upstream comics feed into the
//! `Store`, guarded by a non-blocking single-flight lock.

use std::collections::HashSet;
use std::sync::Arc;

use comics_core::{Comic, CoreError, IngestStats, IngestStatus};
use comics_rpc::NormalizerClient;
use comics_store::Store;
use tokio::sync::{Mutex, Semaphore};
use tracing::{error, info, warn};

use crate::xkcd::{FetchError, UpstreamClient};

/// Owns the seen-id cache behind the same lock that provides single-flight
/// semantics, matching the original's single `mu` guarding both.
pub struct Ingestor {
    store: Arc<Store>,
    upstream: Arc<UpstreamClient>,
    normalizer: Arc<NormalizerClient>,
    concurrency: usize,
    state: Mutex<HashSet<u32>>,
}

impl Ingestor {
    pub fn new(
        store: Arc<Store>,
        upstream: UpstreamClient,
        normalizer: NormalizerClient,
        concurrency: u32,
    ) -> Result<Self, CoreError> {
        if concurrency < 1 {
            return Err(CoreError::Other(format!(
                "wrong concurrency specified: {concurrency}"
            )));
        }
        Ok(Self {
            store,
            upstream: Arc::new(upstream),
            normalizer: Arc::new(normalizer),
            concurrency: concurrency as usize,
            state: Mutex::new(HashSet::new()),
        })
    }

    /// Crawl `[1..=last_id] \ existing`, bounded by `concurrency` inflight
    /// fetches. Returns `Err(CoreError::AlreadyRunning)` without touching any
    /// collaborator if another `Update` already holds the lock. Otherwise
    /// always returns `Ok(())`, individual item failures are logged and
    /// skipped, not surfaced; the next run resumes them.
    pub async fn update(&self) -> Result<(), CoreError> {
        let mut cache = match self.state.try_lock() {
            Ok(guard) => guard,
            Err(_) => return Err(CoreError::AlreadyRunning),
        };

        let last_id = match self.upstream.last_id().await {
            Ok(id) => id,
            Err(e) => {
                error!(error = %e, "failed to get last id");
                0
            }
        };

        match self.store.ids().await {
            Ok(existing) => cache.extend(existing),
            Err(e) => error!(error = %e, "failed to get ids from store"),
        }

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = tokio::task::JoinSet::new();

        for id in 1..=last_id {
            if cache.contains(&id) {
                continue;
            }
            let permit = Arc::clone(&semaphore);
            let store = Arc::clone(&self.store);
            let upstream = Arc::clone(&self.upstream);
            let normalizer = Arc::clone(&self.normalizer);
            tasks.spawn(fetch_one(id, upstream, normalizer, store, permit));
        }

        while tasks.join_next().await.is_some() {}

        Ok(())
    }

    pub async fn stats(&self) -> Result<IngestStats, CoreError> {
        let mut stats = self.store.stats().await?;
        stats.comics_total = self.upstream.last_id().await.unwrap_or(0) as i64;
        Ok(stats)
    }

    /// `RUNNING` iff the single-flight lock is currently held.
    pub async fn status(&self) -> IngestStatus {
        match self.state.try_lock() {
            Ok(_guard) => IngestStatus::Idle,
            Err(_) => IngestStatus::Running,
        }
    }

    /// Truncate the store and clear the seen-id cache. Waits for any
    /// in-flight `Update` to release the lock first, rather than racing it.
    pub async fn drop(&self) -> Result<(), CoreError> {
        let mut cache = self.state.lock().await;
        self.store.drop_all().await?;
        cache.clear();
        Ok(())
    }
}

async fn fetch_one(
    id: u32,
    upstream: Arc<UpstreamClient>,
    normalizer: Arc<NormalizerClient>,
    store: Arc<Store>,
    semaphore: Arc<Semaphore>,
) {
    let _permit = match semaphore.acquire_owned().await {
        Ok(p) => p,
        Err(_) => return,
    };

    let entry = match upstream.get(id).await {
        Ok(entry) => entry,
        Err(FetchError::NotFound) => {
            if let Err(e) = store.add(&Comic::sentinel()).await {
                error!(error = %e, "failed to save sentinel comic");
            }
            return;
        }
        Err(FetchError::Other(e)) => {
            warn!(id, error = %e, "failed to fetch comic, skipping");
            return;
        }
    };

    let phrase = entry.phrase();
    let keywords = match normalizer.norm(&phrase).await {
        Ok(keywords) => keywords,
        Err(e) => {
            warn!(id, error = %e, "failed to normalize comic, skipping");
            return;
        }
    };

    let comic = Comic {
        id: entry.id,
        image_url: entry.image_url,
        keywords,
    };
    if let Err(e) = store.add(&comic).await {
        error!(id, error = %e, "failed to save comic");
    } else {
        info!(id, "comic ingested");
    }
}
