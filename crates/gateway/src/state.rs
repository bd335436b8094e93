//! Shared application state for the Gateway: RPC clients to the three
//! internal services, the in-process AAA component, and the admission
//! controls placed in front of `/api/search` and `/api/isearch`.

use std::time::Duration;

use comics_aaa::Aaa;
use comics_rpc::{IngestorClient, NormalizerClient, SearchClient};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use tokio::sync::Semaphore;

/// Single-key token-bucket limiter shared across all callers of `/api/isearch`.
pub type SearchRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

pub struct AppState {
    pub ingestor: IngestorClient,
    pub search: SearchClient,
    pub normalizer: NormalizerClient,
    pub aaa: Aaa,
    /// Admission cap for `/api/search`: rejects with 503 instead of queuing.
    pub search_concurrency: Semaphore,
    /// Admission throttle for `/api/isearch`: waits for a token rather than rejecting.
    pub search_rate: SearchRateLimiter,
}

impl AppState {
    pub fn new(
        ingestor: IngestorClient,
        search: SearchClient,
        normalizer: NormalizerClient,
        aaa: Aaa,
        search_concurrency: u32,
        search_rate: u32,
    ) -> Self {
        let permits = search_concurrency.max(1) as usize;
        // Burst 1: `Quota::with_period` defaults `max_burst` to 1, unlike
        // `Quota::per_second`, whose burst equals the rate.
        let period = Duration::from_secs(1) / search_rate.max(1);
        let quota = Quota::with_period(period).expect("nonzero replenish period");
        Self {
            ingestor,
            search,
            normalizer,
            aaa,
            search_concurrency: Semaphore::new(permits),
            search_rate: RateLimiter::direct(quota),
        }
    }
}
