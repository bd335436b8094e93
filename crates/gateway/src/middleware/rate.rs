//! Token-bucket throttle in front of `/api/isearch`.
//!
//! Unlike `concurrency`, a throttled request waits for its turn rather than
//! being rejected. If the caller disconnects while waiting, `next.run` is
//! never reached and the sleeping task is simply dropped, nothing to clean
//! up explicitly.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::response::Response;
use governor::clock::{Clock, DefaultClock};
use axum::middleware::Next;

use crate::state::AppState;

pub async fn throttle(State(state): State<Arc<AppState>>, req: Request, next: Next) -> Response {
    let clock = DefaultClock::default();
    loop {
        match state.search_rate.check() {
            Ok(_) => break,
            Err(not_until) => {
                let wait = not_until.wait_time_from(clock.now());
                tokio::time::sleep(wait).await;
            }
        }
    }
    next.run(req).await
}
