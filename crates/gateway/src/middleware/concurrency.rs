//! Non-blocking admission cap in front of `/api/search`.
//!
//! Mirrors the upstream's buffered-channel trick: a full semaphore means
//! "reject now" (503), never "queue and wait". A slow caller must not be
//! able to starve out fast ones behind it.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;

use crate::state::AppState;

pub async fn cap_concurrency(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<Response, (StatusCode, &'static str)> {
    match state.search_concurrency.try_acquire() {
        Ok(_permit) => Ok(next.run(req).await),
        Err(_) => Err((StatusCode::SERVICE_UNAVAILABLE, "Service unavailable")),
    }
}
