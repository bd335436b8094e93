//! `/api/db/*`: ingestion control surface. `update` and the `DELETE /api/db`
//! drop are wrapped in the admin-auth middleware at the router level; `stats`
//! and `status` are unauthenticated, matching the upstream.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use comics_core::{IngestStats, IngestStatus};
use serde::Serialize;
use tracing::error;

use crate::state::AppState;

pub async fn update(State(state): State<Arc<AppState>>) -> Response {
    match state.ingestor.update().await {
        Ok(true) => (StatusCode::ACCEPTED, "update is already exists").into_response(),
        Ok(false) => StatusCode::OK.into_response(),
        Err(e) => {
            error!(error = %e, "update failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to update").into_response()
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub words_total: i64,
    pub words_unique: i64,
    pub comics_fetched: i64,
    pub comics_total: i64,
}

impl From<IngestStats> for StatsResponse {
    fn from(s: IngestStats) -> Self {
        Self {
            words_total: s.words_total,
            words_unique: s.words_unique,
            comics_fetched: s.comics_fetched,
            comics_total: s.comics_total,
        }
    }
}

pub async fn stats(State(state): State<Arc<AppState>>) -> Response {
    match state.ingestor.stats().await {
        Ok(stats) => Json(StatsResponse::from(stats)).into_response(),
        Err(e) => {
            error!(error = %e, "failed to get stats");
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to get stats").into_response()
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: IngestStatus,
}

pub async fn status(State(state): State<Arc<AppState>>) -> Response {
    match state.ingestor.status().await {
        Ok(status) => Json(StatusResponse { status }).into_response(),
        Err(e) => {
            error!(error = %e, "failed to get status");
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to get status").into_response()
        }
    }
}

pub async fn drop(State(state): State<Arc<AppState>>) -> Response {
    match state.ingestor.drop().await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => {
            error!(error = %e, "failed to drop");
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to drop").into_response()
        }
    }
}
