//! `GET /api/ping`: liveness probe fanned out to the three internal services.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub replies: HashMap<String, &'static str>,
}

pub async fn ping(State(state): State<Arc<AppState>>) -> Json<PingResponse> {
    let (words, update, search) = tokio::join!(
        state.normalizer.ping(),
        state.ingestor.ping(),
        state.search.ping(),
    );

    let mut replies = HashMap::with_capacity(3);
    for (name, result) in [("words", words), ("update", update), ("search", search)] {
        match result {
            Ok(()) => {
                replies.insert(name.to_string(), "ok");
            }
            Err(e) => {
                error!(service = name, error = %e, "service unavailable");
                replies.insert(name.to_string(), "unavailable");
            }
        }
    }

    Json(PingResponse { replies })
}
