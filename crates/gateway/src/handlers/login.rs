//! `POST /api/login`: exchanges admin credentials for a bearer token.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::error;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub name: String,
    pub password: String,
}

/// Returns the token as a bare `text/plain` body, matching the upstream , 
/// there's no JSON envelope to decode on the caller's side, just the token.
pub async fn login(State(state): State<Arc<AppState>>, body: Option<Json<LoginRequest>>) -> Response {
    let Some(Json(req)) = body else {
        return (StatusCode::BAD_REQUEST, "Bad request").into_response();
    };

    match state.aaa.login(&req.name, &req.password) {
        Ok(token) => ([("content-type", "text/plain")], token).into_response(),
        Err(e) => {
            error!(error = %e, "login failed");
            (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
        }
    }
}
