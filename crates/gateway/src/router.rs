//! HTTP router construction.
//!
//! Assembles the Gateway's eight routes plus the admission middleware that
//! gates `/api/db/update`, `/api/search`, `/api/isearch`, and `DELETE /api/db`.

use std::sync::Arc;

use axum::middleware;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{db, login, ping, search};
use crate::middleware::{auth::require_admin_token, concurrency::cap_concurrency, rate::throttle};
use crate::state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    let update_route = post(db::update).route_layer(middleware::from_fn_with_state(
        state.clone(),
        require_admin_token,
    ));
    let drop_route = delete(db::drop).route_layer(middleware::from_fn_with_state(
        state.clone(),
        require_admin_token,
    ));
    let search_route = get(search::search).route_layer(middleware::from_fn_with_state(
        state.clone(),
        cap_concurrency,
    ));
    let isearch_route = get(search::isearch).route_layer(middleware::from_fn_with_state(
        state.clone(),
        throttle,
    ));

    Router::new()
        .route("/api/login", post(login::login))
        .route("/api/ping", get(ping::ping))
        .route("/api/search", search_route)
        .route("/api/isearch", isearch_route)
        .route("/api/db/update", update_route)
        .route("/api/db/stats", get(db::stats))
        .route("/api/db/status", get(db::status))
        .route("/api/db", drop_route)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
