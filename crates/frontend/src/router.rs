use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::main_page))
        .route("/search", get(handlers::search))
        .route("/admin", get(handlers::admin_page))
        .route("/admin/login", post(handlers::admin_login))
        .route("/admin/dashboard", get(handlers::dashboard))
        .route("/admin/update", post(handlers::admin_update))
        .route("/admin/drop", post(handlers::admin_drop))
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
