//! Route handlers: search box, results, admin login, and the admin dashboard.
//!
//! Thin by design, each handler fetches from the Gateway and renders a
//! template; there's no business logic here beyond what the upstream
//! `frontend` service itself does.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::cookie::{read_token, set_token_header};
use crate::state::AppState;
use crate::templates::render;

pub async fn main_page(State(state): State<Arc<AppState>>) -> Response {
    match render(&state.template_path, "index.html", ()) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(error = %e, "template error");
            (StatusCode::INTERNAL_SERVER_ERROR, "template error").into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
struct ComicView {
    id: u32,
    image_url: String,
}

#[derive(Debug, Serialize)]
struct SearchCtx {
    query: String,
    comics: Vec<ComicView>,
}

pub async fn search(State(state): State<Arc<AppState>>, Query(q): Query<SearchQuery>) -> Response {
    let query = q.query.unwrap_or_default();
    if query.is_empty() {
        return Redirect::to("/").into_response();
    }

    let result = match state.client.search(&query).await {
        Ok(r) => r,
        Err(e) => {
            error!(error = %e, "failed to search");
            return (StatusCode::INTERNAL_SERVER_ERROR, "search error").into_response();
        }
    };

    let ctx = SearchCtx {
        query,
        comics: result
            .comics
            .into_iter()
            .map(|c| ComicView {
                id: c.id,
                image_url: c.url,
            })
            .collect(),
    };

    match render(&state.template_path, "results.html", ctx) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(error = %e, "template error");
            (StatusCode::INTERNAL_SERVER_ERROR, "template error").into_response()
        }
    }
}

pub async fn admin_page(State(state): State<Arc<AppState>>) -> Response {
    match render(&state.template_path, "login.html", ()) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(error = %e, "template error");
            (StatusCode::INTERNAL_SERVER_ERROR, "template error").into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
struct LoginErrorCtx {
    error: &'static str,
}

pub async fn admin_login(
    State(state): State<Arc<AppState>>,
    axum::extract::Form(form): axum::extract::Form<LoginForm>,
) -> Response {
    match state.client.login(&form.username, &form.password).await {
        Ok(token) => {
            let mut resp = Redirect::to("/admin/dashboard").into_response();
            resp.headers_mut()
                .insert(axum::http::header::SET_COOKIE, set_token_header(&token));
            resp
        }
        Err(e) => {
            error!(error = %e, "login failed");
            match render(
                &state.template_path,
                "login.html",
                LoginErrorCtx {
                    error: "Invalid credentials",
                },
            ) {
                Ok(html) => Html(html).into_response(),
                Err(e) => {
                    error!(error = %e, "template error");
                    (StatusCode::INTERNAL_SERVER_ERROR, "template error").into_response()
                }
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct DashboardCtx {
    stats: crate::client::Stats,
    status: crate::client::Status,
}

pub async fn dashboard(State(state): State<Arc<AppState>>) -> Response {
    let stats = match state.client.stats().await {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "failed to get stats");
            return (StatusCode::INTERNAL_SERVER_ERROR, "failed to load stats").into_response();
        }
    };

    let status = match state.client.status().await {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "failed to get status");
            return (StatusCode::INTERNAL_SERVER_ERROR, "failed to load status").into_response();
        }
    };

    match render(&state.template_path, "dashboard.html", DashboardCtx { stats, status }) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(error = %e, "template error");
            (StatusCode::INTERNAL_SERVER_ERROR, "template error").into_response()
        }
    }
}

pub async fn admin_update(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let token = read_token(&headers);
    if token.is_empty() {
        return (StatusCode::UNAUTHORIZED, Redirect::to("/admin")).into_response();
    }

    if let Err(e) = state.client.update(&token).await {
        error!(error = %e, "failed to update");
        return (StatusCode::UNAUTHORIZED, Redirect::to("/admin")).into_response();
    }

    Redirect::to("/admin/dashboard").into_response()
}

pub async fn admin_drop(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let token = read_token(&headers);
    if token.is_empty() {
        return (StatusCode::UNAUTHORIZED, Redirect::to("/admin")).into_response();
    }

    if let Err(e) = state.client.drop(&token).await {
        error!(error = %e, "failed to drop");
        return (StatusCode::UNAUTHORIZED, Redirect::to("/admin")).into_response();
    }

    Redirect::to("/admin/dashboard").into_response()
}
