//! Bearer-token auth middleware, wrapping `/api/db/update` and `DELETE /api/db`.
//!
//! Expects `Authorization: <scheme> <token>` with exactly two whitespace-
//! separated parts, matching the upstream's strict `strings.Split(header, " ")`
//! check, a header with zero or more than one space is rejected outright,
//! token contents aside.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;

use crate::state::AppState;

/// Extracts the token from a `<scheme> <token>` header. `None` for a
/// missing, empty, or malformed (!= 2 parts) header.
fn parse_bearer(header: &str) -> Option<&str> {
    if header.is_empty() {
        return None;
    }
    let parts: Vec<&str> = header.split(' ').collect();
    if parts.len() != 2 {
        return None;
    }
    Some(parts[1])
}

pub async fn require_admin_token(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<Response, (StatusCode, &'static str)> {
    let header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let Some(token) = parse_bearer(header) else {
        return Err((StatusCode::UNAUTHORIZED, "Unauthorized"));
    };

    if state.aaa.verify(token).is_err() {
        return Err((StatusCode::UNAUTHORIZED, "Unauthorized"));
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_header_has_no_token() {
        assert_eq!(parse_bearer(""), None);
    }

    #[test]
    fn single_part_header_has_no_token() {
        assert_eq!(parse_bearer("Token"), None);
    }

    #[test]
    fn three_part_header_has_no_token() {
        assert_eq!(parse_bearer("Token test test"), None);
    }

    #[test]
    fn two_part_header_yields_token() {
        assert_eq!(parse_bearer("Token abc123"), Some("abc123"));
    }
}
