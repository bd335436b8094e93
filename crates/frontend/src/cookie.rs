//! Minimal cookie handling for the single `admin_token` session cookie.
//! No `axum-extra` cookie jar here, one cookie, one name, plain header work.

use axum::http::{HeaderMap, HeaderValue};

const COOKIE_NAME: &str = "admin_token";

/// Reads the admin token from the request's `Cookie` header. Empty string
/// (not an error) if absent, matching the upstream's `getToken`.
pub fn read_token(headers: &HeaderMap) -> String {
    let Some(raw) = headers.get(axum::http::header::COOKIE).and_then(|v| v.to_str().ok()) else {
        return String::new();
    };

    for part in raw.split(';') {
        let part = part.trim();
        if let Some(value) = part.strip_prefix(&format!("{COOKIE_NAME}=")) {
            return value.to_string();
        }
    }
    String::new()
}

/// Builds the `Set-Cookie` header value for a freshly issued token.
/// Scoped to `/admin`, `HttpOnly`, `Secure`, matching the upstream exactly.
pub fn set_token_header(token: &str) -> HeaderValue {
    let raw = format!("{COOKIE_NAME}={token}; Path=/admin; HttpOnly; Secure");
    HeaderValue::from_str(&raw).expect("cookie header is valid ASCII")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_cookie_header_yields_empty_token() {
        let headers = HeaderMap::new();
        assert_eq!(read_token(&headers), "");
    }

    #[test]
    fn reads_token_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::COOKIE,
            HeaderValue::from_static("foo=bar; admin_token=abc123; baz=qux"),
        );
        assert_eq!(read_token(&headers), "abc123");
    }

    #[test]
    fn absent_admin_cookie_yields_empty_token() {
        let mut headers = HeaderMap::new();
        headers.insert(axum::http::header::COOKIE, HeaderValue::from_static("foo=bar"));
        assert_eq!(read_token(&headers), "");
    }
}
