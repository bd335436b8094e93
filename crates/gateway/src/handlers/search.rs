//! `GET /api/search` and `GET /api/isearch`.
//!
//! Identical query contract (`phrase`, optional `limit`, default 10);
//! `search` goes straight to Postgres through SearchSvc, `isearch` answers
//! from the in-memory keyword index. Response shapes match exactly: a
//! `comics` array of `{id, url}` plus a `total` count.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use comics_core::Comic;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub phrase: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ComicOut {
    pub id: u32,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponseBody {
    pub comics: Vec<ComicOut>,
    pub total: usize,
}

impl From<Comic> for ComicOut {
    fn from(c: Comic) -> Self {
        Self {
            id: c.id,
            url: c.image_url,
        }
    }
}

/// Parses `phrase`/`limit` per the upstream's contract. `Err` carries the
/// plain-text body to send back; `None` limit defaults to 10.
fn parse_query(query: &SearchQuery) -> Result<(&str, usize), &'static str> {
    let phrase = query.phrase.as_deref().unwrap_or("");
    if phrase.is_empty() {
        return Err("Bad arguments");
    }

    let limit = match query.limit.as_deref() {
        None | Some("") => 10,
        Some(raw) => raw.parse::<usize>().map_err(|_| "Bad arguments")?,
    };

    Ok((phrase, limit))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(phrase: Option<&str>, limit: Option<&str>) -> SearchQuery {
        SearchQuery {
            phrase: phrase.map(String::from),
            limit: limit.map(String::from),
        }
    }

    #[test]
    fn empty_phrase_is_rejected() {
        assert_eq!(parse_query(&q(None, None)), Err("Bad arguments"));
        assert_eq!(parse_query(&q(Some(""), None)), Err("Bad arguments"));
    }

    #[test]
    fn missing_limit_defaults_to_ten() {
        assert_eq!(parse_query(&q(Some("cat"), None)), Ok(("cat", 10)));
        assert_eq!(parse_query(&q(Some("cat"), Some(""))), Ok(("cat", 10)));
    }

    #[test]
    fn non_numeric_limit_is_rejected() {
        assert_eq!(parse_query(&q(Some("cat"), Some("abc"))), Err("Bad arguments"));
    }

    #[test]
    fn explicit_limit_is_used() {
        assert_eq!(parse_query(&q(Some("cat"), Some("5"))), Ok(("cat", 5)));
    }
}

pub async fn search(State(state): State<Arc<AppState>>, Query(query): Query<SearchQuery>) -> Response {
    let (phrase, limit) = match parse_query(&query) {
        Ok(pair) => pair,
        Err(msg) => return (StatusCode::BAD_REQUEST, msg).into_response(),
    };

    match state.search.search(phrase, limit).await {
        Ok((comics, total)) => Json(SearchResponseBody {
            comics: comics.into_iter().map(ComicOut::from).collect(),
            total,
        })
        .into_response(),
        Err(e) => {
            error!(error = %e, "search failed");
            (StatusCode::BAD_REQUEST, "Bad arguments").into_response()
        }
    }
}

pub async fn isearch(State(state): State<Arc<AppState>>, Query(query): Query<SearchQuery>) -> Response {
    let (phrase, limit) = match parse_query(&query) {
        Ok(pair) => pair,
        Err(msg) => return (StatusCode::BAD_REQUEST, msg).into_response(),
    };

    match state.search.index_search(phrase, limit).await {
        Ok((comics, total)) => Json(SearchResponseBody {
            comics: comics.into_iter().map(ComicOut::from).collect(),
            total,
        })
        .into_response(),
        Err(e) => {
            error!(error = %e, "index search failed");
            (StatusCode::BAD_REQUEST, "Bad arguments").into_response()
        }
    }
}
