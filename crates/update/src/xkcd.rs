//! HTTP client for the upstream comics feed.
//!
//! Mirrors the original adapter: `GET {base}/{id}/info.0.json` for a single
//! entry, `GET {base}/info.0.json` for the latest entry (used as `last_id`).

use std::time::Duration;

use comics_core::{CoreError, UpstreamEntry};
use tracing::error;

/// Distinguishes the upstream's deliberate 404 on [`comics_core::SENTINEL_COMIC_ID`]
/// from any other fetch failure, so the caller can route it to the sentinel path.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("not found")]
    NotFound,
    #[error("upstream error: {0}")]
    Other(#[from] CoreError),
}

pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CoreError> {
        let base_url = base_url.into();
        if base_url.is_empty() {
            return Err(CoreError::Upstream("empty base url specified".into()));
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Upstream(e.to_string()))?;
        Ok(Self { http, base_url })
    }

    /// Fetch a single entry by id. Returns [`FetchError::NotFound`] for a 404
    /// response on `id == 404`; any other non-200 or transport failure is
    /// [`FetchError::Other`].
    pub async fn get(&self, id: u32) -> Result<UpstreamEntry, FetchError> {
        let url = format!("{}/{id}/info.0.json", self.base_url);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| CoreError::Upstream(e.to_string()))?;

        if !resp.status().is_success() {
            if id == comics_core::SENTINEL_COMIC_ID {
                return Err(FetchError::NotFound);
            }
            return Err(FetchError::Other(CoreError::Upstream(format!(
                "unexpected status {} for id {id}",
                resp.status()
            ))));
        }

        resp.json::<UpstreamEntry>()
            .await
            .map_err(|e| FetchError::Other(CoreError::Upstream(e.to_string())))
    }

    /// The upstream's current last-published id.
    pub async fn last_id(&self) -> Result<u32, CoreError> {
        let url = format!("{}/info.0.json", self.base_url);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| CoreError::Upstream(e.to_string()))?;

        if !resp.status().is_success() {
            error!(status = %resp.status(), "unexpected status fetching last id");
            return Err(CoreError::Upstream(format!(
                "unexpected status {}",
                resp.status()
            )));
        }

        let entry: UpstreamEntry = resp
            .json()
            .await
            .map_err(|e| CoreError::Upstream(e.to_string()))?;
        Ok(entry.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_base_url() {
        assert!(UpstreamClient::new("", Duration::from_secs(1)).is_err());
    }
}
