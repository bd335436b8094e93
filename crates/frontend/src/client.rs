//! Thin HTTP client for the Gateway's public API. FrontendUI never talks to
//! the internal RPC services directly, every call here is a plain HTTP
//! request to the Gateway, mirroring the upstream `frontend`'s own client.

use comics_core::{IngestStats, IngestStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("gateway returned {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Comic {
    pub id: u32,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub comics: Vec<Comic>,
    #[allow(dead_code)]
    pub total: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Stats {
    pub words_total: i64,
    pub words_unique: i64,
    pub comics_fetched: i64,
    pub comics_total: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Status {
    pub status: IngestStatus,
}

#[derive(Debug, Serialize)]
struct LoginBody<'a> {
    name: &'a str,
    password: &'a str,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(api_address: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: format!("http://{api_address}"),
        }
    }

    pub async fn search(&self, phrase: &str) -> Result<SearchResponse, ClientError> {
        let url = format!(
            "{}/api/search?phrase={}",
            self.base_url,
            urlencoding::encode(phrase)
        );
        let resp = self.http.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(ClientError::Status(resp.status()));
        }
        Ok(resp.json().await?)
    }

    pub async fn login(&self, name: &str, password: &str) -> Result<String, ClientError> {
        let resp = self
            .http
            .post(format!("{}/api/login", self.base_url))
            .json(&LoginBody { name, password })
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(ClientError::Status(resp.status()));
        }
        Ok(resp.text().await?)
    }

    pub async fn update(&self, token: &str) -> Result<(), ClientError> {
        let resp = self
            .http
            .post(format!("{}/api/db/update", self.base_url))
            .header("Authorization", format!("Token {token}"))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(ClientError::Status(resp.status()));
        }
        Ok(())
    }

    pub async fn drop(&self, token: &str) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(format!("{}/api/db", self.base_url))
            .header("Authorization", format!("Token {token}"))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(ClientError::Status(resp.status()));
        }
        Ok(())
    }

    pub async fn status(&self) -> Result<Status, ClientError> {
        let resp = self
            .http
            .get(format!("{}/api/db/status", self.base_url))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(ClientError::Status(resp.status()));
        }
        Ok(resp.json().await?)
    }

    pub async fn stats(&self) -> Result<Stats, ClientError> {
        let resp = self
            .http
            .get(format!("{}/api/db/stats", self.base_url))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(ClientError::Status(resp.status()));
        }
        Ok(resp.json().await?)
    }
}
