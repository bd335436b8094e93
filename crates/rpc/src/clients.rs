//! Typed request/reply clients for the three internal RPC services.
//!
//! Thin wrappers over [`ZmqRequestClient`]: encode a typed request, dial
//! the topic, decode the typed reply. Each call carries its own timeout;
//! there is no cancellation token threaded through (tokio's own task
//! cancellation covers the caller side).

use std::time::Duration;

use crate::error::RpcError;
use crate::message::Message;
use crate::messages::{services::*, topics};
use crate::reqrep::ZmqRequestClient;
use crate::traits::RequestSender;
use crate::transport::Transport;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

async fn call<Req, Resp>(
    client: &ZmqRequestClient,
    topic: &str,
    req: &Req,
    timeout: Duration,
) -> Result<Resp, RpcError>
where
    Req: serde::Serialize,
    Resp: for<'de> serde::Deserialize<'de>,
{
    let msg = Message::new(topic, req).map_err(RpcError::Serialization)?;
    let reply = client.request(msg, timeout).await?;
    reply.decode().map_err(RpcError::Deserialization)
}

/// Client for the Normalizer (`words-worker`).
pub struct NormalizerClient {
    client: ZmqRequestClient,
}

impl NormalizerClient {
    pub async fn connect(address: &str) -> Result<Self, RpcError> {
        let transport = Transport::parse(address)?;
        Ok(Self {
            client: ZmqRequestClient::connect(&transport).await?,
        })
    }

    pub async fn ping(&self) -> Result<(), RpcError> {
        call::<_, PingResponse>(&self.client, topics::WORDS_PING, &PingRequest, DEFAULT_TIMEOUT)
            .await?;
        Ok(())
    }

    pub async fn norm(&self, phrase: &str) -> Result<Vec<String>, RpcError> {
        let resp: NormResponse = call(
            &self.client,
            topics::WORDS_NORM,
            &NormRequest {
                phrase: phrase.to_string(),
            },
            DEFAULT_TIMEOUT,
        )
        .await?;
        Ok(resp.keywords)
    }
}

/// Client for the Ingestor (`update-worker`).
pub struct IngestorClient {
    client: ZmqRequestClient,
}

impl IngestorClient {
    pub async fn connect(address: &str) -> Result<Self, RpcError> {
        let transport = Transport::parse(address)?;
        Ok(Self {
            client: ZmqRequestClient::connect(&transport).await?,
        })
    }

    pub async fn ping(&self) -> Result<(), RpcError> {
        call::<_, PingResponse>(&self.client, topics::UPDATE_PING, &PingRequest, DEFAULT_TIMEOUT)
            .await?;
        Ok(())
    }

    /// Returns `true` if the Ingestor was already mid-crawl (single-flight
    /// lock held) rather than an error.
    pub async fn update(&self) -> Result<bool, RpcError> {
        let resp: UpdateResponse = call(
            &self.client,
            topics::UPDATE_UPDATE,
            &UpdateRequest,
            DEFAULT_TIMEOUT,
        )
        .await?;
        Ok(resp.already_running)
    }

    pub async fn stats(&self) -> Result<comics_core::IngestStats, RpcError> {
        let resp: StatsResponse = call(
            &self.client,
            topics::UPDATE_STATS,
            &StatsRequest,
            DEFAULT_TIMEOUT,
        )
        .await?;
        Ok(resp.stats)
    }

    pub async fn status(&self) -> Result<comics_core::IngestStatus, RpcError> {
        let resp: StatusResponse = call(
            &self.client,
            topics::UPDATE_STATUS,
            &StatusRequest,
            DEFAULT_TIMEOUT,
        )
        .await?;
        Ok(resp.status)
    }

    pub async fn drop(&self) -> Result<(), RpcError> {
        call::<_, DropResponse>(&self.client, topics::UPDATE_DROP, &DropRequest, DEFAULT_TIMEOUT)
            .await?;
        Ok(())
    }
}

/// Client for SearchSvc (`search-worker`).
pub struct SearchClient {
    client: ZmqRequestClient,
}

impl SearchClient {
    pub async fn connect(address: &str) -> Result<Self, RpcError> {
        let transport = Transport::parse(address)?;
        Ok(Self {
            client: ZmqRequestClient::connect(&transport).await?,
        })
    }

    pub async fn ping(&self) -> Result<(), RpcError> {
        call::<_, PingResponse>(&self.client, topics::SEARCH_PING, &PingRequest, DEFAULT_TIMEOUT)
            .await?;
        Ok(())
    }

    pub async fn search(
        &self,
        phrase: &str,
        limit: usize,
    ) -> Result<(Vec<comics_core::Comic>, usize), RpcError> {
        let resp: SearchResponse = call(
            &self.client,
            topics::SEARCH_SEARCH,
            &SearchRequest {
                phrase: phrase.to_string(),
                limit,
            },
            DEFAULT_TIMEOUT,
        )
        .await?;
        Ok((resp.comics, resp.total))
    }

    pub async fn index_search(
        &self,
        phrase: &str,
        limit: usize,
    ) -> Result<(Vec<comics_core::Comic>, usize), RpcError> {
        let resp: IndexSearchResponse = call(
            &self.client,
            topics::SEARCH_ISEARCH,
            &IndexSearchRequest {
                phrase: phrase.to_string(),
                limit,
            },
            DEFAULT_TIMEOUT,
        )
        .await?;
        Ok((resp.comics, resp.total))
    }
}
