//! search-worker: exposes `SearchSvc` over the internal RPC layer.
//!
//! Owns its own `Store` handle, a background `Index` refresher, and a
//! `NormalizerClient` to reach `words-worker`. Handles `Ping`, `Search`,
//! `IndexSearch`.

use std::sync::Arc;

use comics_core::config::{load_dotenv, SearchTuning, ServiceAddresses};
use comics_rpc::services::{IndexSearchResponse, PingResponse, SearchResponse};
use comics_rpc::{
    topics, Message, NormalizerClient, ReplyToken, RequestHandler, Transport, ZmqRequestServer,
};
use comics_search::{Index, SearchSvc};
use comics_store::Store;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    comics_core::logging::init();

    let addresses = ServiceAddresses::from_env();
    let tuning = SearchTuning::from_env();

    let store = Arc::new(Store::connect(&addresses.db_address, 5).await?);
    let index = Index::spawn(Arc::clone(&store), tuning.index_ttl).await;
    let normalizer = NormalizerClient::connect(&addresses.words_address).await?;
    let service = Arc::new(SearchSvc::new(store, normalizer, index));

    let transport = Transport::parse(&addresses.search_address)?;
    let server = Arc::new(ZmqRequestServer::bind(&transport).await?);

    info!(address = %addresses.search_address, "search-worker listening");

    loop {
        let (token, msg) = match server.recv_request().await {
            Ok(pair) => pair,
            Err(e) => {
                warn!(error = %e, "recv_request failed");
                continue;
            }
        };

        let service = Arc::clone(&service);
        let server = Arc::clone(&server);
        tokio::spawn(handle_request(server, service, token, msg));
    }
}

async fn handle_request(
    server: Arc<ZmqRequestServer>,
    service: Arc<SearchSvc>,
    token: ReplyToken,
    msg: Message,
) {
    let reply = match msg.topic.as_str() {
        topics::SEARCH_PING => {
            Message::with_correlation(topics::SEARCH_PING, &PingResponse, msg.correlation_id)
        }
        topics::SEARCH_SEARCH => {
            let req: comics_rpc::services::SearchRequest = match msg.decode() {
                Ok(r) => r,
                Err(e) => {
                    warn!(error = %e, "failed to decode Search request");
                    return;
                }
            };
            match service.search(req.limit, &req.phrase).await {
                Ok(comics) => Message::with_correlation(
                    topics::SEARCH_SEARCH,
                    &SearchResponse {
                        total: comics.len(),
                        comics,
                    },
                    msg.correlation_id,
                ),
                Err(e) => {
                    error!(error = %e, "search failed");
                    return;
                }
            }
        }
        topics::SEARCH_ISEARCH => {
            let req: comics_rpc::services::IndexSearchRequest = match msg.decode() {
                Ok(r) => r,
                Err(e) => {
                    warn!(error = %e, "failed to decode IndexSearch request");
                    return;
                }
            };
            match service.index_search(req.limit, &req.phrase).await {
                Ok(comics) => Message::with_correlation(
                    topics::SEARCH_ISEARCH,
                    &IndexSearchResponse {
                        total: comics.len(),
                        comics,
                    },
                    msg.correlation_id,
                ),
                Err(e) => {
                    error!(error = %e, "index search failed");
                    return;
                }
            }
        }
        other => {
            warn!(topic = %other, "unknown topic");
            return;
        }
    };

    match reply {
        Ok(reply) => {
            if let Err(e) = server.send_reply(token, reply).await {
                warn!(error = %e, "failed to send reply");
            }
        }
        Err(e) => warn!(error = %e, "failed to encode reply"),
    }
}
