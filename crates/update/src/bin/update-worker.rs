//! update-worker: exposes the Ingestor over the internal RPC layer.
//!
//! Holds its own `Store` handle, an `UpstreamClient` for the comics feed, and
//! a `NormalizerClient` to reach `words-worker`. Handles `Ping`, `Update`,
//! `Stats`, `Status`, `Drop`.
//!
//! Each request is handled on its own spawned task so a long-running
//! `Update` crawl never blocks `Status`/`Stats` polling, single-flight
//! enforcement lives in `Ingestor::update` itself, not in this loop.

use std::sync::Arc;

use comics_core::config::{load_dotenv, IngestTuning, ServiceAddresses};
use comics_rpc::services::{
    DropResponse, PingResponse, StatsResponse, StatusResponse, UpdateResponse,
};
use comics_rpc::{
    topics, Message, NormalizerClient, ReplyToken, RequestHandler, Transport, ZmqRequestServer,
};
use comics_store::Store;
use comics_update::{Ingestor, UpstreamClient};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    comics_core::logging::init();

    let addresses = ServiceAddresses::from_env();
    let tuning = IngestTuning::from_env();

    let store = Arc::new(Store::connect(&addresses.db_address, 5).await?);
    let upstream = UpstreamClient::new(tuning.xkcd_base_url.clone(), tuning.xkcd_timeout)?;
    let normalizer = NormalizerClient::connect(&addresses.words_address).await?;
    let ingestor = Arc::new(Ingestor::new(
        store,
        upstream,
        normalizer,
        tuning.xkcd_concurrency,
    )?);

    let transport = Transport::parse(&addresses.update_address)?;
    let server = Arc::new(ZmqRequestServer::bind(&transport).await?);

    info!(address = %addresses.update_address, "update-worker listening");

    loop {
        let (token, msg) = match server.recv_request().await {
            Ok(pair) => pair,
            Err(e) => {
                warn!(error = %e, "recv_request failed");
                continue;
            }
        };

        let ingestor = Arc::clone(&ingestor);
        let server = Arc::clone(&server);
        tokio::spawn(handle_request(server, ingestor, token, msg));
    }
}

async fn handle_request(
    server: Arc<ZmqRequestServer>,
    ingestor: Arc<Ingestor>,
    token: ReplyToken,
    msg: Message,
) {
    let reply = match msg.topic.as_str() {
        topics::UPDATE_PING => {
            Message::with_correlation(topics::UPDATE_PING, &PingResponse, msg.correlation_id)
        }
        topics::UPDATE_UPDATE => {
            let already_running = match ingestor.update().await {
                Ok(()) => false,
                Err(comics_core::CoreError::AlreadyRunning) => true,
                Err(e) => {
                    error!(error = %e, "update failed");
                    false
                }
            };
            Message::with_correlation(
                topics::UPDATE_UPDATE,
                &UpdateResponse { already_running },
                msg.correlation_id,
            )
        }
        topics::UPDATE_STATS => match ingestor.stats().await {
            Ok(stats) => Message::with_correlation(
                topics::UPDATE_STATS,
                &StatsResponse { stats },
                msg.correlation_id,
            ),
            Err(e) => {
                error!(error = %e, "failed to get stats");
                return;
            }
        },
        topics::UPDATE_STATUS => {
            let status = ingestor.status().await;
            Message::with_correlation(
                topics::UPDATE_STATUS,
                &StatusResponse { status },
                msg.correlation_id,
            )
        }
        topics::UPDATE_DROP => match ingestor.drop().await {
            Ok(()) => {
                Message::with_correlation(topics::UPDATE_DROP, &DropResponse, msg.correlation_id)
            }
            Err(e) => {
                error!(error = %e, "failed to drop");
                return;
            }
        },
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
