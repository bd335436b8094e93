//! words-worker: exposes the Normalizer over the internal RPC layer.
//!
//! Handles `Ping` and `Norm`. Stateless: every request is independent,
//! so there's no shared mutable state to guard.

use comics_core::config::{load_dotenv, ServiceAddresses};
use comics_rpc::services::{NormRequest, NormResponse, PingResponse};
use comics_rpc::{topics, Message, RequestHandler, Transport, ZmqRequestServer};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    comics_core::logging::init();

    let addresses = ServiceAddresses::from_env();
    let transport = Transport::parse(&addresses.words_address)?;
    let server = ZmqRequestServer::bind(&transport).await?;

    info!(address = %addresses.words_address, "words-worker listening");

    loop {
        let (token, msg) = match server.recv_request().await {
            Ok(pair) => pair,
            Err(e) => {
                warn!(error = %e, "recv_request failed");
                continue;
            }
        };

        let reply = match msg.topic.as_str() {
            topics::WORDS_PING => {
                Message::with_correlation(topics::WORDS_PING, &PingResponse, msg.correlation_id)
            }
            topics::WORDS_NORM => {
                let req: NormRequest = match msg.decode() {
                    Ok(r) => r,
                    Err(e) => {
                        warn!(error = %e, "failed to decode Norm request");
                        continue;
                    }
                };
                let keywords = comics_words::normalize(&req.phrase);
                Message::with_correlation(
                    topics::WORDS_NORM,
                    &NormResponse { keywords },
                    msg.correlation_id,
                )
            }
            other => {
                warn!(topic = %other, "unknown topic");
                continue;
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
}
