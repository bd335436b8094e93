//! gateway: the public-facing HTTP API. Authenticates admin operations,
//! applies admission control in front of search, and fans every request out
//! to the internal RPC services (Ingestor, SearchSvc, Normalizer).

use std::sync::Arc;

use comics_aaa::Aaa;
use comics_core::config::{load_dotenv, AuthConfig, SearchTuning, ServiceAddresses};
use comics_gateway::{build_router, AppState};
use comics_rpc::{IngestorClient, NormalizerClient, SearchClient};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    comics_core::logging::init();

    let addresses = ServiceAddresses::from_env();
    let tuning = SearchTuning::from_env();
    let auth = AuthConfig::from_env().map_err(anyhow::Error::msg)?;

    let ingestor = IngestorClient::connect(&addresses.update_address).await?;
    let search = SearchClient::connect(&addresses.search_address).await?;
    let normalizer = NormalizerClient::connect(&addresses.words_address).await?;
    let aaa = Aaa::new(auth.admin_user, auth.admin_password, auth.token_ttl);

    let state = Arc::new(AppState::new(
        ingestor,
        search,
        normalizer,
        aaa,
        tuning.search_concurrency,
        tuning.search_rate,
    ));

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addresses.api_address).await?;
    info!(address = %addresses.api_address, "gateway listening");

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
        info!("shutting down gateway");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
