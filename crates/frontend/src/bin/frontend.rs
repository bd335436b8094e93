//! frontend: server-rendered admin + search UI. Calls the Gateway's HTTP
//! API exclusively; never reaches into the internal RPC services.

use std::sync::Arc;

use comics_core::config::{load_dotenv, FrontendConfig};
use comics_frontend::client::ApiClient;
use comics_frontend::{build_router, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    comics_core::logging::init();

    let config = FrontendConfig::from_env();

    let state = Arc::new(AppState {
        client: ApiClient::new(config.api_address.clone()),
        template_path: config.template_path.clone(),
    });

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.frontend_address).await?;
    info!(address = %config.frontend_address, "frontend listening");

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
        info!("shutting down frontend");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
