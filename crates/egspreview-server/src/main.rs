mod api;
mod middleware;
mod render;

use std::sync::Arc;

use egspreview_store::{build_http_client, EgsCatalog, GraphqlClient, RelayClient};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = egspreview_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(?config, "configuration loaded");

    // One pool for every outbound call; clones share it.
    let http = build_http_client(&config.user_agent, config.request_timeout_secs)?;
    let relay = RelayClient::new(http.clone(), &config.relay_url, &config.relay_session)?;
    relay.create_session().await?;

    let graphql = GraphqlClient::new(http, &config.graphql_url)?;
    let catalog = Arc::new(EgsCatalog::new(
        graphql,
        relay,
        &config.product_api_url,
        &config.product_country,
    )?);

    let app = build_app(AppState::new(Arc::clone(&catalog)));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        bind_addr = %config.bind_addr,
        env = %config.env,
        relay_session = %config.relay_session,
        "egspreview server listening"
    );

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    let destroyed = catalog.relay().destroy_session().await;
    drop(catalog);

    served?;
    destroyed?;
    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
