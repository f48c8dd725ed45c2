// src/main.rs
use std::{net::SocketAddr, sync::Arc};

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pki_node_server::{
    config::Config,
    routes::{self, AppState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    let state = Arc::new(AppState::new(config.challenge_ttl_secs));
    let app = routes::router(state, &config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(challenge_ttl_secs = config.challenge_ttl_secs, "PKI server listening on {addr}");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
