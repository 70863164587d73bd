use geotracker::app_config::AppConfig;
use geotracker::server::{AppState, serve};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = Arc::new(AppConfig::load());
    info!("✅  Loaded configuration");

    let listener = TcpListener::bind((config.server().host(), config.server().port())).await?;
    info!("🌍 {} is up and running on {}", env!("CARGO_PKG_NAME"), listener.local_addr()?);

    let state = Arc::new(AppState::new(config));
    serve(listener, state).await?;

    Ok(())
}
