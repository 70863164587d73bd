use crate::app_config::AppConfig;
use crate::feed::{JitterSource, ThreadRngJitter, tracks_geojson};
use crate::weather::weather_forecast;
use axum::Router;
use axum::http::HeaderValue;
use axum::http::header::InvalidHeaderValue;
use axum::routing::get;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Shared state backing the HTTP handlers. Each request's track and feature
/// collection are exclusively owned by that request; the jitter source is the
/// only shared piece and draws without locking.
pub struct AppState {
    config: Arc<AppConfig>,
    jitter: Box<dyn JitterSource>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>) -> Self {
        AppState {
            config,
            jitter: Box::new(ThreadRngJitter),
        }
    }

    #[cfg(test)]
    pub fn with_jitter(config: Arc<AppConfig>, jitter: Box<dyn JitterSource>) -> Self {
        AppState { config, jitter }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn jitter(&self) -> &dyn JitterSource {
        self.jitter.as_ref()
    }
}

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("invalid frontend origin: {0}")]
    InvalidFrontendOrigin(#[from] InvalidHeaderValue),
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn router(state: Arc<AppState>) -> Result<Router, ServerError> {
    let origin = state.config().server().frontend_origin().parse::<HeaderValue>()?;
    let cors = CorsLayer::new().allow_origin(origin).allow_methods(Any).allow_headers(Any);

    Ok(Router::new()
        .route("/tracks.geojson", get(tracks_geojson))
        .route("/weatherforecast", get(weather_forecast))
        .layer(cors)
        .with_state(state))
}

pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> Result<(), ServerError> {
    let app = router(state)?;
    info!("🌍 Serving the track feed on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
