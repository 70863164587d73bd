use crate::app_config::MapConfig;
use crate::map_sync::renderer::{LayerFilter, LayerId, LayerSpec, MapRenderer, RendererError, SymbolStyle};
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Uninitialized,
    Loading,
    Ready,
    Refreshing,
    Destroyed,
}

#[derive(Debug, Clone, Copy)]
struct Layers {
    track: LayerId,
    current: LayerId,
}

#[derive(Error, Debug)]
pub enum MapSyncError {
    #[error("the map layers are not ready")]
    NotReady,
    #[error(transparent)]
    Renderer(#[from] RendererError),
}

/// Bridges the track feed to a map renderer and keeps the path layer and the
/// current-position layer consistent under initial load and manual refresh.
///
/// There is no readiness timeout: a layer that never signals readiness leaves
/// the client in `Loading` forever.
pub struct MapSyncClient {
    renderer: Arc<dyn MapRenderer>,
    feed_url: String,
    extent_expansion: f64,
    state: RwLock<SyncState>,
    layers: RwLock<Option<Layers>>,
    last_token: Mutex<i64>,
}

impl MapSyncClient {
    pub fn new(renderer: Arc<dyn MapRenderer>, config: &MapConfig) -> Self {
        MapSyncClient {
            renderer,
            feed_url: config.feed_url().to_string(),
            extent_expansion: config.extent_expansion(),
            state: RwLock::new(SyncState::Uninitialized),
            layers: RwLock::new(None),
            last_token: Mutex::new(0),
        }
    }

    pub async fn state(&self) -> SyncState {
        *self.state.read().await
    }

    /// Creates both feed layers, awaits their joint readiness and fits the
    /// view to the track extent.
    ///
    /// A renderer without a map runtime turns the whole mount into a no-op so
    /// the hosting page keeps working without a map. An unavailable or empty
    /// extent is non-fatal: the client still transitions to ready.
    #[instrument(skip_all)]
    pub async fn mount(&self) -> Result<(), MapSyncError> {
        if !self.renderer.is_available() {
            info!("🗺️ Map runtime unavailable, mounting skipped");
            return Ok(());
        }

        {
            let mut state = self.state.write().await;
            if *state != SyncState::Uninitialized {
                return Ok(());
            }
            *state = SyncState::Loading;
        }

        debug!("🗺️ Creating map layers...");
        let track = self.renderer.create_layer(track_layer_spec(&self.feed_url)).await?;
        let current = self.renderer.create_layer(current_layer_spec(&self.feed_url)).await?;
        *self.layers.write().await = Some(Layers { track, current });
        info!("🗺️ Creating map layers... OK");

        // The extent must not be fitted before both layers are ready.
        tokio::try_join!(self.renderer.await_ready(track), self.renderer.await_ready(current))?;

        if self.is_destroyed().await {
            debug!("View destroyed while awaiting layer readiness, skipping the extent fit");
            return Ok(());
        }

        match self.renderer.query_extent(track).await {
            Ok(Some(extent)) => {
                if self.is_destroyed().await {
                    debug!("View destroyed while querying the extent, skipping the extent fit");
                    return Ok(());
                }
                if let Err(e) = self.renderer.fit_view(extent.expand(self.extent_expansion)).await {
                    warn!("⚠️ Could not fit the view to the track extent: {}", e);
                }
            }
            Ok(None) => debug!("Track layer reported an empty extent, keeping the current view"),
            Err(e) => warn!("⚠️ Could not query the track extent: {}", e),
        }

        self.transition_unless_destroyed(SyncState::Ready).await;
        info!("🗺️ Map layers are ready");
        Ok(())
    }

    /// Reloads both layers against a single fresh cache-bust token.
    ///
    /// One token per refresh keeps the path and the marker on the same
    /// refresh epoch, even though the server draws each physical request
    /// independently.
    #[instrument(skip_all)]
    pub async fn refresh(&self) -> Result<(), MapSyncError> {
        {
            let mut state = self.state.write().await;
            if *state != SyncState::Ready {
                return Err(MapSyncError::NotReady);
            }
            *state = SyncState::Refreshing;
        }

        let Some(layers) = *self.layers.read().await else {
            return Err(MapSyncError::NotReady);
        };

        let token = self.next_token().await;
        let url = format!("{}?t={}", self.feed_url, token);
        debug!(token, "🔄 Refreshing track layers...");

        let result = self.reload(layers, &url).await;
        self.transition_unless_destroyed(SyncState::Ready).await;
        result?;

        info!(token, "🔄 Refreshing track layers... OK");
        Ok(())
    }

    /// Marks the hosting view as destroyed. Pending readiness or extent-fit
    /// completions become no-ops from this point on.
    pub async fn destroy(&self) {
        *self.state.write().await = SyncState::Destroyed;
        debug!("🗺️ Map view destroyed");
    }

    async fn reload(&self, layers: Layers, url: &str) -> Result<(), MapSyncError> {
        for layer in [layers.track, layers.current] {
            self.renderer.set_layer_url(layer, url.to_string()).await?;
            self.renderer.refresh_layer(layer).await?;
        }
        Ok(())
    }

    async fn is_destroyed(&self) -> bool {
        *self.state.read().await == SyncState::Destroyed
    }

    async fn transition_unless_destroyed(&self, next: SyncState) {
        let mut state = self.state.write().await;
        if *state != SyncState::Destroyed {
            *state = next;
        }
    }

    /// Strictly increasing, so two refreshes in the same millisecond still
    /// get distinct tokens.
    async fn next_token(&self) -> i64 {
        let mut last = self.last_token.lock().await;
        let token = Utc::now().timestamp_millis().max(*last + 1);
        *last = token;
        token
    }
}

fn track_layer_spec(feed_url: &str) -> LayerSpec {
    LayerSpec {
        title: "Asset track".to_string(),
        url: feed_url.to_string(),
        filter: LayerFilter::Track,
        symbol: SymbolStyle::Line {
            color: [0, 122, 255, 255],
            width: 3,
        },
    }
}

fn current_layer_spec(feed_url: &str) -> LayerSpec {
    LayerSpec {
        title: "Current position".to_string(),
        url: feed_url.to_string(),
        filter: LayerFilter::Current,
        symbol: SymbolStyle::Marker {
            color: [255, 64, 64, 255],
            size: 10,
            outline_color: [255, 255, 255, 255],
            outline_width: 1,
        },
    }
}
