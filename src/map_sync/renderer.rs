use async_trait::async_trait;
use thiserror::Error;

/// Handle to a layer created by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct LayerSpec {
    pub title: String,
    pub url: String,
    pub filter: LayerFilter,
    pub symbol: SymbolStyle,
}

/// Property filter applied to the feed, selecting one of the two features.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerFilter {
    Track,
    Current,
}

impl LayerFilter {
    pub fn expression(&self) -> &'static str {
        match self {
            LayerFilter::Track => "kind = 'track'",
            LayerFilter::Current => "kind = 'current'",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SymbolStyle {
    Line {
        color: [u8; 4],
        width: u32,
    },
    Marker {
        color: [u8; 4],
        size: u32,
        outline_color: [u8; 4],
        outline_width: u32,
    },
}

/// The minimal bounding rectangle enclosing a layer's geometries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl Extent {
    /// Scales the extent about its center, e.g. by 1.2 to frame the data with
    /// some margin on every side.
    pub fn expand(&self, factor: f64) -> Extent {
        let center_lon = (self.min_lon + self.max_lon) / 2.0;
        let center_lat = (self.min_lat + self.max_lat) / 2.0;
        let half_width = (self.max_lon - self.min_lon) / 2.0 * factor;
        let half_height = (self.max_lat - self.min_lat) / 2.0 * factor;

        Extent {
            min_lon: center_lon - half_width,
            min_lat: center_lat - half_height,
            max_lon: center_lon + half_width,
            max_lat: center_lat + half_height,
        }
    }
}

#[derive(Error, Debug)]
pub enum RendererError {
    #[error("unknown layer {0:?}")]
    UnknownLayer(LayerId),
    #[error("renderer failure: {0}")]
    Backend(String),
}

/// Interface to the hosting map runtime. Injected so the sync client can be
/// exercised against a fake renderer without a real map.
#[async_trait]
pub trait MapRenderer: Send + Sync {
    /// Whether a map runtime is present at all. A missing runtime is an
    /// expected deployment variant, not an error.
    fn is_available(&self) -> bool;

    async fn create_layer(&self, spec: LayerSpec) -> Result<LayerId, RendererError>;

    /// Resolves once the layer has loaded its data and is ready to draw.
    async fn await_ready(&self, layer: LayerId) -> Result<(), RendererError>;

    /// The extent of the layer's data, or `None` when the layer is empty.
    async fn query_extent(&self, layer: LayerId) -> Result<Option<Extent>, RendererError>;

    /// Animates the view to the given extent.
    async fn fit_view(&self, extent: Extent) -> Result<(), RendererError>;

    async fn set_layer_url(&self, layer: LayerId, url: String) -> Result<(), RendererError>;

    /// Reloads the layer's data from its current URL.
    async fn refresh_layer(&self, layer: LayerId) -> Result<(), RendererError>;
}
