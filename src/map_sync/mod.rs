mod client;
mod feed_client;
mod renderer;

pub use client::{MapSyncClient, MapSyncError, SyncState};
pub use feed_client::{FetchError, fetch_feed};
pub use renderer::{Extent, LayerFilter, LayerId, LayerSpec, MapRenderer, RendererError, SymbolStyle};
