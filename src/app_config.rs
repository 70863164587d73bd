use crate::domain::{Coordinate, ViewportBound};
use config::Config;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    server: Server,
    track: TrackConfig,
    map: MapConfig,
}

impl AppConfig {
    pub fn load() -> Self {
        Config::builder()
            .add_source(config::File::with_name("config").required(true))
            .add_source(config::File::with_name("config_local").required(false))
            .add_source(config::Environment::default())
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    pub fn server(&self) -> &Server {
        &self.server
    }

    pub fn track(&self) -> &TrackConfig {
        &self.track
    }

    pub fn map(&self) -> &MapConfig {
        &self.map
    }
}

#[derive(Debug, Deserialize)]
pub struct Server {
    host: String,
    port: u16,
    frontend_origin: String,
}

impl Server {
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn frontend_origin(&self) -> &str {
        &self.frontend_origin
    }
}

#[derive(Debug, Deserialize)]
pub struct TrackConfig {
    asset_id: String,
    jitter_magnitude: f64,
    base_path: Vec<Coordinate>,
    bound: ViewportBound,
}

impl TrackConfig {
    pub fn asset_id(&self) -> &str {
        &self.asset_id
    }

    pub fn jitter_magnitude(&self) -> f64 {
        self.jitter_magnitude
    }

    pub fn base_path(&self) -> &[Coordinate] {
        &self.base_path
    }

    pub fn bound(&self) -> &ViewportBound {
        &self.bound
    }
}

#[derive(Debug, Deserialize)]
pub struct MapConfig {
    feed_url: String,
    extent_expansion: f64,
}

impl MapConfig {
    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    pub fn extent_expansion(&self) -> f64 {
        self.extent_expansion
    }
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                server: Server {
                    host: "127.0.0.1".to_string(),
                    port: 0,
                    frontend_origin: "http://localhost:3000".to_string(),
                },
                track: TrackConfig {
                    asset_id: "asset-123".to_string(),
                    jitter_magnitude: 0.004,
                    base_path: vec![
                        Coordinate { longitude: -122.4194, latitude: 37.7749 },
                        Coordinate { longitude: -122.414, latitude: 37.7785 },
                        Coordinate { longitude: -122.409, latitude: 37.7810 },
                        Coordinate { longitude: -122.404, latitude: 37.7835 },
                        Coordinate { longitude: -122.399, latitude: 37.7860 },
                    ],
                    bound: ViewportBound {
                        min_lon: -122.425,
                        max_lon: -122.395,
                        min_lat: 37.770,
                        max_lat: 37.790,
                    },
                },
                map: MapConfig {
                    feed_url: "http://localhost:5080/tracks.geojson".to_string(),
                    extent_expansion: 1.2,
                },
            },
        }
    }

    pub fn feed_url(mut self, feed_url: String) -> Self {
        self.config.map.feed_url = feed_url;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}
