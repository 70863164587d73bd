mod encoder;
mod generator;
mod routes;

pub use encoder::{Feature, FeatureCollection, FeatureKind, FeatureProperties, Geometry, InvalidTrackError, encode};
pub use generator::{JitterSource, ThreadRngJitter, generate};
pub use routes::{GEO_JSON_MEDIA_TYPE, tracks_geojson};
