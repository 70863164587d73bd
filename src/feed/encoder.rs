use crate::domain::{Coordinate, Track};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A GeoJSON feature collection holding exactly two features: the track path
/// and the current-position marker.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub struct Feature {
    pub properties: FeatureProperties,
    pub geometry: Geometry,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct FeatureProperties {
    pub id: String,
    pub kind: FeatureKind,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    Track,
    Current,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Geometry {
    LineString { coordinates: Vec<Coordinate> },
    Point { coordinates: Coordinate },
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidTrackError {
    #[error("a track must contain at least one coordinate")]
    EmptyTrack,
}

/// Wraps a track into a feature collection: a `LineString` over the full
/// track followed by a `Point` at the current position. Pure function of its
/// inputs. The point feature always equals the last coordinate of the line
/// feature.
pub fn encode(track: &Track, asset_id: &str) -> Result<FeatureCollection, InvalidTrackError> {
    let Some(current) = track.current_position() else {
        return Err(InvalidTrackError::EmptyTrack);
    };

    Ok(FeatureCollection {
        features: vec![
            Feature {
                properties: FeatureProperties {
                    id: asset_id.to_string(),
                    kind: FeatureKind::Track,
                },
                geometry: Geometry::LineString {
                    coordinates: track.coordinates().to_vec(),
                },
            },
            Feature {
                properties: FeatureProperties {
                    id: asset_id.to_string(),
                    kind: FeatureKind::Current,
                },
                geometry: Geometry::Point { coordinates: *current },
            },
        ],
    })
}
