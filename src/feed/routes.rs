use crate::feed::encoder::{FeatureCollection, encode};
use crate::feed::generator::generate;
use crate::server::AppState;
use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, error, instrument};

pub const GEO_JSON_MEDIA_TYPE: &str = "application/geo+json";

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    /// Cache-busting token, accepted and ignored.
    t: Option<String>,
}

/// Serves the current GeoJSON snapshot of the asset's track.
///
/// Every call draws a fresh jitter sequence, so two consecutive responses may
/// carry different coordinate values. That non-idempotence is intentional and
/// limited to the content: the response structure and the bound invariant
/// hold on every call.
#[instrument(skip_all)]
pub async fn tracks_geojson(State(state): State<Arc<AppState>>, Query(query): Query<FeedQuery>) -> Response {
    if let Some(token) = &query.t {
        debug!(token = %token, "Ignoring cache-bust token");
    }

    let track_config = state.config().track();
    let track = generate(
        track_config.base_path(),
        track_config.jitter_magnitude(),
        track_config.bound(),
        state.jitter(),
    );

    match encode(&track, track_config.asset_id()) {
        Ok(collection) => geo_json_response(&collection),
        Err(e) => {
            error!("⚠️ Unable to encode the track feed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "unable to produce the track feed").into_response()
        }
    }
}

fn geo_json_response(collection: &FeatureCollection) -> Response {
    let body = match serde_json::to_string(collection) {
        Ok(body) => body,
        Err(e) => {
            error!("⚠️ Unable to serialize the track feed: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "unable to produce the track feed").into_response();
        }
    };

    match Response::builder()
        .header(header::CONTENT_TYPE, GEO_JSON_MEDIA_TYPE)
        .body(Body::from(body))
    {
        Ok(response) => response,
        Err(e) => {
            error!("⚠️ Unable to build the track feed response: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "unable to produce the track feed").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::AppConfigBuilder;
    use crate::feed::encoder::{FeatureKind, Geometry};
    use crate::feed::generator::tests::FixedJitter;
    use pretty_assertions::assert_eq;

    fn state() -> Arc<AppState> {
        let config = Arc::new(AppConfigBuilder::new().build());
        Arc::new(AppState::with_jitter(config, Box::new(FixedJitter(0.002))))
    }

    async fn collection_from(response: Response) -> FeatureCollection {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn the_feed_is_served_as_geo_json() {
        let response = tracks_geojson(State(state()), Query(FeedQuery { t: None })).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], GEO_JSON_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn the_cache_bust_token_does_not_change_the_response() {
        let response = tracks_geojson(
            State(state()),
            Query(FeedQuery {
                t: Some("1724380000000".to_string()),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);

        let collection = collection_from(response).await;
        assert_eq!(collection.features.len(), 2);
    }

    #[tokio::test]
    async fn the_point_feature_matches_the_last_line_coordinate() {
        let response = tracks_geojson(State(state()), Query(FeedQuery { t: None })).await;

        let collection = collection_from(response).await;
        let Geometry::LineString { coordinates: line } = &collection.features[0].geometry else {
            panic!("expected a LineString feature first");
        };
        let Geometry::Point { coordinates: point } = &collection.features[1].geometry else {
            panic!("expected a Point feature second");
        };

        assert_eq!(Some(point), line.last());
        assert_eq!(collection.features[0].properties.kind, FeatureKind::Track);
        assert_eq!(collection.features[1].properties.kind, FeatureKind::Current);
    }

    #[tokio::test]
    async fn every_served_coordinate_lies_within_the_configured_bound() {
        let config = Arc::new(AppConfigBuilder::new().build());
        let bound = *config.track().bound();
        let state = Arc::new(AppState::new(config));

        for _ in 0..20 {
            let response = tracks_geojson(State(state.clone()), Query(FeedQuery { t: None })).await;
            let collection = collection_from(response).await;

            let Geometry::LineString { coordinates } = &collection.features[0].geometry else {
                panic!("expected a LineString feature first");
            };
            for coordinate in coordinates {
                assert!(bound.contains(coordinate), "{:?} is out of bound", coordinate);
            }
        }
    }
}
