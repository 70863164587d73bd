use crate::feed::FeatureCollection;
use reqwest::Client;
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to the track feed failed: {0}")]
    Request(reqwest::Error),
    #[error("the track feed returned a malformed payload: {0}")]
    Malformed(reqwest::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Malformed(e)
        } else {
            FetchError::Request(e)
        }
    }
}

/// Fetches and parses the current feed snapshot. Failures are recoverable at
/// the UI boundary: callers report them to the user instead of crashing the
/// page.
#[instrument(skip_all)]
pub async fn fetch_feed(client: &Client, url: &str) -> Result<FeatureCollection, FetchError> {
    let response = client.get(url).send().await?.error_for_status()?;
    let collection = response.json::<FeatureCollection>().await?;

    info!("Fetched the track feed, {} feature(s)", collection.features.len());
    Ok(collection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{FeatureKind, Geometry};
    use pretty_assertions::assert_eq;

    const FEED_BODY: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "id": "asset-123", "kind": "track" },
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[-122.4194, 37.7749], [-122.399, 37.786]]
                }
            },
            {
                "type": "Feature",
                "properties": { "id": "asset-123", "kind": "current" },
                "geometry": { "type": "Point", "coordinates": [-122.399, 37.786] }
            }
        ]
    }"#;

    #[tokio::test]
    async fn fetch_feed_parses_the_feature_collection() -> Result<(), FetchError> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/tracks.geojson")
            .with_status(200)
            .with_header("content-type", "application/geo+json")
            .with_body(FEED_BODY)
            .create_async()
            .await;

        let url = format!("{}/tracks.geojson", server.url());
        let collection = fetch_feed(&Client::new(), &url).await?;

        mock.assert();
        assert_eq!(collection.features.len(), 2);
        assert_eq!(collection.features[1].properties.kind, FeatureKind::Current);
        assert!(matches!(collection.features[0].geometry, Geometry::LineString { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn a_server_error_maps_to_a_request_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/tracks.geojson")
            .with_status(500)
            .create_async()
            .await;

        let url = format!("{}/tracks.geojson", server.url());
        let result = fetch_feed(&Client::new(), &url).await;

        assert!(matches!(result, Err(FetchError::Request(_))));
    }

    #[tokio::test]
    async fn a_malformed_payload_maps_to_a_parse_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/tracks.geojson")
            .with_status(200)
            .with_body("not geojson")
            .create_async()
            .await;

        let url = format!("{}/tracks.geojson", server.url());
        let result = fetch_feed(&Client::new(), &url).await;

        assert!(matches!(result, Err(FetchError::Malformed(_))));
    }
}
