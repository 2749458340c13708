//! Geocoding API backend

use super::GoogleMapsClient;
use crate::coord::Coordinates;
use crate::error::Result;
use crate::geo::{GeoBackend, GeocodeCandidate};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct GeocodeBody {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    formatted_address: String,
    geometry: GeocodeGeometry,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeGeometry {
    location: Coordinates,
}

impl From<GeocodeResult> for GeocodeCandidate {
    fn from(result: GeocodeResult) -> Self {
        Self {
            formatted_address: result.formatted_address,
            location: result.geometry.location,
            types: result.types,
        }
    }
}

impl GeoBackend for GoogleMapsClient {
    async fn geocode(&self, address: &str, country: &str) -> Result<Vec<GeocodeCandidate>> {
        let components = format!("country:{}", country);
        let body: GeocodeBody = self
            .get_json(
                "Geocoding",
                "geocode/json",
                &[
                    ("address", address),
                    ("components", components.as_str()),
                    ("region", country),
                ],
                false,
            )
            .await?;

        Ok(body.results.into_iter().map(Into::into).collect())
    }

    async fn reverse_geocode(&self, location: Coordinates) -> Result<Vec<GeocodeCandidate>> {
        let latlng = location.to_query_value();
        let body: GeocodeBody = self
            .get_json("Geocoding", "geocode/json", &[("latlng", latlng.as_str())], false)
            .await?;

        Ok(body.results.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> GoogleMapsClient {
        GoogleMapsClient::with_base_url("test-key", 5, base_url).unwrap()
    }

    #[tokio::test]
    async fn test_geocode_restricts_country() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geocode/json"))
            .and(query_param("address", "10 Downing Street, London"))
            .and(query_param("components", "country:gb"))
            .and(query_param("region", "gb"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "OK",
                "results": [{
                    "formatted_address": "10 Downing St, London SW1A 2AA, UK",
                    "geometry": {"location": {"lat": 51.5033635, "lng": -0.1276248}, "location_type": "ROOFTOP"},
                    "place_id": "ChIJRxzRQcUEdkgRGVaKyzmkgvg",
                    "types": ["premise", "street_address"]
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let results = client
            .geocode("10 Downing Street, London", "gb")
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].location, Coordinates::new(51.5033635, -0.1276248));
        assert!(results[0].types.contains(&"premise".to_string()));
    }

    #[tokio::test]
    async fn test_geocode_zero_results_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geocode/json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"status": "ZERO_RESULTS", "results": []})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.geocode("Atlantis", "gb").await.unwrap_err();
        assert!(matches!(err, Error::Vendor { ref status, .. } if status == "ZERO_RESULTS"));
    }

    #[tokio::test]
    async fn test_reverse_geocode() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geocode/json"))
            .and(query_param("latlng", "51.5034,-0.1276"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "OK",
                "results": [{
                    "formatted_address": "10 Downing St, London SW1A 2AA, UK",
                    "geometry": {"location": {"lat": 51.5034, "lng": -0.1276}},
                    "types": ["street_address"]
                }]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let results = client
            .reverse_geocode(Coordinates::new(51.5034, -0.1276))
            .await
            .unwrap();
        assert_eq!(results[0].formatted_address, "10 Downing St, London SW1A 2AA, UK");
    }
}
