//! City name to coordinates
//!
//! A few well-known cities resolve from a static table; everything else goes
//! through the Open-Meteo geocoding search.

use serde::Deserialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::{null_as_default, Coordinates};
use crate::services::common::{build_url, fetch_json};
use crate::services::http_client::HttpFetcher;

const SERVICE: &str = "Geocoding";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    results: Vec<GeocodeResult>,
}

/// Only the fields used for a lookup; the rest of the result is ignored
#[derive(Debug, Deserialize)]
struct GeocodeResult {
    #[serde(default, deserialize_with = "null_as_default")]
    country: String,
    latitude: f64,
    longitude: f64,
}

/// Static seed table, keyed by lowercase name
pub fn known_city(name: &str) -> Option<(Coordinates, &'static str)> {
    let entry = match name {
        "stuttgart" => (Coordinates::new(48.7758, 9.1829), "Germany"),
        "berlin" => (Coordinates::new(52.5200, 13.4050), "Germany"),
        "munich" => (Coordinates::new(48.1351, 11.5820), "Germany"),
        "london" => (Coordinates::new(51.5074, -0.1278), "United Kingdom"),
        "paris" => (Coordinates::new(48.8566, 2.3522), "France"),
        "new york" => (Coordinates::new(40.7128, -74.0060), "United States"),
        _ => return None,
    };
    Some(entry)
}

/// Resolves city names to coordinates and country
pub struct Geocoder {
    fetcher: Arc<dyn HttpFetcher>,
    base_url: String,
}

impl Geocoder {
    pub fn new(fetcher: Arc<dyn HttpFetcher>, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
        }
    }

    /// Resolve a city: static table first, then the remote search
    pub async fn resolve(&self, city: &str) -> Result<(Coordinates, String), ApiError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(ApiError::invalid_input(SERVICE, "City name cannot be empty"));
        }

        if let Some((coords, country)) = known_city(&city.to_lowercase()) {
            log::debug!("geocode cache hit for {}", city);
            return Ok((coords, country.to_string()));
        }

        self.lookup(city).await
    }

    /// Remote lookup, first result wins
    pub async fn lookup(&self, city: &str) -> Result<(Coordinates, String), ApiError> {
        let url = build_url(
            &self.base_url,
            &[("name", city), ("count", "1"), ("language", "en"), ("format", "json")],
            SERVICE,
        )?;

        let response: GeocodeResponse = fetch_json(self.fetcher.as_ref(), &url, SERVICE).await?;

        let first = response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::not_found(SERVICE, format!("City '{}' not found", city)))?;

        Ok((
            Coordinates::new(first.latitude, first.longitude),
            first.country,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_utils::{MockFetcher, EMPTY_GEOCODE, GEO_URL, SPRINGFIELD_GEOCODE};

    #[tokio::test]
    async fn test_known_city_needs_no_network() {
        let fetcher = MockFetcher::new().shared();
        let geocoder = Geocoder::new(fetcher.clone(), GEO_URL);

        for input in ["Stuttgart", "stuttgart", "  STUTTGART  ", "\tStuttGart\n"] {
            let (coords, country) = geocoder.resolve(input).await.unwrap();
            assert_eq!(coords, Coordinates::new(48.7758, 9.1829), "input {:?}", input);
            assert_eq!(country, "Germany");
        }

        let (coords, country) = geocoder.resolve("New York").await.unwrap();
        assert_eq!(coords, Coordinates::new(40.7128, -74.0060));
        assert_eq!(country, "United States");

        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_city_rejected() {
        let fetcher = MockFetcher::new().shared();
        let geocoder = Geocoder::new(fetcher.clone(), GEO_URL);

        let err = geocoder.resolve("   ").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidInput);
        assert_eq!(err.code, 400);
        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_remote_lookup_takes_first_result() {
        let fetcher = MockFetcher::new()
            .respond("name=Springfield", 200, SPRINGFIELD_GEOCODE)
            .shared();
        let geocoder = Geocoder::new(fetcher.clone(), GEO_URL);

        let (coords, country) = geocoder.resolve(" Springfield ").await.unwrap();
        assert_eq!(coords, Coordinates::new(39.80172, -89.64371));
        assert_eq!(country, "United States");

        let calls = fetcher.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].url,
            "https://geo.test/v1/search?name=Springfield&count=1&language=en&format=json"
        );
    }

    #[tokio::test]
    async fn test_sparse_result_needs_only_coordinates() {
        let fetcher = MockFetcher::new()
            .respond(
                "name=Nowhereville",
                200,
                r#"{"results": [{"latitude": 1.5, "longitude": -2.25, "country": null}]}"#,
            )
            .shared();
        let geocoder = Geocoder::new(fetcher, GEO_URL);

        let (coords, country) = geocoder.resolve("Nowhereville").await.unwrap();
        assert_eq!(coords, Coordinates::new(1.5, -2.25));
        assert_eq!(country, "");
    }

    #[tokio::test]
    async fn test_no_results_is_not_found() {
        let fetcher = MockFetcher::new().respond("name=Atlantis", 200, EMPTY_GEOCODE).shared();
        let geocoder = Geocoder::new(fetcher, GEO_URL);

        let err = geocoder.resolve("Atlantis").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.message, "City 'Atlantis' not found");
    }

    #[tokio::test]
    async fn test_upstream_failures() {
        let fetcher = MockFetcher::new()
            .respond("name=Busytown", 503, "")
            .respond("name=Garbleburg", 200, "{not json")
            .fail("name=Offline", "timed out")
            .shared();
        let geocoder = Geocoder::new(fetcher, GEO_URL);

        let err = geocoder.resolve("Busytown").await.unwrap_err();
        assert_eq!((err.kind, err.code), (ErrorKind::Upstream, 503));
        assert_eq!(err.service, "Geocoding");

        let err = geocoder.resolve("Garbleburg").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Parse);

        let err = geocoder.resolve("Offline").await.unwrap_err();
        assert_eq!((err.kind, err.code), (ErrorKind::Upstream, 500));
    }
}
