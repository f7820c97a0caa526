//! Shared helpers for upstream calls

use serde::de::DeserializeOwned;
use url::Url;

use super::http_client::HttpFetcher;
use crate::error::ApiError;

/// Append query parameters to a base URL
pub fn build_url(base: &str, params: &[(&str, &str)], service: &str) -> Result<String, ApiError> {
    Url::parse_with_params(base, params)
        .map(String::from)
        .map_err(|e| ApiError::transport(service, format!("invalid URL {}: {}", base, e)))
}

/// GET `url` and decode a JSON body
///
/// Transport failure and non-200 status are `Upstream` errors, an
/// undecodable body is a `Parse` error. All carry `service`.
pub async fn fetch_json<T: DeserializeOwned>(
    fetcher: &dyn HttpFetcher,
    url: &str,
    service: &str,
) -> Result<T, ApiError> {
    let response = fetcher
        .get(url)
        .await
        .map_err(|e| ApiError::transport(service, e))?;

    if response.status != 200 {
        log::warn!("{} returned status {}", service, response.status);
        return Err(ApiError::upstream_status(service, response.status));
    }

    serde_json::from_str(&response.body).map_err(|e| ApiError::parse(service, e))
}
