//! Weather service
//!
//! Resolves a city with the geocoder, then asks Open-Meteo for the current
//! conditions at those coordinates.

pub mod geocode;

use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;

use crate::error::ApiError;
use crate::models::{Coordinates, OpenMeteoResponse, WeatherReading, OPEN_METEO_SOURCE};
use crate::services::common::{build_url, fetch_json};
use crate::services::http_client::HttpFetcher;

pub use geocode::Geocoder;

const SERVICE: &str = "Weather Service";
const MIN_LOCATION_LEN: usize = 2;
const MAX_LOCATION_LEN: usize = 100;

pub struct WeatherService {
    fetcher: Arc<dyn HttpFetcher>,
    geocoder: Geocoder,
    base_url: String,
}

impl WeatherService {
    pub fn new(fetcher: Arc<dyn HttpFetcher>, geocoding_url: &str, weather_url: &str) -> Self {
        Self {
            geocoder: Geocoder::new(fetcher.clone(), geocoding_url),
            fetcher,
            base_url: weather_url.to_string(),
        }
    }

    /// Reject empty, too short or too long locations
    pub fn validate_location(location: &str) -> Result<(), ApiError> {
        let len = location.chars().count();

        if len == 0 {
            return Err(ApiError::invalid_input(SERVICE, "Location cannot be empty"));
        }
        if len < MIN_LOCATION_LEN {
            return Err(ApiError::invalid_input(
                SERVICE,
                "Location must be at least 2 characters long",
            ));
        }
        if len > MAX_LOCATION_LEN {
            return Err(ApiError::invalid_input(
                SERVICE,
                "Location must be less than 100 characters",
            ));
        }

        Ok(())
    }

    /// Current weather for a city
    pub async fn get_weather(&self, location: &str) -> Result<WeatherReading, ApiError> {
        Self::validate_location(location)?;

        let start = Instant::now();
        log::info!("Fetching weather for location: {}", location);

        let city = location.trim();
        let result = match self.geocoder.resolve(city).await {
            Ok((coords, country)) => self.current_conditions(coords, city, &country).await,
            Err(e) => Err(e),
        };

        match &result {
            Ok(_) => log::info!(
                "Fetched weather for {} in {:?}",
                location,
                start.elapsed()
            ),
            Err(e) => log::warn!("Error fetching weather for {}: {}", location, e),
        }

        result
    }

    /// Current conditions at already-resolved coordinates
    pub async fn current_conditions(
        &self,
        coords: Coordinates,
        city: &str,
        country: &str,
    ) -> Result<WeatherReading, ApiError> {
        let latitude = format!("{:.4}", coords.latitude);
        let longitude = format!("{:.4}", coords.longitude);

        let url = build_url(
            &self.base_url,
            &[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current", "temperature_2m,weather_code,is_day"),
                ("timezone", "auto"),
            ],
            OPEN_METEO_SOURCE,
        )?;

        let response: OpenMeteoResponse =
            fetch_json(self.fetcher.as_ref(), &url, OPEN_METEO_SOURCE).await?;

        Ok(WeatherReading::from_open_meteo(
            &response,
            city,
            country,
            coords,
            Utc::now(),
        ))
    }

    /// One-line human readable summary
    pub async fn summary(&self, location: &str) -> Result<String, ApiError> {
        let weather = self.get_weather(location).await?;
        Ok(format_summary(&weather))
    }
}

pub fn format_summary(weather: &WeatherReading) -> String {
    let time_of_day = if weather.is_day {
        "during the day"
    } else {
        "during the night"
    };

    format!(
        "Current weather in {}, {}: {:.1}°C, {} {}. Last updated: {}",
        weather.city,
        weather.country,
        weather.temperature,
        weather.description,
        time_of_day,
        weather.metadata.timestamp.format("%H:%M UTC"),
    )
}
