//! Weather data models
//!
//! Canonical weather reading plus the raw Open-Meteo shapes it is mapped from

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{null_as_default, Coordinates, ResponseMetadata};

pub const OPEN_METEO_SOURCE: &str = "Open-Meteo";

/// Canonical weather condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Clear,
    PartlyCloudy,
    Cloudy,
    /// Not produced by the code table, code 3 maps to `Cloudy`
    #[allow(dead_code)]
    Overcast,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Thunderstorm,
    Unknown,
}

/// Current weather for a city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    /// City as requested
    pub city: String,
    pub country: String,
    /// Temperature in °C
    pub temperature: f64,
    pub condition: WeatherCondition,
    pub description: String,
    pub is_day: bool,
    pub coordinates: Coordinates,
    pub metadata: ResponseMetadata,
}

/// Open-Meteo forecast response (current conditions only)
#[derive(Debug, Deserialize)]
pub struct OpenMeteoResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub utc_offset_seconds: i64,
    pub current: OpenMeteoCurrent,
}

/// Null values decode as zero or empty
#[derive(Debug, Deserialize)]
pub struct OpenMeteoCurrent {
    /// Local time at the location, `YYYY-MM-DDTHH:MM`
    #[serde(default, deserialize_with = "null_as_default")]
    pub time: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub temperature_2m: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub weather_code: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_day: i32,
}

/// Map an Open-Meteo (WMO) weather code to a condition and description
///
/// Total: codes outside the table map to `Unknown`.
pub fn weather_condition(code: i32) -> (WeatherCondition, &'static str) {
    use WeatherCondition::*;

    match code {
        0 => (Clear, "Clear sky"),
        1 => (PartlyCloudy, "Mainly clear"),
        2 => (PartlyCloudy, "Partly cloudy"),
        3 => (Cloudy, "Overcast"),
        45 => (Fog, "Fog"),
        48 => (Fog, "Depositing rime fog"),
        51 => (Drizzle, "Light drizzle"),
        53 => (Drizzle, "Moderate drizzle"),
        55 => (Drizzle, "Dense drizzle"),
        61 => (Rain, "Slight rain"),
        63 => (Rain, "Moderate rain"),
        65 => (Rain, "Heavy rain"),
        71 => (Snow, "Slight snow fall"),
        73 => (Snow, "Moderate snow fall"),
        75 => (Snow, "Heavy snow fall"),
        95 => (Thunderstorm, "Thunderstorm"),
        96 => (Thunderstorm, "Thunderstorm with slight hail"),
        99 => (Thunderstorm, "Thunderstorm with heavy hail"),
        _ => (Unknown, "Unknown weather condition"),
    }
}

/// Convert the provider's local observation time to UTC
fn observation_time(time: &str, utc_offset_seconds: i64) -> Option<DateTime<Utc>> {
    let local = NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M").ok()?;
    local
        .checked_sub_signed(Duration::seconds(utc_offset_seconds))
        .map(|t| t.and_utc())
}

impl WeatherReading {
    /// Build a reading from an Open-Meteo response
    ///
    /// `fetched_at` stands in for the timestamp when the provider time is
    /// missing or malformed.
    pub fn from_open_meteo(
        response: &OpenMeteoResponse,
        city: &str,
        country: &str,
        coordinates: Coordinates,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        let current = &response.current;
        let (condition, description) = weather_condition(current.weather_code);
        let timestamp =
            observation_time(&current.time, response.utc_offset_seconds).unwrap_or(fetched_at);

        Self {
            city: city.to_string(),
            country: country.to_string(),
            temperature: current.temperature_2m,
            condition,
            description: description.to_string(),
            is_day: current.is_day == 1,
            coordinates,
            metadata: ResponseMetadata::new(timestamp, OPEN_METEO_SOURCE),
        }
    }
}
