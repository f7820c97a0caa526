//! Shared model types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Latitude and longitude in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Where a response came from and when it was produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseMetadata {
    pub timestamp: DateTime<Utc>,
    pub source: String,
}

impl ResponseMetadata {
    pub fn new(timestamp: DateTime<Utc>, source: impl Into<String>) -> Self {
        Self {
            timestamp,
            source: source.into(),
        }
    }
}

/// Deserialize a present-but-null field as the type's default value
///
/// Pair with `#[serde(default)]` so missing keys are covered too.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "null_as_default")]
        name: String,
        #[serde(default, deserialize_with = "null_as_default")]
        count: i64,
    }

    #[test]
    fn test_null_as_default() {
        let sample: Sample = serde_json::from_str(r#"{"name": null, "count": null}"#).unwrap();
        assert_eq!(sample.name, "");
        assert_eq!(sample.count, 0);

        let sample: Sample = serde_json::from_str("{}").unwrap();
        assert_eq!((sample.name.as_str(), sample.count), ("", 0));

        let sample: Sample = serde_json::from_str(r#"{"name": "x", "count": 3}"#).unwrap();
        assert_eq!((sample.name.as_str(), sample.count), ("x", 3));
    }
}
