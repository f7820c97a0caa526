//! Test doubles
//!
//! `MockFetcher` serves canned responses by URL substring and records every
//! call, so tests can assert on what went over the wire and when.

use actix_web::web;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

use crate::handlers::AppState;
use crate::services::http_client::{FetchError, FetchResponse, HttpFetcher};
use crate::services::stock::{RequestGate, StockService};
use crate::services::weather::WeatherService;

enum Outcome {
    Respond(FetchResponse),
    Fail(String),
}

struct Route {
    pattern: String,
    outcome: Outcome,
}

/// A recorded outbound call
#[derive(Debug, Clone)]
pub struct Call {
    pub url: String,
    pub at: Instant,
}

#[derive(Default)]
pub struct MockFetcher {
    routes: Vec<Route>,
    calls: Mutex<Vec<Call>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer URLs containing `pattern` with `status` and `body`
    pub fn respond(mut self, pattern: &str, status: u16, body: &str) -> Self {
        self.routes.push(Route {
            pattern: pattern.to_string(),
            outcome: Outcome::Respond(FetchResponse::new(status, body)),
        });
        self
    }

    /// Fail URLs containing `pattern` at the transport level
    pub fn fail(mut self, pattern: &str, message: &str) -> Self {
        self.routes.push(Route {
            pattern: pattern.to_string(),
            outcome: Outcome::Fail(message.to_string()),
        });
        self
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_matching(&self, pattern: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.url.contains(pattern))
            .count()
    }
}

#[async_trait]
impl HttpFetcher for MockFetcher {
    async fn get(&self, url: &str) -> Result<FetchResponse, FetchError> {
        self.calls.lock().unwrap().push(Call {
            url: url.to_string(),
            at: Instant::now(),
        });

        match self.routes.iter().find(|r| url.contains(&r.pattern)) {
            Some(Route {
                outcome: Outcome::Respond(response),
                ..
            }) => Ok(response.clone()),
            Some(Route {
                outcome: Outcome::Fail(message),
                ..
            }) => Err(FetchError(message.clone())),
            None => Ok(FetchResponse::new(404, r#"{"error": "Not found"}"#)),
        }
    }
}

/// Handler state over a mock transport, with an ungated stock service
pub fn app_state(fetcher: Arc<MockFetcher>) -> web::Data<AppState> {
    let gate = Arc::new(RequestGate::new(Duration::ZERO));
    let weather = WeatherService::new(fetcher.clone(), GEO_URL, WEATHER_URL);
    let stock = StockService::new(fetcher, QUOTE_URL, gate, true);
    web::Data::new(AppState::new(weather, stock))
}

// ==================== Fixtures ====================

pub const GEO_URL: &str = "https://geo.test/v1/search";
pub const WEATHER_URL: &str = "https://weather.test/v1/forecast";
pub const QUOTE_URL: &str = "https://quote.test/v7/finance/quote";

pub const SPRINGFIELD_GEOCODE: &str = r#"{
    "results": [
        {"name": "Springfield", "country": "United States", "country_code": "US",
         "latitude": 39.80172, "longitude": -89.64371, "admin1": "Illinois"},
        {"name": "Springfield", "country": "United States", "country_code": "US",
         "latitude": 37.21533, "longitude": -93.29824, "admin1": "Missouri"}
    ]
}"#;

pub const EMPTY_GEOCODE: &str = r#"{"generationtime_ms": 0.5}"#;

pub const CLEAR_DAY_FORECAST: &str = r#"{
    "utc_offset_seconds": 0,
    "current": {"time": "2024-06-15T12:00", "temperature_2m": 21.5, "weather_code": 0, "is_day": 1}
}"#;

pub const DDOG_QUOTE: &str = r#"{
    "quoteResponse": {
        "result": [{
            "symbol": "DDOG",
            "shortName": "Datadog",
            "longName": "Datadog, Inc.",
            "regularMarketPrice": 127.5,
            "regularMarketChange": 2.0,
            "regularMarketChangePercent": 1.59,
            "regularMarketPreviousClose": 125.5,
            "regularMarketVolume": 1500000,
            "marketCap": 40000000000,
            "currency": "USD",
            "marketState": "REGULAR",
            "regularMarketTime": 1718461800
        }],
        "error": null
    }
}"#;

pub const EMPTY_QUOTE: &str = r#"{"quoteResponse": {"result": [], "error": null}}"#;
