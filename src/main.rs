//! Weather & Stock API
//!
//! REST facade over free third-party APIs:
//! current weather from Open-Meteo and stock quotes from Yahoo Finance,
//! with simulated quotes when the quote provider is unavailable

mod config;     // configuration
mod error;      // error model
mod handlers;   // HTTP handlers
mod middleware; // middleware
mod models;     // data models
mod services;   // business services
#[cfg(test)]
mod test_utils;

use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::handlers::AppState;
use crate::middleware::SecurityHeaders;
use crate::services::http_client::{HttpFetcher, ReqwestFetcher};
use crate::services::stock::{RequestGate, StockService};
use crate::services::weather::WeatherService;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let (config, warnings) = AppConfig::load();

    // RUST_LOG wins over the configured level
    env_logger::init_from_env(Env::default().default_filter_or(config.log.level.as_str()));
    for warning in warnings {
        log::warn!("{}", warning);
    }

    log::info!("Starting Weather & Stock API v{}", env!("CARGO_PKG_VERSION"));

    let fetcher: Arc<dyn HttpFetcher> = Arc::new(ReqwestFetcher::new(&config.api)?);
    let upstream = &config.upstream;

    let weather = WeatherService::new(
        fetcher.clone(),
        &upstream.geocoding_url,
        &upstream.weather_url,
    );

    let gate = Arc::new(RequestGate::new(Duration::from_millis(
        upstream.min_quote_interval_ms,
    )));
    log::info!(
        "Quote requests spaced {:?} apart, demo fallback {}",
        gate.min_interval(),
        if upstream.demo_fallback { "enabled" } else { "disabled" }
    );
    let stock = StockService::new(fetcher, &upstream.quote_url, gate, upstream.demo_fallback);

    let state = web::Data::new(AppState::new(weather, stock));
    let bind_addr = config.bind_addr();

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(SecurityHeaders)
            .wrap(Logger::default())
            .configure(handlers::config)
    })
    .keep_alive(Duration::from_secs(config.server.keep_alive_secs))
    .client_request_timeout(Duration::from_secs(config.server.client_request_timeout_secs))
    .shutdown_timeout(config.server.shutdown_timeout_secs);

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    log::info!("Listening on {}", bind_addr);
    server.bind(&bind_addr)?.run().await?;

    log::info!("Server shutdown complete");
    Ok(())
}
