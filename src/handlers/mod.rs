pub mod health;
pub mod stock;
pub mod weather;

use actix_web::{web, HttpResponse};
use std::time::Instant;

use crate::error::ApiError;
use crate::models::ApiResponse;
use crate::services::stock::StockService;
use crate::services::weather::WeatherService;

/// Shared handler state, one instance for all workers
pub struct AppState {
    pub weather: WeatherService,
    pub stock: StockService,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(weather: WeatherService, stock: StockService) -> Self {
        Self {
            weather,
            stock,
            started_at: Instant::now(),
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::config)
        .configure(weather::config)
        .configure(stock::config);
}

/// Render a service error with its mapped HTTP status
pub fn error_response(err: &ApiError) -> HttpResponse {
    let status = err.status_code();
    log::warn!("Error response ({}): {}", status.as_u16(), err);
    HttpResponse::build(status).json(ApiResponse::<()>::error(err.to_string(), status.as_u16()))
}

/// 400 for a missing query parameter
pub fn missing_param(name: &str) -> HttpResponse {
    let message = format!("missing required parameter '{}'", name);
    HttpResponse::BadRequest().json(ApiResponse::<()>::error(message, 400))
}
