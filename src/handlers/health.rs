use actix_web::{web, HttpResponse, Result};
use chrono::Utc;
use serde_json::json;

use super::AppState;
use crate::models::ApiResponse;

const SERVICE_NAME: &str = "weather-stock-api";

/// GET /health
pub async fn health_check(state: web::Data<AppState>) -> Result<HttpResponse> {
    let data = json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now(),
        "uptime_secs": state.started_at.elapsed().as_secs(),
    });
    Ok(HttpResponse::Ok().json(ApiResponse::success(data)))
}

/// GET / - service info and endpoint list
pub async fn api_info() -> Result<HttpResponse> {
    let data = json!({
        "service": "Weather & Stock API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Current weather for cities and stock prices",
        "endpoints": {
            "health": {"method": "GET", "path": "/health", "description": "Health check"},
            "weather": {
                "method": "GET",
                "path": "/weather?city=<city_name>",
                "description": "Current weather for a city",
                "example": "/weather?city=Stuttgart"
            },
            "weather_summary": {
                "method": "GET",
                "path": "/weather/summary?city=<city_name>",
                "description": "Weather summary for a city",
                "example": "/weather/summary?city=Stuttgart"
            },
            "stock": {
                "method": "GET",
                "path": "/stock?symbol=<symbol>",
                "description": "Current stock price for a symbol",
                "example": "/stock?symbol=DDOG"
            },
            "datadog_stock": {
                "method": "GET",
                "path": "/stock/datadog",
                "description": "Current Datadog stock price"
            },
            "stock_summary": {
                "method": "GET",
                "path": "/stock/summary?symbol=<symbol>",
                "description": "Stock summary for a symbol",
                "example": "/stock/summary?symbol=DDOG"
            }
        }
    });
    Ok(HttpResponse::Ok().json(ApiResponse::success(data)))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(api_info)))
        .service(web::resource("/health").route(web::get().to(health_check)));
}
