//! Weather endpoints
//!
//! - GET /weather?city=<name> - current weather
//! - GET /weather/summary?city=<name> - one-line summary

use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;
use serde_json::json;

use super::{error_response, missing_param, AppState};
use crate::models::ApiResponse;

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub city: Option<String>,
}

/// GET /weather?city=<name>
pub async fn get_weather(
    state: web::Data<AppState>,
    query: web::Query<WeatherQuery>,
) -> Result<HttpResponse> {
    let Some(city) = query.city.as_deref().filter(|c| !c.is_empty()) else {
        return Ok(missing_param("city"));
    };

    match state.weather.get_weather(city).await {
        Ok(weather) => Ok(HttpResponse::Ok().json(ApiResponse::success(weather))),
        Err(e) => Ok(error_response(&e)),
    }
}

/// GET /weather/summary?city=<name>
pub async fn get_weather_summary(
    state: web::Data<AppState>,
    query: web::Query<WeatherQuery>,
) -> Result<HttpResponse> {
    let Some(city) = query.city.as_deref().filter(|c| !c.is_empty()) else {
        return Ok(missing_param("city"));
    };

    match state.weather.summary(city).await {
        Ok(summary) => {
            let data = json!({ "city": city, "summary": summary });
            Ok(HttpResponse::Ok().json(ApiResponse::success(data)))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/weather").route(web::get().to(get_weather)))
        .service(web::resource("/weather/summary").route(web::get().to(get_weather_summary)));
}
