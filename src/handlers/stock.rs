//! Stock endpoints
//!
//! - GET /stock?symbol=<symbol> - current quote
//! - GET /stock/datadog - current DDOG quote
//! - GET /stock/summary?symbol=<symbol> - one-line summary

use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;

use super::{error_response, missing_param, AppState};
use crate::models::ApiResponse;

#[derive(Debug, Deserialize)]
pub struct StockQuery {
    pub symbol: Option<String>,
}

/// GET /stock?symbol=<symbol>
pub async fn get_stock(
    state: web::Data<AppState>,
    query: web::Query<StockQuery>,
) -> Result<HttpResponse> {
    let Some(symbol) = query.symbol.as_deref().filter(|s| !s.is_empty()) else {
        return Ok(missing_param("symbol"));
    };

    match state.stock.get_quote(symbol).await {
        Ok(quote) => Ok(HttpResponse::Ok().json(ApiResponse::success(quote))),
        Err(e) => Ok(error_response(&e)),
    }
}

/// GET /stock/datadog
pub async fn get_datadog_stock(state: web::Data<AppState>) -> Result<HttpResponse> {
    match state.stock.datadog().await {
        Ok(quote) => Ok(HttpResponse::Ok().json(ApiResponse::success(quote))),
        Err(e) => Ok(error_response(&e)),
    }
}

/// GET /stock/summary?symbol=<symbol>
pub async fn get_stock_summary(
    state: web::Data<AppState>,
    query: web::Query<StockQuery>,
) -> Result<HttpResponse> {
    let Some(symbol) = query.symbol.as_deref().filter(|s| !s.is_empty()) else {
        return Ok(missing_param("symbol"));
    };

    match state.stock.summary(symbol).await {
        Ok(summary) => Ok(HttpResponse::Ok().json(ApiResponse::success(summary))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/stock").route(web::get().to(get_stock)))
        .service(web::resource("/stock/datadog").route(web::get().to(get_datadog_stock)))
        .service(web::resource("/stock/summary").route(web::get().to(get_stock_summary)));
}
