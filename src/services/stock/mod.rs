//! Stock service
//!
//! Validates the ticker, waits for the shared request gate, fetches the quote
//! from Yahoo Finance and falls back to demo data when the provider refuses
//! or fails.

pub mod demo;
pub mod gate;
pub mod yahoo;

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use crate::error::{ApiError, ErrorKind};
use crate::models::{MarketState, StockQuote};
use crate::services::http_client::HttpFetcher;

pub use gate::RequestGate;
pub use yahoo::{validate_and_normalize_symbol, QuoteClient};

pub const DATADOG_SYMBOL: &str = "DDOG";

/// Human readable view of one quote
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockSummary {
    pub symbol: String,
    pub summary: String,
    /// e.g. "+1.23 (0.45%)"
    pub price_change: String,
    pub market_open: bool,
}

impl From<&StockQuote> for StockSummary {
    fn from(quote: &StockQuote) -> Self {
        Self {
            symbol: quote.symbol.clone(),
            summary: format_summary(quote),
            price_change: format_price_change(quote),
            market_open: quote.market_state == MarketState::Regular,
        }
    }
}

/// What to do with a failed upstream quote request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Serve a simulated quote instead
    Substitute,
    /// Return the error to the caller
    Propagate,
}

/// Decision table: auth failures, throttling and server errors are
/// recovered with demo data, everything else is propagated
pub fn recovery_for(error: &ApiError) -> Recovery {
    if error.kind == ErrorKind::InvalidInput {
        return Recovery::Propagate;
    }

    match error.code {
        401 | 403 | 429 => Recovery::Substitute,
        code if code >= 500 => Recovery::Substitute,
        _ => Recovery::Propagate,
    }
}

pub struct StockService {
    client: QuoteClient,
    gate: Arc<RequestGate>,
    demo_fallback: bool,
}

impl StockService {
    pub fn new(
        fetcher: Arc<dyn HttpFetcher>,
        quote_url: &str,
        gate: Arc<RequestGate>,
        demo_fallback: bool,
    ) -> Self {
        Self {
            client: QuoteClient::new(fetcher, quote_url),
            gate,
            demo_fallback,
        }
    }

    /// Current quote for a ticker
    pub async fn get_quote(&self, symbol: &str) -> Result<StockQuote, ApiError> {
        let symbol = validate_and_normalize_symbol(symbol)?;

        let start = Instant::now();
        log::info!("Fetching stock price for symbol: {}", symbol);

        self.gate.wait_turn().await;

        match self.client.fetch(&symbol).await {
            Ok(quote) => {
                log::info!(
                    "Fetched stock price for {} in {:?}",
                    symbol,
                    start.elapsed()
                );
                Ok(quote)
            }
            Err(err) => {
                log::warn!("Error fetching stock price for {}: {}", symbol, err);
                self.recover(&symbol, err)
            }
        }
    }

    fn recover(&self, symbol: &str, err: ApiError) -> Result<StockQuote, ApiError> {
        if !self.demo_fallback || recovery_for(&err) == Recovery::Propagate {
            return Err(err);
        }

        log::warn!("API error {}, falling back to demo mode for {}", err.code, symbol);
        match demo::generate(symbol) {
            Ok(quote) => Ok(quote),
            Err(demo_err) => {
                log::warn!("Demo mode also failed for {}: {}", symbol, demo_err);
                Err(err)
            }
        }
    }

    pub async fn datadog(&self) -> Result<StockQuote, ApiError> {
        self.get_quote(DATADOG_SYMBOL).await
    }

    /// Summary, price change and market session from a single quote
    pub async fn summary(&self, symbol: &str) -> Result<StockSummary, ApiError> {
        let quote = self.get_quote(symbol).await?;
        Ok(StockSummary::from(&quote))
    }
}

pub fn format_summary(quote: &StockQuote) -> String {
    let (icon, direction) = match quote.change_direction() {
        "up" => ("↗", "up"),
        "down" => ("↘", "down"),
        _ => ("→", "unchanged"),
    };

    format!(
        "{} ({}): ${:.2} {} {:.2} ({:.2}%) - {}. {}. Last updated: {}",
        quote.company_name,
        quote.symbol,
        quote.price,
        icon,
        quote.change,
        quote.change_percent,
        direction,
        quote.market_state.label(),
        quote.metadata.timestamp.format("%H:%M UTC"),
    )
}

pub fn format_price_change(quote: &StockQuote) -> String {
    let sign = if quote.is_positive_change() { "+" } else { "" };
    format!("{}{:.2} ({:.2}%)", sign, quote.change, quote.change_percent)
}
