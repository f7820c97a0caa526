//! Yahoo Finance quote client
//!
//! Fetches `v7/finance/quote` for one ticker and maps it to a `StockQuote`

use std::sync::Arc;

use crate::error::ApiError;
use crate::models::{StockQuote, YahooQuoteEnvelope, YAHOO_SOURCE};
use crate::services::common::{build_url, fetch_json};
use crate::services::http_client::HttpFetcher;

const SERVICE: &str = "Stock";
const MAX_SYMBOL_LEN: usize = 5;

/// Validate a ticker and return it trimmed and uppercased
///
/// A ticker is 1-5 ASCII letters; surrounding whitespace is ignored.
pub fn validate_and_normalize_symbol(symbol: &str) -> Result<String, ApiError> {
    let symbol = symbol.trim();

    if symbol.is_empty() {
        return Err(ApiError::invalid_input(SERVICE, "Symbol cannot be empty"));
    }
    if symbol.chars().count() > MAX_SYMBOL_LEN {
        return Err(ApiError::invalid_input(
            SERVICE,
            "Symbol must be 1-5 characters long",
        ));
    }
    if !symbol.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ApiError::invalid_input(
            SERVICE,
            "Symbol must contain only letters",
        ));
    }

    Ok(symbol.to_ascii_uppercase())
}

pub struct QuoteClient {
    fetcher: Arc<dyn HttpFetcher>,
    base_url: String,
}

impl QuoteClient {
    pub fn new(fetcher: Arc<dyn HttpFetcher>, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
        }
    }

    /// Fetch a quote for an already normalized symbol
    pub async fn fetch(&self, symbol: &str) -> Result<StockQuote, ApiError> {
        let url = build_url(&self.base_url, &[("symbols", symbol)], YAHOO_SOURCE)?;
        let envelope: YahooQuoteEnvelope =
            fetch_json(self.fetcher.as_ref(), &url, YAHOO_SOURCE).await?;
        envelope.into_quote(symbol)
    }
}
