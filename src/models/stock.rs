//! Stock data models
//!
//! Canonical stock quote plus the raw Yahoo Finance shapes it is mapped from

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{null_as_default, ResponseMetadata};
use crate::error::ApiError;

pub const YAHOO_SOURCE: &str = "Yahoo Finance";

/// Trading session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarketState {
    Regular,
    Pre,
    Post,
    Closed,
}

impl MarketState {
    /// Map the provider's market state string; unknown values are treated as closed
    pub fn from_upstream(value: &str) -> Self {
        match value {
            "REGULAR" => Self::Regular,
            "PRE" => Self::Pre,
            "POST" => Self::Post,
            _ => Self::Closed,
        }
    }

    /// Human readable label used in summaries
    pub fn label(&self) -> &'static str {
        match self {
            Self::Regular => "Market Open",
            Self::Pre => "Pre-Market",
            Self::Post => "After Hours",
            Self::Closed => "Market Closed",
        }
    }
}

/// Stock quote
///
/// Canonical quote returned by the stock endpoints, whether it came from the
/// live provider or from demo mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockQuote {
    /// Ticker, 1-5 uppercase letters
    pub symbol: String,
    pub company_name: String,
    pub price: f64,
    /// Absolute change against the previous close
    pub change: f64,
    /// Change in percent
    pub change_percent: f64,
    pub previous_close: f64,
    pub volume: i64,
    /// Market capitalization (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<i64>,
    pub market_state: MarketState,
    pub currency: String,
    pub metadata: ResponseMetadata,
}

impl StockQuote {
    pub fn is_positive_change(&self) -> bool {
        self.change > 0.0
    }

    /// "up", "down" or "neutral"
    pub fn change_direction(&self) -> &'static str {
        if self.change > 0.0 {
            "up"
        } else if self.change < 0.0 {
            "down"
        } else {
            "neutral"
        }
    }
}

/// Yahoo Finance `v7/finance/quote` response
#[derive(Debug, Deserialize)]
pub struct YahooQuoteEnvelope {
    #[serde(rename = "quoteResponse")]
    pub quote_response: YahooQuoteResponse,
}

#[derive(Debug, Deserialize)]
pub struct YahooQuoteResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub result: Vec<YahooQuote>,
}

/// One quote result; null and missing values decode as zero or empty
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct YahooQuote {
    #[serde(deserialize_with = "null_as_default")]
    pub symbol: String,
    pub short_name: Option<String>,
    pub long_name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub regular_market_price: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub regular_market_change: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub regular_market_change_percent: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub regular_market_previous_close: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub regular_market_volume: i64,
    pub market_cap: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub currency: String,
    #[serde(deserialize_with = "null_as_default")]
    pub market_state: String,
    /// Unix seconds
    #[serde(deserialize_with = "null_as_default")]
    pub regular_market_time: i64,
}

impl YahooQuoteEnvelope {
    /// Convert the first result into a canonical quote for `symbol`
    ///
    /// `symbol` is the normalized ticker that was requested; the provider's
    /// echo of it is not trusted.
    pub fn into_quote(self, symbol: &str) -> Result<StockQuote, ApiError> {
        let quote = self
            .quote_response
            .result
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::not_found(YAHOO_SOURCE, "No stock data found"))?;

        let mut quote = StockQuote::from(quote);
        quote.symbol = symbol.to_string();
        Ok(quote)
    }
}

impl From<YahooQuote> for StockQuote {
    fn from(quote: YahooQuote) -> Self {
        let company_name = quote
            .long_name
            .filter(|name| !name.is_empty())
            .or(quote.short_name)
            .unwrap_or_default();

        let timestamp = DateTime::<Utc>::from_timestamp(quote.regular_market_time, 0)
            .unwrap_or_default();

        Self {
            symbol: quote.symbol,
            company_name,
            price: quote.regular_market_price,
            change: quote.regular_market_change,
            change_percent: quote.regular_market_change_percent,
            previous_close: quote.regular_market_previous_close,
            volume: quote.regular_market_volume,
            market_cap: quote.market_cap.filter(|cap| *cap > 0),
            market_state: MarketState::from_upstream(&quote.market_state),
            currency: quote.currency,
            metadata: ResponseMetadata::new(timestamp, YAHOO_SOURCE),
        }
    }
}
