//! Demo quotes
//!
//! Simulated quotes for a handful of well-known tickers, served when the
//! real quote provider refuses or fails. Values are seeded from the wall
//! clock minute, so repeated calls within a minute agree.

use chrono::{DateTime, Local, TimeZone, Timelike, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::ApiError;
use crate::models::{MarketState, ResponseMetadata, StockQuote};

pub const DEMO_SOURCE: &str = "Demo Mode (Simulated Data)";
const SERVICE: &str = "Demo Stock";

/// Static company data a simulated quote is built around
#[derive(Debug, Clone, Copy)]
struct DemoProfile {
    name: &'static str,
    base_price: f64,
    currency: &'static str,
    market_cap: i64,
}

fn demo_profile(symbol: &str) -> Option<DemoProfile> {
    let (name, base_price, market_cap) = match symbol {
        "DDOG" => ("Datadog, Inc.", 125.50, 40_000_000_000),
        "AAPL" => ("Apple Inc.", 175.25, 2_800_000_000_000),
        "GOOGL" => ("Alphabet Inc.", 142.75, 1_800_000_000_000),
        "MSFT" => ("Microsoft Corporation", 415.50, 3_100_000_000_000),
        "TSLA" => ("Tesla, Inc.", 248.75, 790_000_000_000),
        _ => return None,
    };

    Some(DemoProfile {
        name,
        base_price,
        currency: "USD",
        market_cap,
    })
}

/// Rough session by hour of day; no timezone or holiday handling
pub fn market_state_for_hour(hour: u32) -> MarketState {
    match hour {
        9..=15 => MarketState::Regular,
        4..=8 => MarketState::Pre,
        16..=19 => MarketState::Post,
        _ => MarketState::Closed,
    }
}

/// Simulated quote for `symbol` at the current local time
pub fn generate(symbol: &str) -> Result<StockQuote, ApiError> {
    generate_at(symbol, Local::now())
}

/// Simulated quote for `symbol` as of `now`
pub fn generate_at<Tz: TimeZone>(symbol: &str, now: DateTime<Tz>) -> Result<StockQuote, ApiError> {
    let profile = demo_profile(symbol)
        .ok_or_else(|| ApiError::not_found(SERVICE, "Stock symbol not found in demo data"))?;

    let seed = u64::from(now.hour() * 60 + now.minute()) + symbol.len() as u64;
    let mut rng = StdRng::seed_from_u64(seed);

    // ±5% around the base price
    let price = profile.base_price * (1.0 + (rng.gen::<f64>() - 0.5) * 0.1);
    // ±4% for the previous close
    let previous_close = profile.base_price * (1.0 + (rng.gen::<f64>() - 0.5) * 0.08);
    let change = price - previous_close;
    let change_percent = change / previous_close * 100.0;
    let volume = 500_000 + rng.gen_range(0..2_000_000i64);

    Ok(StockQuote {
        symbol: symbol.to_string(),
        company_name: profile.name.to_string(),
        price,
        change,
        change_percent,
        previous_close,
        volume,
        market_cap: Some(profile.market_cap),
        market_state: market_state_for_hour(now.hour()),
        currency: profile.currency.to_string(),
        metadata: ResponseMetadata::new(now.with_timezone(&Utc), DEMO_SOURCE),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn at(hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 14, hour, minute, second).unwrap()
    }

    #[test]
    fn test_same_minute_same_quote() {
        let a = generate_at("DDOG", at(10, 30, 5)).unwrap();
        let b = generate_at("DDOG", at(10, 30, 55)).unwrap();

        assert_eq!(a.price, b.price);
        assert_eq!(a.previous_close, b.previous_close);
        assert_eq!(a.volume, b.volume);
    }

    #[test]
    fn test_values_within_bounds() {
        for symbol in ["DDOG", "AAPL", "GOOGL", "MSFT", "TSLA"] {
            for minute in [0, 17, 42, 59] {
                let quote = generate_at(symbol, at(13, minute, 0)).unwrap();
                let base = demo_profile(symbol).unwrap().base_price;

                assert!(quote.price >= base * 0.95 && quote.price <= base * 1.05);
                assert!(quote.previous_close >= base * 0.96 && quote.previous_close <= base * 1.04);
                assert!((quote.change - (quote.price - quote.previous_close)).abs() < 1e-9);
                assert!(
                    (quote.change_percent - quote.change / quote.previous_close * 100.0).abs() < 1e-9
                );
                assert!((500_000..2_500_000).contains(&quote.volume));
                assert_eq!(quote.symbol, symbol);
                assert_eq!(quote.currency, "USD");
                assert_eq!(quote.metadata.source, DEMO_SOURCE);
            }
        }
    }

    #[test]
    fn test_profile_data() {
        let quote = generate_at("MSFT", at(12, 0, 0)).unwrap();
        assert_eq!(quote.company_name, "Microsoft Corporation");
        assert_eq!(quote.market_cap, Some(3_100_000_000_000));
        assert_eq!(quote.metadata.timestamp, at(12, 0, 0));
    }

    #[test]
    fn test_unknown_symbol() {
        let err = generate_at("NFLX", at(12, 0, 0)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.code, 404);
        assert_eq!(err.service, "Demo Stock");
    }

    #[test]
    fn test_market_state_bands() {
        let cases = vec![
            (0, MarketState::Closed),
            (3, MarketState::Closed),
            (4, MarketState::Pre),
            (8, MarketState::Pre),
            (9, MarketState::Regular),
            (15, MarketState::Regular),
            (16, MarketState::Post),
            (19, MarketState::Post),
            (20, MarketState::Closed),
            (23, MarketState::Closed),
        ];

        for (hour, expected) in cases {
            assert_eq!(market_state_for_hour(hour), expected, "hour {}", hour);
        }

        let quote = generate_at("TSLA", at(17, 45, 0)).unwrap();
        assert_eq!(quote.market_state, MarketState::Post);
    }
}
