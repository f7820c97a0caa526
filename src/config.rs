//! Configuration
//!
//! Loaded from a JSON file when one exists, then overridden by environment
//! variables

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen host
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Worker count (0 uses the number of CPU cores)
    #[serde(default)]
    pub workers: usize,
    /// Keep-alive for idle connections (seconds)
    #[serde(default = "default_keep_alive")]
    pub keep_alive_secs: u64,
    /// Time allowed for a client to send its request head (seconds)
    #[serde(default = "default_client_request_timeout")]
    pub client_request_timeout_secs: u64,
    /// Grace period for in-flight requests on shutdown (seconds)
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_secs: u64,
}

/// Outbound HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Request timeout (seconds)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Connect timeout (seconds)
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

/// Upstream providers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Open-Meteo geocoding search
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    /// Open-Meteo forecast
    #[serde(default = "default_weather_url")]
    pub weather_url: String,
    /// Yahoo Finance quote
    #[serde(default = "default_quote_url")]
    pub quote_url: String,
    /// Minimum gap between two quote requests (milliseconds)
    #[serde(default = "default_min_quote_interval")]
    pub min_quote_interval_ms: u64,
    /// Serve simulated quotes when the quote provider refuses or fails
    #[serde(default = "default_demo_fallback")]
    pub demo_fallback: bool,
}

/// Logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Application config
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub log: LogConfig,
}

// defaults
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 3000 }
fn default_keep_alive() -> u64 { 60 }
fn default_client_request_timeout() -> u64 { 10 }
fn default_shutdown_timeout() -> u64 { 30 }
fn default_timeout() -> u64 { 30 }
fn default_connect_timeout() -> u64 { 10 }
fn default_geocoding_url() -> String { "https://geocoding-api.open-meteo.com/v1/search".to_string() }
fn default_weather_url() -> String { "https://api.open-meteo.com/v1/forecast".to_string() }
fn default_quote_url() -> String { "https://query1.finance.yahoo.com/v7/finance/quote".to_string() }
fn default_min_quote_interval() -> u64 { 2000 }
fn default_demo_fallback() -> bool { true }
fn default_log_level() -> String { "info".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
            keep_alive_secs: default_keep_alive(),
            client_request_timeout_secs: default_client_request_timeout(),
            shutdown_timeout_secs: default_shutdown_timeout(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            geocoding_url: default_geocoding_url(),
            weather_url: default_weather_url(),
            quote_url: default_quote_url(),
            min_quote_interval_ms: default_min_quote_interval(),
            demo_fallback: default_demo_fallback(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl AppConfig {
    /// Load config from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load config: file first (defaults if none), then environment overrides
    ///
    /// Runs before the logger is up, so problems are collected as warnings
    /// for the caller to log.
    pub fn load() -> (Self, Vec<String>) {
        let mut warnings = Vec::new();
        let config_paths = ["config.json", "config/config.json"];

        let mut config = config_paths
            .iter()
            .filter(|path| Path::new(path).exists())
            .find_map(|path| match Self::from_file(path) {
                Ok(config) => Some(config),
                Err(e) => {
                    warnings.push(format!("failed to load config file {}: {}", path, e));
                    None
                }
            })
            .unwrap_or_default();

        warnings.extend(config.apply_env(|key| std::env::var(key).ok()));
        (config, warnings)
    }

    /// Apply `HOST`, `PORT`, `LOG_LEVEL`, `REQUEST_TIMEOUT_SECS` and
    /// `DEMO_FALLBACK`; invalid values are reported and ignored
    pub fn apply_env<F>(&mut self, lookup: F) -> Vec<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut warnings = Vec::new();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get("HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("PORT") {
            match port.trim().parse() {
                Ok(port) => self.server.port = port,
                Err(_) => warnings.push(format!("invalid PORT value {:?}, keeping {}", port, self.server.port)),
            }
        }
        if let Some(level) = get("LOG_LEVEL") {
            self.log.level = level;
        }
        if let Some(timeout) = get("REQUEST_TIMEOUT_SECS") {
            match timeout.trim().parse() {
                Ok(secs) => self.api.timeout_secs = secs,
                Err(_) => warnings.push(format!(
                    "invalid REQUEST_TIMEOUT_SECS value {:?}, keeping {}",
                    timeout, self.api.timeout_secs
                )),
            }
        }
        if let Some(flag) = get("DEMO_FALLBACK") {
            match parse_bool(&flag) {
                Some(enabled) => self.upstream.demo_fallback = enabled,
                None => warnings.push(format!(
                    "invalid DEMO_FALLBACK value {:?}, keeping {}",
                    flag, self.upstream.demo_fallback
                )),
            }
        }

        warnings
    }

    /// Server bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert_eq!(config.upstream.min_quote_interval_ms, 2000);
        assert!(config.upstream.demo_fallback);
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"server": {"port": 8088}, "upstream": {"demo_fallback": false}}"#)
                .unwrap();

        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(!config.upstream.demo_fallback);
        assert_eq!(
            config.upstream.quote_url,
            "https://query1.finance.yahoo.com/v7/finance/quote"
        );
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("LOG_LEVEL", "debug"),
            ("DEMO_FALLBACK", "off"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        let warnings = config.apply_env(|k| env.get(k).map(|v| v.to_string()));

        assert!(warnings.is_empty());
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
        assert_eq!(config.log.level, "debug");
        assert!(!config.upstream.demo_fallback);
    }

    #[test]
    fn test_invalid_env_values_are_ignored() {
        let env: HashMap<&str, &str> = [("PORT", "eighty"), ("REQUEST_TIMEOUT_SECS", "-1")]
            .into_iter()
            .collect();

        let mut config = AppConfig::default();
        let warnings = config.apply_env(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(warnings.len(), 2);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.api.timeout_secs, 30);
    }
}
