//! Business services
//!
//! Upstream clients and the logic around them

pub mod common;
pub mod http_client;
pub mod stock;   // Yahoo Finance quotes with demo fallback
pub mod weather; // Open-Meteo geocoding and current conditions
