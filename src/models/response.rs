//! API response envelope
//!
//! Every endpoint answers with the same JSON shape

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Unified API response
///
/// - success: whether the request succeeded
/// - data: payload (present on success)
/// - message: status message
/// - code: HTTP status (errors only)
/// - timestamp: response time, RFC 3339 UTC
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    /// Build a success response
    ///
    /// # Arguments
    /// - data: response payload
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: "Success".to_string(),
            code: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    /// Build an error response
    ///
    /// # Arguments
    /// - message: error text
    /// - code: HTTP status sent with it
    pub fn error(message: String, code: u16) -> Self {
        Self {
            success: false,
            data: None,
            message,
            code: Some(code),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}
