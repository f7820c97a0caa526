//! Error model
//!
//! Every failure the services can report is an `ApiError`: the origin
//! service, a human message and a numeric code. The kind tells the HTTP
//! layer which status family to answer with.

use actix_web::http::StatusCode;
use thiserror::Error;

/// Error category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad request, rejected before any network call
    InvalidInput,
    /// The upstream provider had no matching entity
    NotFound,
    /// Non-200 upstream status or transport failure
    Upstream,
    /// Upstream body could not be decoded
    Parse,
}

/// Tagged API error
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{service} API error ({code}): {message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub service: String,
    pub message: String,
    pub code: u16,
}

impl ApiError {
    pub fn new(
        kind: ErrorKind,
        service: impl Into<String>,
        message: impl Into<String>,
        code: u16,
    ) -> Self {
        Self {
            kind,
            service: service.into(),
            message: message.into(),
            code,
        }
    }

    pub fn invalid_input(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, service, message, 400)
    }

    pub fn not_found(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, service, message, 404)
    }

    /// Upstream answered with a non-200 status; a 404 counts as not found
    pub fn upstream_status(service: impl Into<String>, status: u16) -> Self {
        let kind = if status == 404 {
            ErrorKind::NotFound
        } else {
            ErrorKind::Upstream
        };
        Self::new(
            kind,
            service,
            format!("API returned status {}", status),
            status,
        )
    }

    /// Upstream could not be reached at all
    pub fn transport(service: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::new(
            ErrorKind::Upstream,
            service,
            format!("Failed to make request: {}", cause),
            500,
        )
    }

    pub fn parse(service: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::new(
            ErrorKind::Parse,
            service,
            format!("Failed to parse response: {}", cause),
            500,
        )
    }

    /// HTTP status the boundary layer answers with
    ///
    /// Upstream statuses are passed through only when they still make sense
    /// to our own caller (auth, throttling, server errors); anything else
    /// becomes 502.
    pub fn status_code(&self) -> StatusCode {
        let code = match self.kind {
            ErrorKind::InvalidInput => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Parse => 500,
            ErrorKind::Upstream => match self.code {
                401 | 403 | 429 => self.code,
                c if (500..600).contains(&c) => c,
                _ => 502,
            },
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}
