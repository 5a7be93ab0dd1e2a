// ABOUTME: Unified error type, error codes, and HTTP error body for the Wellness Pulse service
// ABOUTME: Maps error codes to HTTP status codes and renders a stable JSON error payload
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling
//!
//! Every fallible operation outside the upstream boundaries returns [`AppResult`].
//! Upstream failures (weather, LLM) are normally folded into in-band fallback data
//! and never reach the HTTP layer; the codes for them exist so the LLM provider can
//! classify what went wrong before the insight generator degrades gracefully.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation
    /// Request input could not be accepted
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput,

    // External services
    /// Upstream provider answered with an error
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError,
    /// Upstream provider could not be reached
    #[serde(rename = "EXTERNAL_SERVICE_UNAVAILABLE")]
    ExternalServiceUnavailable,
    /// Upstream provider rejected our credentials
    #[serde(rename = "EXTERNAL_AUTH_FAILED")]
    ExternalAuthFailed,
    /// Upstream provider throttled us
    #[serde(rename = "EXTERNAL_RATE_LIMITED")]
    ExternalRateLimited,

    // Configuration
    /// Generic configuration failure
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError,
    /// Configuration value is present but unusable
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid,

    // Internal
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError,
}

impl ErrorCode {
    /// HTTP status code for this error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidInput => 400,
            Self::ExternalServiceError | Self::ExternalServiceUnavailable => 502,
            Self::ExternalAuthFailed | Self::ExternalRateLimited => 503,
            Self::ConfigError | Self::ConfigInvalid | Self::InternalError => 500,
        }
    }

    /// User-facing description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::ExternalServiceError => "An external service encountered an error",
            Self::ExternalServiceUnavailable => "An external service is currently unavailable",
            Self::ExternalAuthFailed => "Authentication with external service failed",
            Self::ExternalRateLimited => "External service rate limit exceeded",
            Self::ConfigError => "Configuration error encountered",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal server error occurred",
        }
    }
}

/// Unified error type for the service
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new error with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Attach a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Internal server error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// External service error, prefixed with the service name
    #[must_use]
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// External service could not be reached at all
    #[must_use]
    pub fn external_unavailable(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceUnavailable,
            format!("{}: {}", service.into(), message.into()),
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// HTTP error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error payload
    pub error: ErrorResponseDetails,
}

/// Body of an [`ErrorResponse`]
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseDetails {
    /// Machine-readable code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            error: ErrorResponseDetails {
                code: error.code,
                message: error.message,
            },
        }
    }
}

#[cfg(feature = "http-response")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(code = ?self.code, "{}", self.message);
        } else {
            tracing::debug!(code = ?self.code, "{}", self.message);
        }

        (status, axum::Json(ErrorResponse::from(self))).into_response()
    }
}
