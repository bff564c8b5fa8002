//! Response types for the PIT engine API.
//!
//! This module defines the response bodies and the error handling for the
//! HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::calculation::RegimeOutcome;
use crate::config::{RegimeId, TaxConfig};
use crate::error::EngineError;

/// Response body for `POST /compare`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareResponse {
    /// One outcome per regime, oldest first.
    pub outcomes: Vec<RegimeOutcome>,
}

/// Response body for `GET /regimes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegimeListResponse {
    /// The regime used when a request names none.
    pub default: RegimeId,
    /// Every configured regime, oldest first.
    pub regimes: Vec<TaxConfig>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::RegimeNotFound { id } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "REGIME_NOT_FOUND",
                    format!("Tax regime not found: {}", id),
                    "Supported regimes are listed at GET /regimes",
                ),
            ),
            EngineError::InvalidConfig { field, message } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "INVALID_CONFIG",
                    format!("Invalid configuration field '{}': {}", field, message),
                    "The settings override contains an invalid value",
                ),
            ),
            EngineError::InvalidRequest { field, message } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "INVALID_REQUEST",
                    format!("Invalid request field '{}': {}", field, message),
                    "The calculation request contains an invalid value",
                ),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_regime_not_found_maps_to_bad_request() {
        let api_error: ApiErrorResponse = EngineError::RegimeNotFound {
            id: "2030".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "REGIME_NOT_FOUND");
        assert!(api_error.error.message.contains("2030"));
    }

    #[test]
    fn test_invalid_request_maps_to_bad_request() {
        let api_error: ApiErrorResponse = EngineError::InvalidRequest {
            field: "income".to_string(),
            message: "must not be negative".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_REQUEST");
    }

    #[test]
    fn test_config_errors_map_to_server_error() {
        let api_error: ApiErrorResponse = EngineError::ConfigNotFound {
            path: "/etc/regimes".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
    }
}
