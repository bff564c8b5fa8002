//! HTTP request handlers for the PIT engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{compare_regimes, compute};
use crate::config::RegimeId;

use super::request::CalculateRequest;
use super::response::{ApiError, ApiErrorResponse, CompareResponse, RegimeListResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/compare", post(compare_handler))
        .route("/regimes", get(regimes_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a calculation request and returns the breakdown under the
/// requested regime.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let config = match request
        .calculation
        .validate()
        .and_then(|_| request.resolve_config(state.catalog()))
    {
        Ok(config) => config,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Rejected calculation request");
            return error_response(err.into());
        }
    };

    let start_time = Instant::now();
    let result = compute(&request.calculation, &config);
    let duration = start_time.elapsed();

    info!(
        correlation_id = %correlation_id,
        regime = %config.id,
        income_type = ?request.calculation.income_type,
        gross = %result.gross.round_dp(0),
        net = %result.net.round_dp(0),
        total_tax = %result.total_tax.round_dp(0),
        duration_us = duration.as_micros(),
        "Calculation completed successfully"
    );

    json_response(StatusCode::OK, result)
}

/// Handler for POST /compare endpoint.
///
/// Runs the request under every configured regime. The `regime` field is
/// ignored; `settings` overrides apply to every regime.
async fn compare_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing comparison request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let catalog = match request
        .calculation
        .validate()
        .and_then(|_| request.resolve_catalog(state.catalog()))
    {
        Ok(catalog) => catalog,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Rejected comparison request");
            return error_response(err.into());
        }
    };

    let outcomes = compare_regimes(&request.calculation, &catalog);
    info!(
        correlation_id = %correlation_id,
        regimes = outcomes.len(),
        "Comparison completed successfully"
    );

    json_response(StatusCode::OK, CompareResponse { outcomes })
}

/// Handler for GET /regimes endpoint.
async fn regimes_handler(State(state): State<AppState>) -> Response {
    let body = RegimeListResponse {
        default: RegimeId::DEFAULT,
        regimes: state.catalog().iter().cloned().collect(),
    };
    json_response(StatusCode::OK, body)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    json_response(api_error.status, api_error.error)
}

fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    error_response(ApiErrorResponse::bad_request(error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use rust_decimal::Decimal;
    use tower::ServiceExt;

    use crate::models::CalculationResult;

    async fn post_json(uri: &str, body: String) -> (StatusCode, Vec<u8>) {
        let router = create_router(AppState::default());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_calculate_returns_result() {
        let body = r#"{"income": "20000000", "income_type": "gross", "region": "I"}"#;
        let (status, bytes) = post_json("/calculate", body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        let result: CalculationResult = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(result.net, Decimal::from(17_780_000));
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let (status, bytes) = post_json("/calculate", "{invalid json".to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_income_returns_validation_error() {
        let body = r#"{"income_type": "gross"}"#;
        let (status, bytes) = post_json("/calculate", body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("income"));
    }

    #[tokio::test]
    async fn test_negative_income_returns_invalid_request() {
        let body = r#"{"income": "-1", "income_type": "gross"}"#;
        let (status, bytes) = post_json("/calculate", body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(error.code, "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_oversized_net_income_returns_invalid_request() {
        let body = r#"{"income": "50000000000000000000000000000", "income_type": "net"}"#;
        let (status, bytes) = post_json("/calculate", body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(error.code, "INVALID_REQUEST");
        assert!(error.message.contains("income"));
    }

    #[tokio::test]
    async fn test_regimes_lists_both_presets() {
        let router = create_router(AppState::default());
        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/regimes")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: RegimeListResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.default, RegimeId::Proposed2026);
        assert_eq!(body.regimes.len(), 2);
    }
}
