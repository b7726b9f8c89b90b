//! HTTP request handlers for the Party Orchestration Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::Party;
use crate::orders::{OrchestrationOptions, build_party_orders};

use super::request::OrchestrationRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/orchestrate", post(orchestrate_handler))
        .with_state(state)
}

/// Handler for POST /orchestrate endpoint.
///
/// Accepts a party snapshot and returns the orchestration result with
/// order drafts, voucher usage, loyalty points, and the audit trace.
async fn orchestrate_handler(
    State(state): State<AppState>,
    payload: Result<Json<OrchestrationRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing orchestration request");

    // Handle JSON parsing errors
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // Get the body text which contains the detailed error from serde
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    // Check if it's a missing field error
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
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
                JsonRejection::MissingJsonContentType(_) => ApiError::new(
                    "MISSING_CONTENT_TYPE",
                    "Content-Type must be application/json",
                ),
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    // Convert request types to domain types
    let mut party: Party = request.party.into();
    let options: OrchestrationOptions = request
        .options
        .map(|opts| opts.into_options(Utc::now().date_naive()))
        .unwrap_or_else(|| OrchestrationOptions::new(Utc::now().date_naive()));

    // Perform the orchestration
    match build_party_orders(&mut party, state.config().config(), &options) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                party_id = %result.party_id,
                order_count = result.orders.len(),
                total_revenue = %result.totals.total_revenue,
                voucher_amount = %result.totals.voucher_amount,
                duration_us = result.audit_trace.duration_us,
                "Orchestration completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(result),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                party_id = %party.id,
                error = %err,
                "Orchestration failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}
