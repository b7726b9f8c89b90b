//! Response types for the Party Orchestration Engine API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

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
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
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
            EngineError::InvalidTierTable { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Invalid voucher tier table",
                    message,
                ),
            },
            EngineError::InvalidShippingConfig { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Invalid shipping configuration",
                    message,
                ),
            },
            EngineError::ProductNotFound { code } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "PRODUCT_NOT_FOUND",
                    format!("Product not found: {}", code),
                    format!("The product code '{}' is not in the catalog", code),
                ),
            },
            EngineError::InvalidParty { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "VALIDATION_ERROR",
                    format!("Invalid party field '{}'", field),
                    message,
                ),
            },
            EngineError::PartyAlreadyCompleted { party_id } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "PARTY_ALREADY_COMPLETED",
                    format!("Party '{}' is already completed", party_id),
                    "A completed party already has orders; no new orders are created",
                ),
            },
            EngineError::VoucherUnderused {
                voucher_amount,
                eligible_value,
            } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "VOUCHER_UNDERUSED",
                    "The host voucher cannot be fully used",
                    format!(
                        "Voucher of {} exceeds eligible product value of {}; add eligible products or allow the remainder to lapse",
                        voucher_amount, eligible_value
                    ),
                ),
            },
            EngineError::CalculationError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::new("CALCULATION_ERROR", message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_invalid_party_maps_to_bad_request() {
        let response: ApiErrorResponse = EngineError::InvalidParty {
            field: "guests".to_string(),
            message: "at least 3 guests are required".to_string(),
        }
        .into();

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.code, "VALIDATION_ERROR");
    }

    #[test]
    fn test_completed_party_maps_to_conflict() {
        let response: ApiErrorResponse = EngineError::PartyAlreadyCompleted {
            party_id: "PARTY-2025-0001".to_string(),
        }
        .into();

        assert_eq!(response.status, StatusCode::CONFLICT);
        assert_eq!(response.error.code, "PARTY_ALREADY_COMPLETED");
    }

    #[test]
    fn test_voucher_underused_maps_to_unprocessable() {
        let response: ApiErrorResponse = EngineError::VoucherUnderused {
            voucher_amount: Decimal::from(60),
            eligible_value: Decimal::from(20),
        }
        .into();

        assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.error.code, "VOUCHER_UNDERUSED");
    }

    #[test]
    fn test_config_errors_map_to_internal() {
        let response: ApiErrorResponse = EngineError::InvalidTierTable {
            message: "tier table must not be empty".to_string(),
        }
        .into();

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.error.code, "CONFIG_ERROR");
    }

    #[test]
    fn test_details_omitted_when_absent() {
        let error = ApiError::new("SOME_CODE", "message");
        let json = serde_json::to_value(&error).unwrap();
        assert!(json.get("details").is_none());
    }
}
