//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::CommerceError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Missing or malformed caller identity.
    Unauthorized(String),
    /// Caller lacks the required role.
    Forbidden(String),
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// Business rule violation from the commerce layer.
    Commerce(CommerceError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Commerce(err) => commerce_error_to_response(err),
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn commerce_error_to_response(err: CommerceError) -> (StatusCode, String) {
    let status = match &err {
        CommerceError::ProductNotFound(_)
        | CommerceError::CartLineNotFound(_)
        | CommerceError::OrderNotFound(_)
        | CommerceError::PaymentNotFound(_) => StatusCode::NOT_FOUND,

        CommerceError::NotLineOwner(_) => StatusCode::FORBIDDEN,

        CommerceError::InvalidTransition { .. } => StatusCode::CONFLICT,

        CommerceError::InsufficientStock { .. }
        | CommerceError::EmptyCart
        | CommerceError::InvalidQuantity
        | CommerceError::BlankProductName
        | CommerceError::InvalidPrice
        | CommerceError::BlankPaymentMethod
        | CommerceError::InvalidAmount
        | CommerceError::DuplicatePayment(_)
        | CommerceError::AmountMismatch { .. }
        | CommerceError::AlreadyProcessed(_) => StatusCode::BAD_REQUEST,
    };
    (status, err.to_string())
}

impl From<CommerceError> for ApiError {
    fn from(err: CommerceError) -> Self {
        ApiError::Commerce(err)
    }
}
