//! HTTP route handlers.

pub mod cart;
pub mod health;
pub mod metrics;
pub mod orders;
pub mod payments;
pub mod products;

use uuid::Uuid;

use crate::error::ApiError;

/// Parses a path or body segment as a UUID.
fn parse_uuid(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|e| ApiError::BadRequest(format!("Invalid ID format: {e}")))
}
