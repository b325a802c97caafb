//! Caller identity extraction.
//!
//! Authentication itself is an upstream concern: a gateway terminates
//! the session and injects the caller's identity as trusted headers.
//! Identity is passed explicitly into every handler as an extractor,
//! never read from ambient state.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use common::UserId;
use uuid::Uuid;

use crate::error::ApiError;

/// Header carrying the authenticated user's UUID.
pub const USER_HEADER: &str = "x-user-id";

/// Header carrying the authenticated user's role.
pub const ROLE_HEADER: &str = "x-user-role";

/// The caller's role as asserted by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Customer,
    Admin,
}

/// The authenticated caller.
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub user_id: UserId,
    pub role: Role,
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized(format!("missing {USER_HEADER} header")))?;

        let uuid = Uuid::parse_str(raw)
            .map_err(|_| ApiError::Unauthorized(format!("malformed {USER_HEADER} header")))?;

        let role = match parts.headers.get(ROLE_HEADER).and_then(|v| v.to_str().ok()) {
            Some(r) if r.eq_ignore_ascii_case("admin") => Role::Admin,
            _ => Role::Customer,
        };

        Ok(Identity {
            user_id: UserId::from_uuid(uuid),
            role,
        })
    }
}

/// Extractor for admin-only routes.
#[derive(Debug, Clone, Copy)]
pub struct AdminIdentity(pub Identity);

impl<S> FromRequestParts<S> for AdminIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let identity = Identity::from_request_parts(parts, state).await?;
        if identity.role != Role::Admin {
            return Err(ApiError::Forbidden("admin role required".to_string()));
        }
        Ok(AdminIdentity(identity))
    }
}
