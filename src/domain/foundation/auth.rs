//! Authentication types for the domain layer.
//!
//! An `AuthenticatedUser` is what remains of a bearer token once the
//! `SessionValidator` port has accepted it. Nothing here knows which identity
//! provider issued the token.

use super::UserId;
use thiserror::Error;

/// Authenticated user extracted from a validated token.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    /// The unique user identifier from the auth provider.
    pub id: UserId,

    /// Email claim, if the provider sent one.
    pub email: Option<String>,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, email: Option<String>) -> Self {
        Self { id, email }
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    /// The authentication service is unavailable (network, config, etc.).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should sign in again.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }
}
