//! Mock session validator for testing.
//!
//! # Example
//!
//! ```ignore
//! let validator = MockSessionValidator::new()
//!     .with_test_user("valid-token", "learner-1");
//!
//! let user = validator.validate("valid-token").await?;
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId, ValidationError};
use crate::ports::SessionValidator;

/// Maps fixed tokens to users. Unknown tokens return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    /// Returned for every validation when set.
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a user.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        if let Ok(mut tokens) = self.tokens.write() {
            tokens.insert(token.into(), user);
        }
        self
    }

    /// Adds a valid token for a learner with a derived email.
    ///
    /// Blank user ids are ignored, leaving the token invalid.
    pub fn with_test_user(self, token: impl Into<String>, user_id: impl Into<String>) -> Self {
        match test_user(user_id.into()) {
            Ok(user) => self.with_user(token, user),
            Err(_) => self,
        }
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        if let Ok(mut forced) = self.force_error.write() {
            *forced = Some(error);
        }
        self
    }
}

fn test_user(user_id: String) -> Result<AuthenticatedUser, ValidationError> {
    let email = format!("{}@test.example.com", user_id);
    Ok(AuthenticatedUser::new(UserId::new(user_id)?, Some(email)))
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let forced = self
            .force_error
            .read()
            .map_err(|_| AuthError::service_unavailable("mock validator lock poisoned"))?
            .clone();
        if let Some(error) = forced {
            return Err(error);
        }

        self.tokens
            .read()
            .map_err(|_| AuthError::service_unavailable("mock validator lock poisoned"))?
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn known_token_returns_user() {
        let validator = MockSessionValidator::new().with_test_user("tok", "learner-1");

        let user = validator.validate("tok").await.unwrap();
        assert_eq!(user.id.as_str(), "learner-1");
        assert_eq!(user.email.as_deref(), Some("learner-1@test.example.com"));
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let validator = MockSessionValidator::new().with_test_user("tok", "learner-1");
        assert_eq!(validator.validate("other").await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn forced_error_wins() {
        let validator = MockSessionValidator::new()
            .with_test_user("tok", "learner-1")
            .with_error(AuthError::TokenExpired);

        assert_eq!(validator.validate("tok").await, Err(AuthError::TokenExpired));
    }
}
