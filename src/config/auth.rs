//! Authentication configuration (HS256 shared-secret tokens)

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Bearer token validation settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// Signing secret shared with the identity provider
    pub jwt_secret: Option<Secret<String>>,

    /// Expected `iss` claim
    pub issuer: Option<String>,

    /// Expected `aud` claim
    pub audience: Option<String>,
}

impl AuthConfig {
    pub fn jwt_secret(&self) -> Option<&str> {
        self.jwt_secret
            .as_ref()
            .map(|s| s.expose_secret().as_str())
            .filter(|s| !s.is_empty())
    }

    /// Production requires a secret of at least 32 bytes.
    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        let secret = self
            .jwt_secret()
            .ok_or(ValidationError::MissingRequired("AUTH__JWT_SECRET"))?;

        if production && secret.len() < 32 {
            return Err(ValidationError::WeakJwtSecret);
        }
        Ok(())
    }
}
