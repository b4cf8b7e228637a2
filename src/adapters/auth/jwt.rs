//! Shared-secret JWT session validator.
//!
//! Validates HS256 access tokens as issued by the hosted identity provider.
//! The `sub` claim becomes the `UserId`; `email` is optional.

use async_trait::async_trait;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Configuration for HS256 token validation.
#[derive(Clone)]
pub struct JwtConfig {
    secret: Secret<String>,
    /// Expected `iss`; unchecked when `None`.
    pub issuer: Option<String>,
    /// Expected `aud`; unchecked when `None`.
    pub audience: Option<String>,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Secret::new(secret.into()),
            issuer: None,
            audience: None,
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }
}

#[derive(Debug, Deserialize)]
struct AccessTokenClaims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
}

/// `SessionValidator` backed by a shared HMAC secret.
pub struct JwtSessionValidator {
    key: DecodingKey,
    validation: Validation,
}

impl JwtSessionValidator {
    pub fn new(config: JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        match &config.issuer {
            Some(iss) => validation.set_issuer(&[iss]),
            None => validation.iss = None,
        }
        match &config.audience {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }

        Self {
            key: DecodingKey::from_secret(config.secret.expose_secret().as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<AccessTokenClaims>(token, &self.key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => {
                    tracing::warn!("Token issued for another party: {}", e);
                    AuthError::InvalidToken
                }
                _ => {
                    tracing::debug!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            }
        })?;

        let user_id = UserId::new(&data.claims.sub).map_err(|_| {
            tracing::warn!("Token has blank subject");
            AuthError::InvalidToken
        })?;

        Ok(AuthenticatedUser::new(user_id, data.claims.email))
    }
}

impl std::fmt::Debug for JwtSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionValidator")
            .field("issuer", &self.validation.iss)
            .finish_non_exhaustive()
    }
}
