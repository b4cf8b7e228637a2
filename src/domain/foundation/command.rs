//! Per-request context handed to every application handler.
//!
//! Handlers never read the acting user from ambient state. The HTTP layer
//! builds a `CommandMetadata` from the authenticated session and passes it in.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Metadata context for command and query handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// The user the operation runs on behalf of.
    pub user_id: UserId,

    /// Links the log lines of a single user request.
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,

    /// Source of this command (e.g., "api", "test").
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl CommandMetadata {
    /// Creates new command metadata with required user ID.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            correlation_id: None,
            source: None,
        }
    }

    /// Builder: Add correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Builder: Add source identifier.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the correlation ID, generating one if not set.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    pub fn correlation_id_opt(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

#[cfg(test)]
impl CommandMetadata {
    /// Test fixture bound to a fixed learner.
    pub fn test_fixture() -> Self {
        Self::new(UserId::new("test-learner").unwrap())
            .with_correlation_id("test-correlation-id")
            .with_source("test")
    }
}
