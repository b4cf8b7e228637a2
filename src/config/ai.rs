//! Inference gateway configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::ai::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// OpenAI-compatible inference gateway configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Gateway API key
    pub api_key: Option<Secret<String>>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// HTTP timeout for one inference call, in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Attempts per inference call; 1 disables retry
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the first retry; doubles on each further retry
    #[serde(default = "default_retry_backoff")]
    pub retry_backoff_ms: u64,
}

impl AiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(|k| k.expose_secret().as_str())
            .filter(|k| !k.is_empty())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key().is_none() {
            return Err(ValidationError::MissingRequired("AI__API_KEY"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidInferenceUrl);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.max_attempts == 0 || self.max_attempts > 10 {
            return Err(ValidationError::InvalidMaxAttempts);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout(),
            max_attempts: default_max_attempts(),
            retry_backoff_ms: default_retry_backoff(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_max_attempts() -> u32 {
    1
}

fn default_retry_backoff() -> u64 {
    500
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> AiConfig {
        AiConfig {
            api_key: Some(Secret::new("lk-test".to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.base_url, "https://ai.gateway.lovable.dev/v1");
        assert_eq!(config.model, "google/gemini-2.5-flash");
        assert_eq!(config.max_attempts, 1);
        assert_eq!(config.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_api_key_required() {
        assert_eq!(
            AiConfig::default().validate(),
            Err(ValidationError::MissingRequired("AI__API_KEY"))
        );
        assert!(configured().validate().is_ok());
    }

    #[test]
    fn test_attempt_bounds() {
        let config = AiConfig {
            max_attempts: 0,
            ..configured()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidMaxAttempts));
    }

    #[test]
    fn test_base_url_scheme() {
        let config = AiConfig {
            base_url: "gateway.local/v1".into(),
            ..configured()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidInferenceUrl));
    }
}
