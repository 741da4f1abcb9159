//! Assistant configuration.
//!
//! Settings come from three layers, later ones winning: built-in defaults,
//! a config file section (deserialized directly into [`AssistantConfig`]) and
//! `SRS_OLLAMA_*` environment variables.

use crate::{AssistantError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Ollama endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default model name.
pub const DEFAULT_MODEL: &str = "mistral";

/// Default request timeout in seconds. Local models can be slow to answer.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Environment variable overriding the endpoint.
pub const ENDPOINT_ENV: &str = "SRS_OLLAMA_URL";

/// Environment variable overriding the model.
pub const MODEL_ENV: &str = "SRS_OLLAMA_MODEL";

/// Environment variable overriding the timeout, in seconds.
pub const TIMEOUT_ENV: &str = "SRS_OLLAMA_TIMEOUT_SECS";

/// Connection settings for the model endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Base URL of the Ollama server
    pub endpoint: String,
    /// Model used for every request
    pub model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AssistantConfig {
    /// Starts a builder from the defaults.
    pub fn builder() -> AssistantConfigBuilder {
        AssistantConfigBuilder::default()
    }

    /// Builds a configuration from the defaults and the environment.
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides()
    }

    /// Applies `SRS_OLLAMA_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from any key lookup, then validates.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(endpoint) = lookup(ENDPOINT_ENV) {
            self.endpoint = endpoint;
        }
        if let Some(model) = lookup(MODEL_ENV) {
            self.model = model;
        }
        if let Some(timeout) = lookup(TIMEOUT_ENV) {
            self.timeout_secs = timeout.trim().parse().map_err(|_| {
                AssistantError::Config(format!("{TIMEOUT_ENV} must be a number of seconds, got '{timeout}'"))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Checks that the endpoint is an http(s) URL, the model is named and
    /// the timeout is positive.
    pub fn validate(&self) -> Result<()> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return Err(AssistantError::Config("endpoint must not be empty".into()));
        }
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(AssistantError::Config(format!(
                "endpoint must start with http:// or https://, got '{endpoint}'"
            )));
        }
        if self.model.trim().is_empty() {
            return Err(AssistantError::Config("model must not be empty".into()));
        }
        if self.timeout_secs == 0 {
            return Err(AssistantError::Config("timeout must be at least one second".into()));
        }
        Ok(())
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Full URL of the generate endpoint.
    pub fn generate_url(&self) -> String {
        format!("{}/api/generate", self.endpoint.trim().trim_end_matches('/'))
    }
}

/// Builder for [`AssistantConfig`].
#[derive(Debug, Clone, Default)]
pub struct AssistantConfigBuilder {
    config: AssistantConfig,
}

impl AssistantConfigBuilder {
    /// Sets the endpoint base URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    /// Sets the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_secs = timeout.as_secs();
        self
    }

    /// Validates and returns the configuration.
    pub fn build(self) -> Result<AssistantConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AssistantConfig::default();
        assert_eq!(config.endpoint, "http://localhost:11434");
        assert_eq!(config.model, "mistral");
        assert_eq!(config.timeout(), Duration::from_secs(120));
        assert_eq!(config.generate_url(), "http://localhost:11434/api/generate");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = AssistantConfig::builder()
            .endpoint("https://llm.internal:8443/")
            .model("llama2")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        assert_eq!(config.generate_url(), "https://llm.internal:8443/api/generate");
        assert_eq!(config.model, "llama2");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_builder_rejects_bad_values() {
        let err = AssistantConfig::builder().endpoint("localhost:11434").build();
        assert!(matches!(err, Err(AssistantError::Config(_))));

        let err = AssistantConfig::builder().model("  ").build();
        assert!(matches!(err, Err(AssistantError::Config(_))));

        let err = AssistantConfig::builder().timeout(Duration::ZERO).build();
        assert!(matches!(err, Err(AssistantError::Config(_))));
    }

    #[test]
    fn test_overrides() {
        let config = AssistantConfig::default()
            .with_overrides(lookup(&[
                (ENDPOINT_ENV, "http://gpu-box:11434"),
                (MODEL_ENV, "llama2"),
                (TIMEOUT_ENV, " 30 "),
            ]))
            .unwrap();
        assert_eq!(
            config,
            AssistantConfig {
                endpoint: "http://gpu-box:11434".into(),
                model: "llama2".into(),
                timeout_secs: 30,
            }
        );
    }

    #[test]
    fn test_overrides_reject_bad_timeout() {
        let err = AssistantConfig::default()
            .with_overrides(lookup(&[(TIMEOUT_ENV, "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains(TIMEOUT_ENV));
    }

    #[test]
    fn test_deserialize_partial_section() {
        let config: AssistantConfig = serde_json::from_str(r#"{"model": "llama2"}"#).unwrap();
        assert_eq!(config.model, "llama2");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }
}
