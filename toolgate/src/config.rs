//! Configuration for the tool layer.
//!
//! Values can be given as JSON (every field has a default) or read from the
//! process environment with [`ToolflowConfig::from_env`].

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolflowConfig {
    /// Completion endpoint used by copy generation.
    #[serde(default)]
    pub completion: CompletionConfig,
    /// Logging setup.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ToolflowConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads overrides from environment variables.
    ///
    /// `OPENAI_API_KEY`, `TOOLGATE_MODEL`, `TOOLGATE_BASE_URL`,
    /// `TOOLGATE_TIMEOUT_SECONDS`, `TOOLGATE_LOG` and `TOOLGATE_LOG_JSON`
    /// are recognised; anything unset keeps its default.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ToolflowConfig::from_env`] with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(key) = lookup("OPENAI_API_KEY").filter(|k| !k.is_empty()) {
            config.completion.api_key = Some(key);
        }
        if let Some(model) = lookup("TOOLGATE_MODEL") {
            config.completion.model = model;
        }
        if let Some(url) = lookup("TOOLGATE_BASE_URL") {
            config.completion.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = lookup("TOOLGATE_TIMEOUT_SECONDS")
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|s| Duration::try_from_secs_f64(*s).is_ok())
        {
            config.completion.timeout_seconds = secs;
        }
        if let Some(level) = lookup("TOOLGATE_LOG") {
            config.logging.level = level;
        }
        if let Some(json) = lookup("TOOLGATE_LOG_JSON") {
            config.logging.json = matches!(json.as_str(), "1" | "true" | "yes");
        }

        config
    }
}

/// Configuration for the completion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// API key sent as a bearer token.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Model name.
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL of the OpenAI-compatible API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: f64,
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout() -> f64 {
    60.0
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl CompletionConfig {
    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Returns the timeout as a duration.
    ///
    /// Negative, non-finite or out-of-range values fall back to the default.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout_seconds)
            .unwrap_or_else(|_| Duration::from_secs_f64(default_timeout()))
    }
}

/// Configuration for log output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ToolflowConfig::new();
        assert_eq!(config.completion.model, "gpt-4o-mini");
        assert_eq!(config.completion.base_url, "https://api.openai.com/v1");
        assert!(config.completion.api_key.is_none());
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_deserialize_partial_json() {
        let config: ToolflowConfig =
            serde_json::from_str(r#"{"completion": {"model": "gpt-4o"}}"#).unwrap();
        assert_eq!(config.completion.model, "gpt-4o");
        assert_eq!(config.completion.timeout_seconds, 60.0);
    }

    #[test]
    fn test_from_lookup() {
        let env: HashMap<&str, &str> = [
            ("OPENAI_API_KEY", "sk-test"),
            ("TOOLGATE_BASE_URL", "http://localhost:8080/v1/"),
            ("TOOLGATE_LOG_JSON", "true"),
            ("TOOLGATE_TIMEOUT_SECONDS", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let config = ToolflowConfig::from_lookup(|k| env.get(k).map(|v| (*v).to_string()));
        assert_eq!(config.completion.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.completion.base_url, "http://localhost:8080/v1");
        assert_eq!(config.completion.timeout_seconds, 60.0);
        assert!(config.logging.json);
    }

    #[test]
    fn test_unusable_timeout_falls_back_to_default() {
        for raw in ["inf", "NaN", "-3", "1e30"] {
            let config = ToolflowConfig::from_lookup(|k| {
                (k == "TOOLGATE_TIMEOUT_SECONDS").then(|| raw.to_string())
            });
            assert_eq!(config.completion.timeout_seconds, 60.0, "input {raw}");
            assert_eq!(config.completion.timeout(), Duration::from_secs(60));
        }

        let config = CompletionConfig {
            timeout_seconds: f64::INFINITY,
            ..CompletionConfig::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(60));

        let config = ToolflowConfig::from_lookup(|k| {
            (k == "TOOLGATE_TIMEOUT_SECONDS").then(|| "2.5".to_string())
        });
        assert_eq!(config.completion.timeout(), Duration::from_millis(2500));
    }

    #[test]
    fn test_api_key_not_serialized() {
        let config = CompletionConfig::default().with_api_key("secret");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
    }
}
