//! Advisor provider configuration from TOML (`[provider]` section)

use crate::advisors::HttpAdvisorConfig;
use council_domain::{ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenAI-compatible chat completions provider.
///
/// ```toml
/// [provider]
/// base_url = "https://api.openai.com"
/// api_key_env = "OPENAI_API_KEY"
/// model = "gpt-4.1-mini"
/// max_tokens = 1024
/// temperature = 0.4
/// request_timeout_secs = 60
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Base URL of the API; `/v1/chat/completions` is appended
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Direct API key (prefer `api_key_env`)
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub request_timeout_secs: u64,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        let defaults = HttpAdvisorConfig::default();
        Self {
            base_url: defaults.base_url,
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            model: defaults.model,
            max_tokens: defaults.max_tokens,
            temperature: defaults.temperature,
            request_timeout_secs: defaults.request_timeout.as_secs(),
        }
    }
}

impl FileProviderConfig {
    /// Direct key first, then the named environment variable
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
    }

    pub fn to_gateway_config(&self) -> HttpAdvisorConfig {
        HttpAdvisorConfig {
            base_url: self.base_url.clone(),
            api_key: self.resolve_api_key(),
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        for (field, value) in [
            ("provider.model", &self.model),
            ("provider.base_url", &self.base_url),
        ] {
            if value.trim().is_empty() {
                issues.push(ConfigIssue {
                    severity: Severity::Error,
                    code: ConfigIssueCode::EmptyValue {
                        field: field.to_string(),
                    },
                    message: format!("{}: must not be empty", field),
                });
            }
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            issues.push(ConfigIssue {
                severity: Severity::Warning,
                code: ConfigIssueCode::OutOfRange {
                    field: "provider.temperature".to_string(),
                    value: f64::from(self.temperature),
                },
                message: format!(
                    "provider.temperature: {} is outside [0, 2] and may be rejected",
                    self.temperature
                ),
            });
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_key_wins() {
        let config = FileProviderConfig {
            api_key: Some("sk-direct".to_string()),
            api_key_env: "COUNCIL_TEST_UNSET_KEY_VAR".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key(), Some("sk-direct".to_string()));
    }

    #[test]
    fn test_missing_key() {
        let config = FileProviderConfig {
            api_key: Some("  ".to_string()),
            api_key_env: "COUNCIL_TEST_UNSET_KEY_VAR".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key(), None);
    }

    #[test]
    fn test_empty_model_is_error() {
        let config = FileProviderConfig {
            model: String::new(),
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
        assert_eq!(
            issues[0].code,
            ConfigIssueCode::EmptyValue {
                field: "provider.model".to_string()
            }
        );
    }

    #[test]
    fn test_gateway_config() {
        let config = FileProviderConfig {
            base_url: "http://localhost:8080".to_string(),
            request_timeout_secs: 7,
            ..Default::default()
        };
        let gateway = config.to_gateway_config();
        assert_eq!(gateway.endpoint(), "http://localhost:8080/v1/chat/completions");
        assert_eq!(gateway.request_timeout, Duration::from_secs(7));
    }
}
