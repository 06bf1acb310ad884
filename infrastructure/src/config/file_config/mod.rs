//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod cache;
mod coordination;
mod output;
mod provider;

pub use cache::FileCacheConfig;
pub use coordination::FileCoordinationConfig;
pub use output::FileOutputConfig;
pub use provider::FileProviderConfig;

use council_domain::ConfigIssue;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration that could not be loaded or cannot be used
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Invalid configuration: {}", join_messages(.0))]
    Invalid(Vec<ConfigIssue>),
}

fn join_messages(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Round timing, consensus and merge settings
    pub coordination: FileCoordinationConfig,
    /// Response cache settings
    pub cache: FileCacheConfig,
    /// Chat completions provider
    pub provider: FileProviderConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. It checks:
    /// 1. Enum parse failures (resolution policy)
    /// 2. Numeric ranges of the coordination and cache sections
    /// 3. Empty provider fields
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.coordination.parse_resolution_policy().1);
        issues.extend(self.coordination.check_ranges());
        issues.extend(self.cache.validate());
        issues.extend(self.provider.validate());

        issues
    }

    /// Fail on error-level issues, handing back the warnings otherwise
    pub fn ensure_valid(&self) -> Result<Vec<ConfigIssue>, ConfigError> {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            self.validate().into_iter().partition(ConfigIssue::is_error);
        if errors.is_empty() {
            Ok(warnings)
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }
}
