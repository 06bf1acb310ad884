//! Cache configuration from TOML (`[cache]` section)

use council_domain::{ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw response cache configuration from TOML
///
/// ```toml
/// [cache]
/// enabled = true
/// capacity = 512
/// ttl_secs = 3600          # 0 = no expiry
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCacheConfig {
    pub enabled: bool,
    pub capacity: usize,
    pub ttl_secs: u64,
}

impl Default for FileCacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: 512,
            ttl_secs: 3600,
        }
    }
}

impl FileCacheConfig {
    /// Entry lifetime; `None` when `ttl_secs = 0`
    pub fn ttl(&self) -> Option<Duration> {
        (self.ttl_secs > 0).then(|| Duration::from_secs(self.ttl_secs))
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        if self.enabled && self.capacity == 0 {
            return vec![ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::OutOfRange {
                    field: "cache.capacity".to_string(),
                    value: 0.0,
                },
                message: "cache.capacity: must be greater than 0 while the cache is enabled"
                    .to_string(),
            }];
        }
        vec![]
    }
}
