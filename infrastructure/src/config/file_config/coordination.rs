//! Coordination configuration from TOML (`[coordination]` section)

use council_application::CoordinationParams;
use council_domain::{ConfigIssue, ConfigIssueCode, ConsensusThreshold, ResolutionPolicy, Severity};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw coordination configuration from TOML
///
/// # Example
///
/// ```toml
/// [coordination]
/// deadline_secs = 25
/// consensus_threshold = 0.7
/// resolution_policy = "weighted_consensus"   # or "primary_authority_override"
/// assisted_routing = true
/// routing_timeout_secs = 5
/// default_confidence = 0.8
/// max_action_items = 5
/// similarity_prefix_chars = 30
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCoordinationConfig {
    /// Shared deadline for all advisor calls of one round
    pub deadline_secs: u64,
    /// Fraction of responding advisors needed for consensus, in (0, 1]
    pub consensus_threshold: f64,
    /// "weighted_consensus" or "primary_authority_override"
    pub resolution_policy: String,
    /// Ask the primary advisor to help choose specialists
    pub assisted_routing: bool,
    pub routing_timeout_secs: u64,
    pub default_confidence: f64,
    pub max_action_items: usize,
    pub similarity_prefix_chars: usize,
}

impl Default for FileCoordinationConfig {
    fn default() -> Self {
        let params = CoordinationParams::default();
        Self {
            deadline_secs: params.deadline.as_secs(),
            consensus_threshold: params.consensus_threshold.fraction(),
            resolution_policy: params.resolution_policy.as_str().to_string(),
            assisted_routing: params.assisted_routing,
            routing_timeout_secs: params.routing_timeout.as_secs(),
            default_confidence: params.default_confidence,
            max_action_items: params.max_action_items,
            similarity_prefix_chars: params.similarity_prefix_chars,
        }
    }
}

impl FileCoordinationConfig {
    /// Parse resolution_policy, falling back to weighted consensus.
    ///
    /// Accepts: "weighted_consensus", "weighted", "primary_authority_override", "primary"
    pub fn parse_resolution_policy(&self) -> (ResolutionPolicy, Vec<ConfigIssue>) {
        match self.resolution_policy.parse::<ResolutionPolicy>() {
            Ok(policy) => (policy, vec![]),
            Err(_) => {
                let issue = ConfigIssue {
                    severity: Severity::Warning,
                    code: ConfigIssueCode::InvalidEnumValue {
                        field: "coordination.resolution_policy".to_string(),
                        value: self.resolution_policy.clone(),
                        valid_values: vec![
                            ResolutionPolicy::WeightedConsensus.as_str().to_string(),
                            ResolutionPolicy::PrimaryAuthorityOverride.as_str().to_string(),
                        ],
                    },
                    message: format!(
                        "coordination.resolution_policy: unknown value '{}', falling back to '{}'",
                        self.resolution_policy,
                        ResolutionPolicy::default()
                    ),
                };
                (ResolutionPolicy::default(), vec![issue])
            }
        }
    }

    /// Check numeric fields against their accepted ranges
    pub fn check_ranges(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if !ConsensusThreshold::is_valid(self.consensus_threshold) {
            issues.push(out_of_range(
                Severity::Error,
                "coordination.consensus_threshold",
                self.consensus_threshold,
                "must be in (0, 1]",
            ));
        }
        if self.deadline_secs == 0 {
            issues.push(out_of_range(
                Severity::Error,
                "coordination.deadline_secs",
                0.0,
                "must be greater than 0",
            ));
        }
        if !(0.0..=1.0).contains(&self.default_confidence) {
            issues.push(out_of_range(
                Severity::Warning,
                "coordination.default_confidence",
                self.default_confidence,
                "will be clamped to [0, 1]",
            ));
        }
        if self.max_action_items == 0 {
            issues.push(out_of_range(
                Severity::Warning,
                "coordination.max_action_items",
                0.0,
                "results will carry no action items",
            ));
        }

        issues
    }

    /// Convert into [`CoordinationParams`], reporting fallbacks taken
    pub fn to_params(&self) -> (CoordinationParams, Vec<ConfigIssue>) {
        let (policy, issues) = self.parse_resolution_policy();
        let params = CoordinationParams::default()
            .with_deadline(Duration::from_secs(self.deadline_secs))
            .with_consensus_threshold(self.consensus_threshold)
            .with_resolution_policy(policy)
            .with_assisted_routing(self.assisted_routing)
            .with_routing_timeout(Duration::from_secs(self.routing_timeout_secs))
            .with_default_confidence(self.default_confidence)
            .with_max_action_items(self.max_action_items)
            .with_similarity_prefix_chars(self.similarity_prefix_chars);
        (params, issues)
    }
}

fn out_of_range(severity: Severity, field: &str, value: f64, reason: &str) -> ConfigIssue {
    ConfigIssue {
        severity,
        code: ConfigIssueCode::OutOfRange {
            field: field.to_string(),
            value,
        },
        message: format!("{}: {} {}", field, value, reason),
    }
}
