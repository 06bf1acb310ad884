//! Coordination parameters for round timing and merge control.
//!
//! [`CoordinationParams`] groups the static parameters that control a
//! [`CoordinateUseCase`](crate::use_cases::coordinate::CoordinateUseCase)
//! round. These are application-layer concerns, not domain policy.

use council_domain::{ConsensusThreshold, PrefixSimilarity, ResolutionPolicy};
use council_domain::coordination::MAX_ACTION_ITEMS;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Coordination round control parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinationParams {
    /// Shared deadline for every advisor call of one round.
    pub deadline: Duration,
    /// Fraction of responding advisors that makes a recommendation consensus.
    pub consensus_threshold: ConsensusThreshold,
    /// How contested recommendations are settled.
    pub resolution_policy: ResolutionPolicy,
    /// Ask the primary advisor to help pick specialists.
    pub assisted_routing: bool,
    /// Bound on the assisted routing call.
    pub routing_timeout: Duration,
    /// Confidence attached to a successful advisor reply.
    pub default_confidence: f64,
    /// Maximum action items in a result.
    pub max_action_items: usize,
    /// Prefix length of the recommendation grouping signature.
    pub similarity_prefix_chars: usize,
}

impl Default for CoordinationParams {
    fn default() -> Self {
        Self {
            deadline: Duration::from_secs(25),
            consensus_threshold: ConsensusThreshold::default(),
            resolution_policy: ResolutionPolicy::default(),
            assisted_routing: true,
            routing_timeout: Duration::from_secs(5),
            default_confidence: 0.8,
            max_action_items: MAX_ACTION_ITEMS,
            similarity_prefix_chars: PrefixSimilarity::DEFAULT_CHARS,
        }
    }
}

impl CoordinationParams {
    // ==================== Builder Methods ====================

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn with_consensus_threshold(mut self, fraction: f64) -> Self {
        self.consensus_threshold = ConsensusThreshold::new(fraction);
        self
    }

    pub fn with_resolution_policy(mut self, policy: ResolutionPolicy) -> Self {
        self.resolution_policy = policy;
        self
    }

    pub fn with_assisted_routing(mut self, enabled: bool) -> Self {
        self.assisted_routing = enabled;
        self
    }

    pub fn with_routing_timeout(mut self, timeout: Duration) -> Self {
        self.routing_timeout = timeout;
        self
    }

    pub fn with_default_confidence(mut self, confidence: f64) -> Self {
        self.default_confidence = confidence.clamp(0.0, 1.0);
        self
    }

    pub fn with_max_action_items(mut self, max: usize) -> Self {
        self.max_action_items = max;
        self
    }

    pub fn with_similarity_prefix_chars(mut self, chars: usize) -> Self {
        self.similarity_prefix_chars = chars.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = CoordinationParams::default();
        assert_eq!(params.deadline, Duration::from_secs(25));
        assert_eq!(params.consensus_threshold.fraction(), 0.7);
        assert_eq!(params.resolution_policy, ResolutionPolicy::WeightedConsensus);
        assert!(params.assisted_routing);
        assert_eq!(params.routing_timeout, Duration::from_secs(5));
        assert_eq!(params.default_confidence, 0.8);
        assert_eq!(params.max_action_items, 5);
        assert_eq!(params.similarity_prefix_chars, 30);
    }

    #[test]
    fn test_builder_methods() {
        let params = CoordinationParams::default()
            .with_deadline(Duration::from_millis(200))
            .with_consensus_threshold(0.5)
            .with_resolution_policy(ResolutionPolicy::PrimaryAuthorityOverride)
            .with_assisted_routing(false)
            .with_default_confidence(1.7)
            .with_max_action_items(3)
            .with_similarity_prefix_chars(0);

        assert_eq!(params.deadline, Duration::from_millis(200));
        assert_eq!(params.consensus_threshold.fraction(), 0.5);
        assert_eq!(
            params.resolution_policy,
            ResolutionPolicy::PrimaryAuthorityOverride
        );
        assert!(!params.assisted_routing);
        assert_eq!(params.default_confidence, 1.0);
        assert_eq!(params.max_action_items, 3);
        assert_eq!(params.similarity_prefix_chars, 1);
    }
}
