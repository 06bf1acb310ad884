//! Coordinated result value object

use crate::action::ActionItem;
use crate::advisor::{AdvisorId, AdvisorSummary, AgentResponse};
use serde::{Deserialize, Serialize};

/// Final output of one coordination round (Value Object)
///
/// Built once per query and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinatedResult {
    /// The primary advisor's message
    pub primary_message: String,
    /// Every consulted advisor's response, placeholders included
    pub agent_insights: Vec<AgentResponse>,
    pub consensus_recommendations: Vec<String>,
    /// At most five items, most urgent first
    pub action_items: Vec<ActionItem>,
    pub conflicts_resolved: Vec<String>,
    /// Mean confidence over all responses, 0 when there are none
    pub confidence_score: f64,
    pub responding_agents: Vec<AdvisorSummary>,
}

impl CoordinatedResult {
    /// Look up the response of one advisor
    pub fn insight(&self, advisor: AdvisorId) -> Option<&AgentResponse> {
        self.agent_insights.iter().find(|r| r.advisor_id == advisor)
    }

    /// Number of advisors that answered without error
    pub fn succeeded_count(&self) -> usize {
        self.responding_agents.iter().filter(|a| a.succeeded).count()
    }
}

/// Arithmetic mean of response confidences (0 for no responses)
pub fn mean_confidence(responses: &[AgentResponse]) -> f64 {
    if responses.is_empty() {
        return 0.0;
    }
    responses.iter().map(|r| r.confidence).sum::<f64>() / responses.len() as f64
}

impl From<&AgentResponse> for AdvisorSummary {
    fn from(response: &AgentResponse) -> Self {
        Self {
            id: response.advisor_id,
            name: response.advisor_id.display_name().to_string(),
            confidence: response.confidence,
            succeeded: !response.is_error(),
        }
    }
}
