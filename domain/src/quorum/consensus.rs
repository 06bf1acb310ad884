//! Consensus resolution across advisor responses
//!
//! Recommendations are grouped by a [`SimilarityKey`] signature. A group that
//! enough distinct advisors contributed to is consensus; a group touched by
//! several advisors that falls short is a [`Conflict`]. Groups with a single
//! advisor are neither and only surface through the raw responses.

use super::resolution::{Conflict, ConflictingView, ResolutionPolicy};
use super::similarity::{PrefixSimilarity, SimilarityKey};
use super::threshold::ConsensusThreshold;
use crate::advisor::{AdvisorId, AgentResponse};
use std::collections::HashMap;

/// Result of one consensus pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsensusOutcome {
    /// Representative text (first member) of every agreed group
    pub consensus: Vec<String>,
    /// Contested groups, in first-appearance order
    pub conflicts: Vec<Conflict>,
}

impl ConsensusOutcome {
    /// Apply a resolution policy to every conflict.
    ///
    /// Conflicts the policy leaves open are omitted.
    pub fn resolve_conflicts(&self, policy: ResolutionPolicy, primary: AdvisorId) -> Vec<String> {
        self.conflicts
            .iter()
            .filter_map(|conflict| policy.resolve(conflict, primary))
            .collect()
    }
}

struct Group {
    signature: String,
    views: Vec<ConflictingView>,
}

impl Group {
    fn distinct_advisors(&self) -> usize {
        let mut seen: Vec<AdvisorId> = Vec::with_capacity(self.views.len());
        for view in &self.views {
            if !seen.contains(&view.advisor) {
                seen.push(view.advisor);
            }
        }
        seen.len()
    }
}

/// Groups recommendations and splits them into consensus and conflicts
pub struct ConsensusResolver {
    threshold: ConsensusThreshold,
    similarity: Box<dyn SimilarityKey>,
}

impl ConsensusResolver {
    pub fn new(threshold: ConsensusThreshold) -> Self {
        Self {
            threshold,
            similarity: Box::new(PrefixSimilarity::default()),
        }
    }

    /// Replace the grouping signature
    pub fn with_similarity(mut self, similarity: impl SimilarityKey + 'static) -> Self {
        self.similarity = Box::new(similarity);
        self
    }

    pub fn threshold(&self) -> ConsensusThreshold {
        self.threshold
    }

    /// Resolve consensus over the `recommendations` of `responses`.
    ///
    /// The responding total excludes error and timeout placeholders. Output
    /// order follows the order of `responses`, so callers that sort their
    /// input get deterministic output.
    pub fn resolve(&self, responses: &[AgentResponse]) -> ConsensusOutcome {
        let responding = responses.iter().filter(|r| !r.is_error()).count();
        if responding == 0 {
            return ConsensusOutcome::default();
        }

        let mut groups: Vec<Group> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for response in responses.iter().filter(|r| !r.is_error()) {
            for recommendation in &response.recommendations {
                let signature = self.similarity.signature(recommendation);
                if signature.is_empty() {
                    continue;
                }
                let view = ConflictingView {
                    advisor: response.advisor_id,
                    text: recommendation.clone(),
                    confidence: response.confidence,
                };
                match index.get(&signature) {
                    Some(&i) => groups[i].views.push(view),
                    None => {
                        index.insert(signature.clone(), groups.len());
                        groups.push(Group {
                            signature,
                            views: vec![view],
                        });
                    }
                }
            }
        }

        let mut outcome = ConsensusOutcome::default();
        for group in groups {
            let advisors = group.distinct_advisors();
            if self.threshold.is_reached(advisors, responding) && advisors > 1 {
                outcome.consensus.push(group.views[0].text.clone());
            } else if advisors > 1 {
                outcome.conflicts.push(Conflict {
                    topic: group.signature,
                    views: group.views,
                });
            }
        }
        outcome
    }
}

impl Default for ConsensusResolver {
    fn default() -> Self {
        Self::new(ConsensusThreshold::default())
    }
}

impl std::fmt::Debug for ConsensusResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsensusResolver")
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}
