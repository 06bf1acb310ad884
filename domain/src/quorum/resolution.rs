//! Conflict records and resolution policies

use crate::advisor::AdvisorId;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// One advisor's position inside a conflict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictingView {
    pub advisor: AdvisorId,
    pub text: String,
    pub confidence: f64,
}

/// A recommendation group that several advisors touched without reaching
/// the consensus threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    /// Grouping signature shared by the views
    pub topic: String,
    pub views: Vec<ConflictingView>,
}

/// How contested recommendation groups are settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionPolicy {
    /// The most confident view wins (earliest view on ties)
    #[default]
    WeightedConsensus,
    /// The primary advisor's view wins; without it the conflict stays open
    PrimaryAuthorityOverride,
}

impl ResolutionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionPolicy::WeightedConsensus => "weighted_consensus",
            ResolutionPolicy::PrimaryAuthorityOverride => "primary_authority_override",
        }
    }

    /// Settle one conflict.
    ///
    /// Returns the human-readable resolution, or `None` if this policy leaves
    /// the conflict unresolved.
    pub fn resolve(&self, conflict: &Conflict, primary: AdvisorId) -> Option<String> {
        match self {
            ResolutionPolicy::WeightedConsensus => {
                let winner = conflict.views.iter().fold(None::<&ConflictingView>, |best, view| {
                    match best {
                        Some(b) if b.confidence >= view.confidence => Some(b),
                        _ => Some(view),
                    }
                })?;
                Some(format!("Resolved: {} (highest confidence)", winner.text))
            }
            ResolutionPolicy::PrimaryAuthorityOverride => conflict
                .views
                .iter()
                .find(|view| view.advisor == primary)
                .map(|view| format!("Resolved: {} (primary advisor authority)", view.text)),
        }
    }
}

impl std::fmt::Display for ResolutionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ResolutionPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "weighted_consensus" | "weighted" => Ok(ResolutionPolicy::WeightedConsensus),
            "primary_authority_override" | "primary" => {
                Ok(ResolutionPolicy::PrimaryAuthorityOverride)
            }
            other => Err(DomainError::UnknownPolicy(other.to_string())),
        }
    }
}
