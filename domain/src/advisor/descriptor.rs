//! Advisor identity value objects

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Specialized advisors that can take part in a coordination round (Value Object)
///
/// The declaration order is the canonical order: it drives deterministic
/// routing output and is the final tie-break when ranking actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisorId {
    Safety,
    Recovery,
    Nutrition,
    Scheduling,
    Coach,
}

impl AdvisorId {
    /// The always-consulted, general-purpose advisor
    pub const PRIMARY: AdvisorId = AdvisorId::Coach;

    /// Every advisor in canonical order
    pub const ALL: [AdvisorId; 5] = [
        AdvisorId::Safety,
        AdvisorId::Recovery,
        AdvisorId::Nutrition,
        AdvisorId::Scheduling,
        AdvisorId::Coach,
    ];

    /// Advisors the assisted routing tier may pick from
    pub const SPECIALISTS: [AdvisorId; 4] = [
        AdvisorId::Safety,
        AdvisorId::Recovery,
        AdvisorId::Nutrition,
        AdvisorId::Scheduling,
    ];

    /// Advisors pinned by an emergency round
    pub const EMERGENCY: [AdvisorId; 3] =
        [AdvisorId::Safety, AdvisorId::Recovery, AdvisorId::Coach];

    /// Stable string key
    pub fn as_str(&self) -> &'static str {
        match self {
            AdvisorId::Safety => "safety",
            AdvisorId::Recovery => "recovery",
            AdvisorId::Nutrition => "nutrition",
            AdvisorId::Scheduling => "scheduling",
            AdvisorId::Coach => "coach",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            AdvisorId::Safety => "Safety Advisor",
            AdvisorId::Recovery => "Recovery Advisor",
            AdvisorId::Nutrition => "Nutrition Advisor",
            AdvisorId::Scheduling => "Scheduling Advisor",
            AdvisorId::Coach => "Head Coach",
        }
    }

    /// Confidence bonus applied to every action this advisor proposes.
    ///
    /// Only ever acts as a tie-break: a safety proposal outranks a coaching
    /// proposal of equal confidence.
    pub fn priority_weight(&self) -> f64 {
        match self {
            AdvisorId::Safety => 0.10,
            AdvisorId::Recovery => 0.05,
            AdvisorId::Nutrition => 0.0,
            AdvisorId::Scheduling => 0.0,
            AdvisorId::Coach => -0.05,
        }
    }

    pub fn is_primary(&self) -> bool {
        *self == Self::PRIMARY
    }
}

impl std::fmt::Display for AdvisorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AdvisorId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "safety" | "injury" => Ok(AdvisorId::Safety),
            "recovery" | "sleep" => Ok(AdvisorId::Recovery),
            "nutrition" | "diet" => Ok(AdvisorId::Nutrition),
            "scheduling" | "schedule" => Ok(AdvisorId::Scheduling),
            "coach" | "primary" | "general" => Ok(AdvisorId::Coach),
            other => Err(DomainError::UnknownAdvisor(other.to_string())),
        }
    }
}

/// Per-round summary of an advisor that was consulted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorSummary {
    pub id: AdvisorId,
    pub name: String,
    pub confidence: f64,
    pub succeeded: bool,
}
