//! Advisor response value object.
//!
//! Every advisor consulted in a round produces exactly one [`AgentResponse`],
//! including advisors that failed or ran out of time. Placeholders carry
//! `confidence = 0` and `data.error`.

use super::descriptor::AdvisorId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// `data.error` value used for deadline placeholders
pub const TIMEOUT_ERROR: &str = "timeout";

/// Maximum recommendations lifted out of a single reply
const MAX_RECOMMENDATIONS: usize = 8;

/// One advisor's contribution to a coordination round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResponse {
    pub advisor_id: AdvisorId,
    pub message: String,
    pub confidence: f64,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub data: Map<String, Value>,
    pub timestamp: DateTime<Utc>,
}

impl AgentResponse {
    /// Wrap a successful advisor reply.
    ///
    /// Recommendations are derived from the reply's bullet and numbered lines.
    pub fn success(advisor_id: AdvisorId, message: impl Into<String>, confidence: f64) -> Self {
        let message = message.into();
        let recommendations = extract_recommendations(&message);
        let mut data = Map::new();
        data.insert("cached".to_string(), json!(false));
        Self {
            advisor_id,
            message,
            confidence: confidence.clamp(0.0, 1.0),
            recommendations,
            data,
            timestamp: Utc::now(),
        }
    }

    /// Placeholder for an advisor that raised an error
    pub fn failure(advisor_id: AdvisorId, error: impl Into<String>) -> Self {
        let error = error.into();
        let message = format!(
            "{} is temporarily unavailable: {}",
            advisor_id.display_name(),
            error
        );
        Self::placeholder(advisor_id, message, error)
    }

    /// Placeholder for an advisor that missed the round deadline
    pub fn timeout(advisor_id: AdvisorId) -> Self {
        let message = format!("{} timed out", advisor_id.display_name());
        Self::placeholder(advisor_id, message, TIMEOUT_ERROR.to_string())
    }

    fn placeholder(advisor_id: AdvisorId, message: String, error: String) -> Self {
        let mut data = Map::new();
        data.insert("error".to_string(), Value::String(error));
        Self {
            advisor_id,
            message,
            confidence: 0.0,
            recommendations: Vec::new(),
            data,
            timestamp: Utc::now(),
        }
    }

    /// Mark a copy of this response as served from cache
    pub fn as_cached(&self) -> Self {
        let mut copy = self.clone();
        copy.data.insert("cached".to_string(), json!(true));
        copy
    }

    pub fn error(&self) -> Option<&str> {
        self.data.get("error").and_then(Value::as_str)
    }

    pub fn is_error(&self) -> bool {
        self.data.contains_key("error")
    }

    pub fn is_timeout(&self) -> bool {
        self.error() == Some(TIMEOUT_ERROR)
    }

    pub fn is_cached(&self) -> bool {
        self.data.get("cached").and_then(Value::as_bool).unwrap_or(false)
    }
}

/// Lift recommendation lines out of free text.
///
/// A recommendation is any line that starts with a bullet (`-`, `*`, `•`) or
/// an ordinal (`1.`, `2)`). Markdown bold markers are removed.
pub fn extract_recommendations(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(strip_list_marker)
        .map(|line| line.replace("**", "").trim().to_string())
        .filter(|line| !line.is_empty())
        .take(MAX_RECOMMENDATIONS)
        .collect()
}

fn strip_list_marker(line: &str) -> Option<&str> {
    let line = line.trim_start();

    for bullet in ["- ", "* ", "• "] {
        if let Some(rest) = line.strip_prefix(bullet) {
            return Some(rest);
        }
    }

    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let rest = &line[digits..];
    rest.strip_prefix(". ")
        .or_else(|| rest.strip_prefix(") "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response() {
        let r = AgentResponse::success(AdvisorId::Coach, "Keep going!", 0.8);
        assert_eq!(r.confidence, 0.8);
        assert!(!r.is_error());
        assert!(!r.is_cached());
    }

    #[test]
    fn test_confidence_clamped() {
        let r = AgentResponse::success(AdvisorId::Coach, "ok", 1.7);
        assert_eq!(r.confidence, 1.0);
    }

    #[test]
    fn test_failure_placeholder() {
        let r = AgentResponse::failure(AdvisorId::Nutrition, "connection refused");
        assert_eq!(r.confidence, 0.0);
        assert_eq!(r.error(), Some("connection refused"));
        assert!(r.message.contains("Nutrition Advisor"));
        assert!(r.recommendations.is_empty());
        assert!(!r.is_timeout());
    }

    #[test]
    fn test_timeout_placeholder() {
        let r = AgentResponse::timeout(AdvisorId::Safety);
        assert_eq!(r.confidence, 0.0);
        assert!(r.is_timeout());
        assert_eq!(r.message, "Safety Advisor timed out");
    }

    #[test]
    fn test_as_cached() {
        let r = AgentResponse::success(AdvisorId::Coach, "ok", 0.8);
        let cached = r.as_cached();
        assert!(cached.is_cached());
        assert_eq!(cached.message, r.message);
    }

    #[test]
    fn test_extract_recommendations() {
        let text = "Here is my advice:\n\
                    - Take a rest day tomorrow\n\
                    * **Ice the knee** for 15 minutes\n\
                    1. Swap squats for glute bridges\n\
                    2) See a physio if it persists\n\
                    3.5 kg is not a list item\n\
                    -not a bullet either";
        let recs = extract_recommendations(text);
        assert_eq!(
            recs,
            vec![
                "Take a rest day tomorrow",
                "Ice the knee for 15 minutes",
                "Swap squats for glute bridges",
                "See a physio if it persists",
            ]
        );
    }

    #[test]
    fn test_extract_recommendations_caps_count() {
        let text = (0..20).map(|i| format!("- item {i}")).collect::<Vec<_>>().join("\n");
        assert_eq!(extract_recommendations(&text).len(), MAX_RECOMMENDATIONS);
    }
}
