//! Action item value object and ranking helpers

use super::kind::{ActionType, MessageSignals};
use crate::advisor::AdvisorId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::cmp::Ordering;

/// Where an action item came from inside a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOrigin {
    /// A catalog pattern matched the text
    Pattern,
    /// Proposed by the contextual fallback pass
    Fallback,
}

impl ActionOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionOrigin::Pattern => "pattern",
            ActionOrigin::Fallback => "fallback",
        }
    }
}

/// A structured, typed proposal derived from an advisor's free text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    pub id: String,
    #[serde(rename = "type")]
    pub action_type: ActionType,
    pub label: String,
    /// Lower is more urgent
    pub priority: u8,
    pub confidence: f64,
    pub source: AdvisorId,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

/// Everything needed to build an [`ActionItem`] besides its type
#[derive(Debug, Clone)]
pub struct ActionDraft<'a> {
    pub source: AdvisorId,
    pub signals: MessageSignals,
    pub exercises: &'a [String],
    pub origin: ActionOrigin,
    pub matched: Option<&'a str>,
}

impl ActionItem {
    /// Build an item with the catalog metadata and the signal-adjusted priority.
    ///
    /// `ordinal` disambiguates the id within one response.
    pub fn build(
        action_type: ActionType,
        confidence: f64,
        ordinal: usize,
        draft: &ActionDraft<'_>,
    ) -> Self {
        let meta = action_type.metadata();

        let mut metadata = Map::new();
        metadata.insert("icon".to_string(), json!(meta.icon));
        metadata.insert("color".to_string(), json!(meta.color));
        metadata.insert("exercises".to_string(), json!(draft.exercises));
        metadata.insert("pain_context".to_string(), json!(draft.signals.pain));
        metadata.insert(
            "modification_context".to_string(),
            json!(draft.signals.modification),
        );
        metadata.insert("origin".to_string(), json!(draft.origin.as_str()));
        if let Some(matched) = draft.matched {
            metadata.insert("matched".to_string(), json!(matched));
        }

        Self {
            id: format!(
                "{}-{}-{}",
                draft.source.as_str(),
                action_type.as_str(),
                ordinal
            ),
            action_type,
            label: meta.label.to_string(),
            priority: action_type.priority(draft.signals),
            confidence: confidence.clamp(0.0, 1.0),
            source: draft.source,
            metadata,
        }
    }

    pub fn exercises(&self) -> Vec<String> {
        self.metadata
            .get("exercises")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn has_pain_context(&self) -> bool {
        self.metadata
            .get("pain_context")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

/// Ranking order: ascending priority, then descending confidence,
/// then canonical advisor order.
pub fn rank(a: &ActionItem, b: &ActionItem) -> Ordering {
    a.priority
        .cmp(&b.priority)
        .then_with(|| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.source.cmp(&b.source))
}

/// Sort by [`rank`] and keep at most `limit` items
pub fn sort_and_truncate(items: &mut Vec<ActionItem>, limit: usize) {
    items.sort_by(rank);
    items.truncate(limit);
}
