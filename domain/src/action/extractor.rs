//! Pattern action extractor.
//!
//! Stateless classifier that turns one advisor reply into at most
//! [`MAX_ACTIONS_PER_RESPONSE`] [`ActionItem`]s.
//!
//! 1. Every catalog type is scanned in order; the first matching pattern of a
//!    type produces one item at the type's base confidence.
//! 2. When nothing matched, a contextual fallback proposes actions from the
//!    detected exercises and the pain/modification signals.
//! 3. Items are deduplicated by type, ranked and truncated.

use super::item::{ActionDraft, ActionItem, ActionOrigin, sort_and_truncate};
use super::kind::{ActionType, MessageSignals};
use super::vocabulary;
use crate::advisor::AdvisorId;
use crate::core::query::{Context, PAIN_REPORTED};

/// Upper bound on items extracted from a single response
pub const MAX_ACTIONS_PER_RESPONSE: usize = 5;

/// Extracts structured actions from advisor free text
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternActionExtractor;

impl PatternActionExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract actions from `message` as proposed by `source`.
    ///
    /// A `pain_reported` flag in the session context counts as pain
    /// vocabulary, so safety-first priorities apply even when the advisor
    /// phrased its reply neutrally.
    pub fn extract(&self, message: &str, source: AdvisorId, context: &Context) -> Vec<ActionItem> {
        let lower = message.to_lowercase();
        let mut signals = vocabulary::signals(&lower);
        signals.pain |= context.flag(PAIN_REPORTED);
        let exercises = vocabulary::detect_exercises(message);

        let mut items = Vec::new();
        for action_type in ActionType::ALL {
            let matched = action_type
                .patterns()
                .iter()
                .find_map(|pattern| pattern.find(&lower));

            if let Some(m) = matched {
                let draft = ActionDraft {
                    source,
                    signals,
                    exercises: &exercises,
                    origin: ActionOrigin::Pattern,
                    matched: Some(m.as_str()),
                };
                items.push(ActionItem::build(
                    action_type,
                    action_type.metadata().base_confidence,
                    items.len(),
                    &draft,
                ));
            }
        }

        if items.is_empty() {
            let draft = ActionDraft {
                source,
                signals,
                exercises: &exercises,
                origin: ActionOrigin::Fallback,
                matched: None,
            };
            for (action_type, confidence) in fallback_proposals(&lower, &exercises, signals) {
                items.push(ActionItem::build(action_type, confidence, items.len(), &draft));
            }
        }

        dedupe_by_type(&mut items);
        sort_and_truncate(&mut items, MAX_ACTIONS_PER_RESPONSE);
        items
    }
}

fn fallback_proposals(
    lower: &str,
    exercises: &[String],
    signals: MessageSignals,
) -> Vec<(ActionType, f64)> {
    let mut proposals = Vec::new();

    if !exercises.is_empty() {
        proposals.push((ActionType::AddExercise, 0.7));
        proposals.push((ActionType::ModifyExercise, 0.6));
        proposals.push((ActionType::ScheduleWorkout, 0.5));
    }

    if signals.pain {
        proposals.push((ActionType::RemoveExercise, 0.8));
        proposals.push((ActionType::SubstituteExercises, 0.8));
        proposals.push((ActionType::ScheduleRest, 0.7));
    }

    if signals.modification && lower.contains("increase") {
        proposals.push((ActionType::IncreaseIntensity, 0.7));
    }

    proposals
}

/// Keep the first item of each type
fn dedupe_by_type(items: &mut Vec<ActionItem>) {
    let mut seen = Vec::new();
    items.retain(|item| {
        if seen.contains(&item.action_type) {
            false
        } else {
            seen.push(item.action_type);
            true
        }
    });
}
