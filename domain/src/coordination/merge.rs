//! Cross-advisor action merge

use crate::action::{ActionItem, PatternActionExtractor, sort_and_truncate};
use crate::advisor::AgentResponse;
use crate::core::query::Context;
use std::collections::HashMap;

/// Default number of action items in a coordinated result
pub const MAX_ACTION_ITEMS: usize = 5;

/// Extract actions from every successful response and merge them.
///
/// Each action's confidence receives its source advisor's priority weight,
/// clamped to [0, 1]. One item survives per action type: the most confident,
/// or the earliest in `responses` order on ties. The survivors are ranked and
/// cut to `limit`.
pub fn merge_actions(
    responses: &[AgentResponse],
    extractor: &PatternActionExtractor,
    context: &Context,
    limit: usize,
) -> Vec<ActionItem> {
    let mut merged: Vec<ActionItem> = Vec::new();
    let mut by_type = HashMap::new();

    for response in responses.iter().filter(|r| !r.is_error()) {
        let weight = response.advisor_id.priority_weight();

        for mut item in extractor.extract(&response.message, response.advisor_id, context) {
            item.confidence = (item.confidence + weight).clamp(0.0, 1.0);

            match by_type.get(&item.action_type) {
                Some(&i) => {
                    let existing: &mut ActionItem = &mut merged[i];
                    if item.confidence > existing.confidence {
                        *existing = item;
                    }
                }
                None => {
                    by_type.insert(item.action_type, merged.len());
                    merged.push(item);
                }
            }
        }
    }

    sort_and_truncate(&mut merged, limit);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionType;
    use crate::advisor::AdvisorId;

    fn merge(responses: &[AgentResponse]) -> Vec<ActionItem> {
        merge_actions(
            responses,
            &PatternActionExtractor::new(),
            &Context::new(),
            MAX_ACTION_ITEMS,
        )
    }

    #[test]
    fn test_safety_wins_tie_on_same_type() {
        let text = "You should take a rest day tomorrow.";
        let responses = vec![
            AgentResponse::success(AdvisorId::Safety, text, 0.8),
            AgentResponse::success(AdvisorId::Coach, text, 0.8),
        ];
        let items = merge(&responses);

        let rest: Vec<_> = items
            .iter()
            .filter(|i| i.action_type == ActionType::ScheduleRest)
            .collect();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].source, AdvisorId::Safety);
    }

    #[test]
    fn test_weight_is_applied_and_clamped() {
        let responses = vec![AgentResponse::success(
            AdvisorId::Safety,
            "Take a rest day.",
            0.9,
        )];
        let items = merge(&responses);
        let base = ActionType::ScheduleRest.metadata().base_confidence;
        let expected = (base + AdvisorId::Safety.priority_weight()).min(1.0);
        let rest = items
            .iter()
            .find(|i| i.action_type == ActionType::ScheduleRest)
            .unwrap();
        assert!((rest.confidence - expected).abs() < 1e-9);
        assert!(items.iter().all(|i| (0.0..=1.0).contains(&i.confidence)));
    }

    #[test]
    fn test_placeholders_are_skipped() {
        let responses = vec![
            AgentResponse::timeout(AdvisorId::Safety),
            AgentResponse::failure(AdvisorId::Recovery, "take a rest day"),
        ];
        assert!(merge(&responses).is_empty());
    }

    #[test]
    fn test_limit_and_order() {
        let text = "Cancel today's workout, take a rest day, reduce intensity next week, \
                    add an exercise like lunges, reschedule the long run and eat more protein.";
        let responses = vec![
            AgentResponse::success(AdvisorId::Coach, text, 0.8),
            AgentResponse::success(AdvisorId::Nutrition, text, 0.8),
        ];
        let items = merge(&responses);
        assert!(items.len() <= MAX_ACTION_ITEMS);
        assert!(items.windows(2).all(|w| w[0].priority <= w[1].priority));
    }
}
