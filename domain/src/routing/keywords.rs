//! Heuristic routing tier.
//!
//! Pure keyword classification of a query into specialist advisors. A query
//! that mentions pain is branched by body location first; that branch
//! short-circuits the generic keyword sets.

use crate::advisor::AdvisorId;
use std::collections::BTreeSet;

const PAIN_WORDS: &[&str] = &[
    "pain", "painful", "hurt", "hurts", "hurting", "ache", "aching", "injured", "injury",
];

const ABDOMINAL_WORDS: &[&str] = &[
    "stomach", "abdomen", "abdominal", "belly", "gut", "cramp", "cramps", "side stitch",
];

const JOINT_WORDS: &[&str] = &[
    "knee", "knees", "shoulder", "shoulders", "elbow", "wrist", "ankle", "hip", "hips", "back",
    "neck", "joint",
];

const NUTRITION_WORDS: &[&str] = &[
    "diet", "nutrition", "eat", "eating", "food", "meal", "meals", "protein", "calorie",
    "calories", "carb", "carbs", "macro", "macros", "hydration", "water", "supplement",
    "supplements", "hungry",
];

const RECOVERY_WORDS: &[&str] = &[
    "recover", "recovery", "rest", "sleep", "tired", "fatigue", "fatigued", "sore", "soreness",
    "stretch", "stretching", "mobility", "foam roll",
];

const SAFETY_WORDS: &[&str] = &[
    "injury", "injured", "sprain", "strain", "safe", "safety", "form", "technique", "physio",
    "doctor",
];

const SCHEDULING_WORDS: &[&str] = &[
    "schedule", "plan", "program", "programme", "routine", "today", "tomorrow", "week", "weekly",
    "calendar", "workout", "workouts", "session", "when",
];

/// Result of the heuristic pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeuristicSelection {
    /// Selected specialists in canonical order
    pub advisors: BTreeSet<AdvisorId>,
    /// True when the pain/location branch decided the selection
    pub pain_branch: bool,
}

/// Keyword-based advisor classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicRouter;

impl HeuristicRouter {
    pub fn new() -> Self {
        Self
    }

    /// Classify a query: the pain branch first, then generic keywords.
    pub fn classify(&self, query: &str) -> HeuristicSelection {
        let words = tokenize(query);

        if let Some(advisors) = self.pain_branch(&words) {
            return HeuristicSelection {
                advisors,
                pain_branch: true,
            };
        }

        HeuristicSelection {
            advisors: self.keyword_pass(query),
            pain_branch: false,
        }
    }

    /// Generic keyword matching only, without the pain short-circuit.
    pub fn keyword_pass(&self, query: &str) -> BTreeSet<AdvisorId> {
        let words = tokenize(query);
        let table: [(AdvisorId, &[&str]); 4] = [
            (AdvisorId::Nutrition, NUTRITION_WORDS),
            (AdvisorId::Recovery, RECOVERY_WORDS),
            (AdvisorId::Safety, SAFETY_WORDS),
            (AdvisorId::Scheduling, SCHEDULING_WORDS),
        ];

        table
            .into_iter()
            .filter(|(_, vocabulary)| contains_any(&words, vocabulary))
            .map(|(advisor, _)| advisor)
            .collect()
    }

    fn pain_branch(&self, words: &[String]) -> Option<BTreeSet<AdvisorId>> {
        if !contains_any(words, PAIN_WORDS) {
            return None;
        }

        let advisors = if contains_any(words, ABDOMINAL_WORDS) {
            BTreeSet::from([AdvisorId::Nutrition, AdvisorId::Recovery])
        } else if contains_any(words, JOINT_WORDS) {
            BTreeSet::from([AdvisorId::Safety])
        } else {
            BTreeSet::from([AdvisorId::Recovery])
        };
        Some(advisors)
    }
}

/// Lower-cased words with surrounding punctuation removed
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|w| w.trim_matches('\'').to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Whole-word match; multi-word entries match consecutive words
fn contains_any(words: &[String], vocabulary: &[&str]) -> bool {
    vocabulary.iter().any(|entry| {
        let parts: Vec<&str> = entry.split_whitespace().collect();
        words
            .windows(parts.len())
            .any(|window| window.iter().zip(&parts).all(|(w, p)| w == p))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(q: &str) -> HeuristicSelection {
        HeuristicRouter::new().classify(q)
    }

    #[test]
    fn test_joint_pain_routes_to_safety() {
        let sel = classify("my knee hurts during squats");
        assert!(sel.pain_branch);
        assert_eq!(sel.advisors, BTreeSet::from([AdvisorId::Safety]));
    }

    #[test]
    fn test_abdominal_pain_routes_to_nutrition_and_recovery() {
        let sel = classify("I get stomach pain after my morning run");
        assert_eq!(
            sel.advisors,
            BTreeSet::from([AdvisorId::Nutrition, AdvisorId::Recovery])
        );
    }

    #[test]
    fn test_unlocated_pain_routes_to_recovery() {
        let sel = classify("everything hurts after yesterday");
        assert_eq!(sel.advisors, BTreeSet::from([AdvisorId::Recovery]));
    }

    #[test]
    fn test_pain_branch_short_circuits_keywords() {
        // "protein" and "today" would otherwise add nutrition and scheduling
        let sel = classify("my shoulder hurts, should I eat more protein today?");
        assert_eq!(sel.advisors, BTreeSet::from([AdvisorId::Safety]));
    }

    #[test]
    fn test_scheduling_keywords() {
        let sel = classify("what's my workout today");
        assert!(!sel.pain_branch);
        assert_eq!(sel.advisors, BTreeSet::from([AdvisorId::Scheduling]));
    }

    #[test]
    fn test_multiple_keyword_sets() {
        let sel = classify("How much protein should I eat and how much sleep do I need?");
        assert_eq!(
            sel.advisors,
            BTreeSet::from([AdvisorId::Recovery, AdvisorId::Nutrition])
        );
    }

    #[test]
    fn test_whole_words_only() {
        // "backpack" is not "back", "breakfast" is not "eat"
        let sel = classify("packing my backpack for breakfast");
        assert!(sel.advisors.is_empty());
    }

    #[test]
    fn test_multi_word_vocabulary() {
        assert!(
            HeuristicRouter::new()
                .keyword_pass("should I foam roll?")
                .contains(&AdvisorId::Recovery)
        );
    }

    #[test]
    fn test_deterministic() {
        let q = "plan my week of meals and rest days";
        assert_eq!(classify(q), classify(q));
    }
}
