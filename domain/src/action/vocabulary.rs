//! Message vocabulary detectors: pain, modification, and exercise names.

use super::kind::MessageSignals;
use regex::Regex;
use std::sync::LazyLock;

static PAIN_VOCABULARY: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:pain|painful|hurt|hurts|hurting|injur\w*|sore|soreness|ache|aching|sprain\w*|strain\w*|tweak\w*)\b",
    )
    .ok()
});

static MODIFICATION_VOCABULARY: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:increase|decrease|change|modify|adjust|reduce|swap|replace|progress)\b")
        .ok()
});

/// Catalog of recognised exercises: (canonical name, pattern)
const EXERCISE_CATALOG: &[(&str, &str)] = &[
    ("front squat", r"front\s+squats?"),
    ("squat", r"squats?"),
    ("romanian deadlift", r"romanian\s+deadlifts?"),
    ("deadlift", r"deadlifts?"),
    ("bench press", r"bench\s+press(?:es)?"),
    ("overhead press", r"overhead\s+press(?:es)?"),
    ("lunge", r"lunges?"),
    ("push-up", r"push[-\s]?ups?"),
    ("pull-up", r"pull[-\s]?ups?"),
    ("chin-up", r"chin[-\s]?ups?"),
    ("barbell row", r"barbell\s+rows?"),
    ("plank", r"planks?"),
    ("burpee", r"burpees?"),
    ("hip thrust", r"hip\s+thrusts?"),
    ("leg press", r"leg\s+press(?:es)?"),
    ("kettlebell swing", r"kettlebell\s+swings?"),
    ("box jump", r"box\s+jumps?"),
];

static EXERCISE_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    EXERCISE_CATALOG
        .iter()
        .filter_map(|(name, source)| {
            Regex::new(&format!(r"(?i)\b{source}\b"))
                .ok()
                .map(|re| (*name, re))
        })
        .collect()
});

/// True when the text mentions pain or injury
pub fn mentions_pain(text: &str) -> bool {
    PAIN_VOCABULARY.as_ref().is_some_and(|re| re.is_match(text))
}

/// True when the text asks for a change to the plan
pub fn mentions_modification(text: &str) -> bool {
    MODIFICATION_VOCABULARY
        .as_ref()
        .is_some_and(|re| re.is_match(text))
}

/// Compute both message signals
pub fn signals(text: &str) -> MessageSignals {
    MessageSignals {
        pain: mentions_pain(text),
        modification: mentions_modification(text),
    }
}

/// Exercises named in the text, canonical names in first-seen order.
///
/// A more specific entry (e.g. "front squat") claims its span, so the
/// generic entry ("squat") only counts when it appears on its own.
pub fn detect_exercises(text: &str) -> Vec<String> {
    let mut claimed: Vec<(usize, usize)> = Vec::new();
    let mut found: Vec<(usize, &'static str)> = Vec::new();

    for (name, re) in EXERCISE_PATTERNS.iter() {
        for m in re.find_iter(text) {
            let overlaps = claimed
                .iter()
                .any(|(start, end)| m.start() < *end && *start < m.end());
            if overlaps {
                continue;
            }
            claimed.push((m.start(), m.end()));
            if !found.iter().any(|(_, existing)| existing == name) {
                found.push((m.start(), name));
            }
        }
    }

    found.sort_by_key(|(position, _)| *position);
    found.into_iter().map(|(_, name)| name.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_compiles() {
        assert!(PAIN_VOCABULARY.is_some());
        assert!(MODIFICATION_VOCABULARY.is_some());
        assert_eq!(EXERCISE_PATTERNS.len(), EXERCISE_CATALOG.len());
    }

    #[test]
    fn test_pain_detection() {
        assert!(mentions_pain("My knee HURTS"));
        assert!(mentions_pain("I think I injured my back"));
        assert!(mentions_pain("slight soreness"));
        assert!(!mentions_pain("what's my workout today"));
        // Word boundaries: "painting" is not pain
        assert!(!mentions_pain("painting the garage"));
    }

    #[test]
    fn test_modification_detection() {
        assert!(mentions_modification("Increase the weight"));
        assert!(mentions_modification("maybe swap them"));
        assert!(!mentions_modification("keep going"));
    }

    #[test]
    fn test_detect_exercises_unique_in_order() {
        let found = detect_exercises("Do Push Ups, then squats, then more push-ups and a Plank");
        assert_eq!(found, vec!["push-up", "squat", "plank"]);
    }

    #[test]
    fn test_specific_names_win() {
        let found = detect_exercises("Swap front squats for Romanian deadlifts");
        assert_eq!(found, vec!["front squat", "romanian deadlift"]);

        let found = detect_exercises("front squat today, back squat tomorrow");
        assert_eq!(found, vec!["front squat", "squat"]);
    }

    #[test]
    fn test_multi_word_with_any_whitespace() {
        assert_eq!(detect_exercises("bench\n press"), vec!["bench press"]);
        assert!(detect_exercises("benchpress").is_empty());
    }
}
