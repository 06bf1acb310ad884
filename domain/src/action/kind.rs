//! Action type catalog.
//!
//! Each [`ActionType`] carries a static metadata row (label, icon, color,
//! base priority, base confidence) and the ordered regular expressions that
//! recognise it in advisor text. Priorities are perturbed by two message
//! signals; see [`ActionType::priority`].

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Kinds of structured proposals that can be derived from advisor text
///
/// Declaration order is the scan order of the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    SubstituteExercises,
    RemoveExercise,
    CancelWorkout,
    ScheduleRest,
    DecreaseIntensity,
    IncreaseIntensity,
    ModifyExercise,
    AddExercise,
    RescheduleWorkout,
    ScheduleWorkout,
    AdjustNutrition,
    ApplySuggestion,
}

/// Static display and ranking data for an action type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionMetadata {
    pub label: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub base_priority: u8,
    pub base_confidence: f64,
}

/// Boolean signals computed once per message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageSignals {
    /// Pain or injury vocabulary is present
    pub pain: bool,
    /// Modification vocabulary ("increase", "change", ...) is present
    pub modification: bool,
}

/// Most urgent priority value
pub const MOST_URGENT: u8 = 1;
/// Least urgent priority value
pub const LEAST_URGENT: u8 = 5;

impl ActionType {
    pub const ALL: [ActionType; 12] = [
        ActionType::SubstituteExercises,
        ActionType::RemoveExercise,
        ActionType::CancelWorkout,
        ActionType::ScheduleRest,
        ActionType::DecreaseIntensity,
        ActionType::IncreaseIntensity,
        ActionType::ModifyExercise,
        ActionType::AddExercise,
        ActionType::RescheduleWorkout,
        ActionType::ScheduleWorkout,
        ActionType::AdjustNutrition,
        ActionType::ApplySuggestion,
    ];

    /// Stable snake_case key (used in action ids)
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::SubstituteExercises => "substitute_exercises",
            ActionType::RemoveExercise => "remove_exercise",
            ActionType::CancelWorkout => "cancel_workout",
            ActionType::ScheduleRest => "schedule_rest",
            ActionType::DecreaseIntensity => "decrease_intensity",
            ActionType::IncreaseIntensity => "increase_intensity",
            ActionType::ModifyExercise => "modify_exercise",
            ActionType::AddExercise => "add_exercise",
            ActionType::RescheduleWorkout => "reschedule_workout",
            ActionType::ScheduleWorkout => "schedule_workout",
            ActionType::AdjustNutrition => "adjust_nutrition",
            ActionType::ApplySuggestion => "apply_suggestion",
        }
    }

    pub fn metadata(&self) -> ActionMetadata {
        let (label, icon, color, base_priority, base_confidence) = match self {
            ActionType::SubstituteExercises => ("Substitute Exercises", "swap", "orange", 3, 0.85),
            ActionType::RemoveExercise => ("Remove Exercise", "minus", "red", 3, 0.80),
            ActionType::CancelWorkout => ("Cancel Workout", "x-circle", "red", 5, 0.75),
            ActionType::ScheduleRest => ("Schedule Rest Day", "bed", "blue", 4, 0.75),
            ActionType::DecreaseIntensity => ("Decrease Intensity", "arrow-down", "yellow", 3, 0.75),
            ActionType::IncreaseIntensity => ("Increase Intensity", "arrow-up", "green", 3, 0.70),
            ActionType::ModifyExercise => ("Modify Exercise", "edit", "yellow", 3, 0.70),
            ActionType::AddExercise => ("Add Exercise", "plus", "green", 3, 0.70),
            ActionType::RescheduleWorkout => ("Reschedule Workout", "calendar-clock", "purple", 4, 0.70),
            ActionType::ScheduleWorkout => ("Schedule Workout", "calendar", "purple", 4, 0.65),
            ActionType::AdjustNutrition => ("Adjust Nutrition", "apple", "teal", 4, 0.65),
            ActionType::ApplySuggestion => ("Apply Suggestion", "check", "gray", 5, 0.50),
        };
        ActionMetadata {
            label,
            icon,
            color,
            base_priority,
            base_confidence,
        }
    }

    /// Priority after applying the message signals.
    ///
    /// Safety-first ordering: pain makes removal, substitution and
    /// cancellation maximally urgent and pushes load increases to the back.
    pub fn priority(&self, signals: MessageSignals) -> u8 {
        let base = self.metadata().base_priority;
        match self {
            ActionType::SubstituteExercises | ActionType::RemoveExercise | ActionType::CancelWorkout
                if signals.pain =>
            {
                MOST_URGENT
            }
            ActionType::ScheduleRest | ActionType::DecreaseIntensity if signals.pain => 2,
            ActionType::IncreaseIntensity if signals.pain => LEAST_URGENT,
            ActionType::IncreaseIntensity if signals.modification => 2,
            ActionType::ModifyExercise if signals.modification => 2,
            ActionType::AddExercise if signals.pain => 4,
            ActionType::RescheduleWorkout if signals.modification => 3,
            ActionType::ScheduleWorkout if signals.pain => LEAST_URGENT,
            _ => base,
        }
    }

    fn pattern_sources(&self) -> &'static [&'static str] {
        match self {
            ActionType::SubstituteExercises => &[
                r"substitut\w*\s+(?:the\s+|this\s+|that\s+|an?\s+)?exercises?",
                r"swap\s+(?:out\s+)?(?:the\s+|your\s+)?\w+(?:\s+\w+)?\s+(?:for|with)\b",
                r"replace\s+(?:the\s+|your\s+)?\w+(?:\s+\w+)?\s+with\b",
                r"(?:try|use)\s+an?\s+alternative",
            ],
            ActionType::RemoveExercise => &[
                r"remove\s+(?:the\s+|your\s+)?\w+",
                r"(?:skip|drop|avoid)\s+(?:the\s+|your\s+)?(?:exercise|\w+s)\b",
                r"stop\s+doing",
            ],
            ActionType::CancelWorkout => &[
                r"cancel\s+(?:today'?s\s+|the\s+|your\s+)?(?:workout|session|training)",
                r"skip\s+(?:today'?s\s+|the\s+|your\s+)?(?:workout|session|training)",
                r"(?:take|call)\s+(?:the\s+)?day\s+off",
            ],
            ActionType::ScheduleRest => &[
                r"rest\s+day",
                r"take\s+(?:a\s+)?(?:few\s+days?\s+|some\s+time\s+)?(?:off|rest)",
                r"(?:prioriti[sz]e|get\s+more)\s+(?:sleep|rest|recovery)",
                r"deload",
            ],
            ActionType::DecreaseIntensity => &[
                r"(?:reduce|decrease|lower|lighten)\s+(?:the\s+)?(?:weight|load|intensity|volume|reps|sets)",
                r"go\s+lighter",
                r"scale\s+back",
            ],
            ActionType::IncreaseIntensity => &[
                r"(?:increase|add|raise)\s+(?:the\s+)?(?:weight|load|intensity|volume|reps|sets)",
                r"progressive\s+overload",
                r"go\s+heavier",
            ],
            ActionType::ModifyExercise => &[
                r"(?:modify|adjust|change)\s+(?:the\s+|your\s+)?(?:form|technique|exercise|grip|stance|range)",
                r"(?:shorten|limit)\s+(?:the\s+)?range\s+of\s+motion",
            ],
            ActionType::AddExercise => &[
                r"add\s+(?:some\s+|a\s+|an\s+)?(?:exercise|\w+s)\b",
                r"include\s+(?:some\s+)?\w+",
                r"incorporate\s+\w+",
            ],
            ActionType::RescheduleWorkout => &[
                r"reschedul\w*",
                r"move\s+(?:your\s+|the\s+|today'?s\s+)?(?:workout|session)",
                r"push\s+(?:your\s+|the\s+)?(?:workout|session)\s+(?:back|to)",
            ],
            ActionType::ScheduleWorkout => &[
                r"schedul\w*\s+(?:a\s+|your\s+|the\s+)?(?:workout|session|training)",
                r"plan\s+(?:your\s+|a\s+)?(?:next\s+)?(?:workout|session|week)",
                r"(?:today'?s|tomorrow'?s)\s+(?:workout|session)",
            ],
            ActionType::AdjustNutrition => &[
                r"(?:eat|consume)\s+more\s+\w+",
                r"(?:increase|boost)\s+(?:your\s+)?(?:protein|carbs?|calories|hydration|water)",
                r"(?:drink|hydrate)",
                r"meal\s+plan",
            ],
            ActionType::ApplySuggestion => &[
                r"(?:i\s+)?(?:recommend|suggest)\s+(?:that\s+)?you",
                r"you\s+should",
            ],
        }
    }

    /// Compiled recognisers for this type, in scan order
    pub fn patterns(&self) -> &'static [Regex] {
        let index = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        &COMPILED_PATTERNS[index]
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.metadata().label)
    }
}

/// Case-insensitive compiled patterns, indexed like [`ActionType::ALL`].
static COMPILED_PATTERNS: LazyLock<Vec<Vec<Regex>>> = LazyLock::new(|| {
    ActionType::ALL
        .iter()
        .map(|kind| {
            kind.pattern_sources()
                .iter()
                .filter_map(|source| Regex::new(&format!("(?i){source}")).ok())
                .collect()
        })
        .collect()
});
