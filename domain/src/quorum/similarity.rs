//! Recommendation similarity signatures.
//!
//! Recommendations from different advisors are grouped by a signature:
//! two recommendations with the same signature are treated as the same
//! proposal. The function is pluggable; whatever it is, identical inputs
//! must always yield identical groups.

use crate::core::string::normalize_whitespace;

/// Maps a recommendation to its grouping signature
pub trait SimilarityKey: Send + Sync {
    fn signature(&self, recommendation: &str) -> String;
}

/// Groups by the first `chars` characters of the normalized text.
///
/// Normalization lower-cases, collapses whitespace and strips trailing
/// punctuation. Crude: short unrelated recommendations can collide and long
/// paraphrases will not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixSimilarity {
    pub chars: usize,
}

impl PrefixSimilarity {
    pub const DEFAULT_CHARS: usize = 30;

    pub fn new(chars: usize) -> Self {
        Self {
            chars: chars.max(1),
        }
    }
}

impl Default for PrefixSimilarity {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CHARS)
    }
}

impl SimilarityKey for PrefixSimilarity {
    fn signature(&self, recommendation: &str) -> String {
        let normalized = normalize_whitespace(recommendation);
        let trimmed = normalized.trim_end_matches(|c: char| c.is_ascii_punctuation());
        trimmed.chars().take(self.chars).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_and_whitespace_insensitive() {
        let s = PrefixSimilarity::default();
        assert_eq!(
            s.signature("Take a rest day tomorrow."),
            s.signature("  take a   REST day tomorrow")
        );
    }

    #[test]
    fn test_prefix_length() {
        let s = PrefixSimilarity::new(10);
        assert_eq!(s.signature("Increase protein intake gradually"), "increase p");
    }

    #[test]
    fn test_long_texts_sharing_prefix_collide() {
        let s = PrefixSimilarity::default();
        assert_eq!(
            s.signature("Reduce the training volume this week by a third"),
            s.signature("Reduce the training volume this week and sleep more")
        );
    }

    #[test]
    fn test_zero_chars_clamped() {
        assert_eq!(PrefixSimilarity::new(0).chars, 1);
    }
}
