//! Consensus threshold
//!
//! A recommendation group reaches consensus when enough of the responding
//! advisors produced it.

use serde::{Deserialize, Serialize};

/// Guards `ceil` against float noise (`0.7 * 10 = 7.000000000000001`)
const EPSILON: f64 = 1e-9;

/// Fraction of responding advisors that must agree (0, 1]
///
/// # Example
///
/// ```
/// use council_domain::quorum::ConsensusThreshold;
///
/// let threshold = ConsensusThreshold::new(0.7);
/// assert!(!threshold.is_reached(2, 3)); // 2/3 < 0.7
/// assert!(threshold.is_reached(3, 3));
/// assert_eq!(threshold.required(10), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct ConsensusThreshold(f64);

impl ConsensusThreshold {
    /// Reference threshold
    pub const DEFAULT: f64 = 0.7;

    /// Create a threshold, clamped to (0, 1]
    pub fn new(fraction: f64) -> Self {
        let fraction = if fraction.is_finite() { fraction } else { Self::DEFAULT };
        Self(fraction.clamp(EPSILON, 1.0))
    }

    pub fn fraction(&self) -> f64 {
        self.0
    }

    /// Minimum number of agreeing advisors: `ceil(fraction × total)`, at least 1
    pub fn required(&self, total: usize) -> usize {
        let raw = (self.0 * total as f64 - EPSILON).ceil();
        (raw.max(0.0) as usize).max(1)
    }

    /// Check whether `agreeing` out of `total` responding advisors is enough
    pub fn is_reached(&self, agreeing: usize, total: usize) -> bool {
        if total == 0 {
            return false;
        }
        agreeing >= self.required(total)
    }

    /// Check whether a value is an acceptable threshold
    pub fn is_valid(fraction: f64) -> bool {
        fraction.is_finite() && fraction > 0.0 && fraction <= 1.0
    }
}

impl Default for ConsensusThreshold {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl From<f64> for ConsensusThreshold {
    fn from(fraction: f64) -> Self {
        Self::new(fraction)
    }
}

impl From<ConsensusThreshold> for f64 {
    fn from(threshold: ConsensusThreshold) -> Self {
        threshold.0
    }
}

impl std::fmt::Display for ConsensusThreshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}%", self.0 * 100.0)
    }
}
