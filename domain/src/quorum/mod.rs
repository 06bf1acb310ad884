//! Consensus across advisor recommendations
//!
//! ```text
//! responses ──► SimilarityKey ──► groups ──► ConsensusThreshold
//!                                              │
//!                         ┌────────────────────┴──────────────┐
//!                         ▼                                   ▼
//!                 consensus (≥ threshold)          conflicts (> 1 advisor)
//!                                                             │
//!                                                   ResolutionPolicy
//! ```

pub mod consensus;
pub mod resolution;
pub mod similarity;
pub mod threshold;

pub use consensus::{ConsensusOutcome, ConsensusResolver};
pub use resolution::{Conflict, ConflictingView, ResolutionPolicy};
pub use similarity::{PrefixSimilarity, SimilarityKey};
pub use threshold::ConsensusThreshold;
