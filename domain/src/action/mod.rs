//! Structured actions derived from advisor text.
//!
//! | Item | Role |
//! |------|------|
//! | [`ActionType`] | Closed catalog of action kinds with static metadata and patterns |
//! | [`ActionItem`] | One ranked proposal, attributed to its source advisor |
//! | [`PatternActionExtractor`] | Turns one reply into at most five items |
//! | [`vocabulary`] | Pain / modification / exercise detectors |

pub mod extractor;
pub mod item;
pub mod kind;
pub mod vocabulary;

pub use extractor::{MAX_ACTIONS_PER_RESPONSE, PatternActionExtractor};
pub use item::{ActionItem, ActionOrigin, rank, sort_and_truncate};
pub use kind::{ActionMetadata, ActionType, MessageSignals};
