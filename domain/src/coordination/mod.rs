//! Pure building blocks of a coordination round

pub mod merge;
pub mod result;

pub use merge::{MAX_ACTION_ITEMS, merge_actions};
pub use result::{CoordinatedResult, mean_confidence};
