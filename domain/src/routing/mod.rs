//! Advisor routing logic that needs no I/O.
//!
//! - [`keywords`]: heuristic tier (pain/location branch, keyword sets)
//! - [`parsing`]: reply parsing for the assisted tier

pub mod keywords;
pub mod parsing;

pub use keywords::{HeuristicRouter, HeuristicSelection};
pub use parsing::{CategoryParseError, CategorySelection, extract_category_array};
