//! Progress reporters for coordination rounds

pub mod reporter;
