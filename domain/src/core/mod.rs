//! Core domain concepts shared across all subdomains.
//!
//! - [`query::Query`] / [`query::Context`]: the validated user query and its session facts
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod query;
pub mod string;
