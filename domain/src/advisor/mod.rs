//! Advisors and their responses.
//!
//! An advisor is a thin wrapper around a remote language-generation service.
//! The domain only knows its identity ([`AdvisorId`]) and the normalized
//! shape of what it returns ([`AgentResponse`]).

pub mod descriptor;
pub mod response;

pub use descriptor::{AdvisorId, AdvisorSummary};
pub use response::{AgentResponse, TIMEOUT_ERROR, extract_recommendations};
