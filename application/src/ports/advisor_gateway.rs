//! Advisor gateway port
//!
//! Defines the interface for consulting an advisor.

use async_trait::async_trait;
use council_domain::{AdvisorId, Query};
use thiserror::Error;

/// Errors that can occur while consulting an advisor
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdvisorError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Advisor returned an empty reply")]
    EmptyReply,

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway to the advisors
///
/// This port defines how the application layer reaches the language
/// generation service behind each advisor. Implementations (adapters) live in
/// the infrastructure layer. Latency is unbounded from the caller's point of
/// view; callers apply their own deadlines.
#[async_trait]
pub trait AdvisorGateway: Send + Sync {
    /// Ask `advisor` about `query` and return its free-text reply
    async fn invoke(&self, advisor: AdvisorId, query: &Query) -> Result<String, AdvisorError>;
}
