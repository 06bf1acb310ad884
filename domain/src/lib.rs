//! Domain layer for advisor-council
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns, and no
//! async runtime.
//!
//! # Core Concepts
//!
//! ## Advisors
//!
//! A fixed roster of specialised advisors ([`AdvisorId`]) answers athlete
//! questions. One of them, the head coach, is the primary advisor and is
//! consulted on every round.
//!
//! ## Coordination round
//!
//! ```text
//! Query ─► routing ─► advisors ─► AgentResponse*
//!                                     │
//!                 ┌───────────────────┼────────────────────┐
//!                 ▼                                        ▼
//!       PatternActionExtractor                     ConsensusResolver
//!                 │                                        │
//!                 └──────────► CoordinatedResult ◄─────────┘
//! ```

pub mod action;
pub mod advisor;
pub mod cache;
pub mod config;
pub mod coordination;
pub mod core;
pub mod prompt;
pub mod quorum;
pub mod routing;

// Re-export commonly used types
pub use action::{ActionItem, ActionType, PatternActionExtractor};
pub use advisor::{AdvisorId, AdvisorSummary, AgentResponse};
pub use cache::CacheKey;
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use coordination::{CoordinatedResult, merge_actions};
pub use core::{
    error::DomainError,
    query::{Context, Query},
};
pub use prompt::PromptTemplate;
pub use quorum::{
    Conflict, ConflictingView, ConsensusOutcome, ConsensusResolver, ConsensusThreshold,
    PrefixSimilarity, ResolutionPolicy, SimilarityKey,
};
pub use routing::{HeuristicRouter, extract_category_array};
