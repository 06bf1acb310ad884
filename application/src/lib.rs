//! Application layer for advisor-council
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::CoordinationParams;
pub use ports::{
    advisor_gateway::{AdvisorError, AdvisorGateway},
    progress::{CoordinationProgress, CoordinationStage, NoProgress},
    response_cache::{NoCache, ResponseCache},
};
pub use use_cases::{
    coordinate::{CoordinateError, CoordinateInput, CoordinateUseCase},
    gather_responses::{GatherError, ResponseGatherer},
    route_advisors::AdvisorRouter,
    single_flight::KeyLocks,
};
