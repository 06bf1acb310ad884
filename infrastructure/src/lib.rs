//! Infrastructure layer for advisor-council
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod advisors;
pub mod cache;
pub mod config;

// Re-export commonly used types
pub use advisors::{HttpAdvisorConfig, HttpAdvisorGateway};
pub use cache::InMemoryResponseCache;
pub use config::{
    ConfigError, ConfigLoader, FileCacheConfig, FileConfig, FileCoordinationConfig,
    FileOutputConfig, FileProviderConfig,
};
