//! Application-level configuration.
//!
//! - [`CoordinationParams`]: round timing, consensus and merge control

pub mod coordination_params;

pub use coordination_params::CoordinationParams;
