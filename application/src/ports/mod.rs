//! Ports (interfaces) for the application layer
//!
//! These traits define the boundaries between the application and
//! infrastructure / presentation layers.

pub mod advisor_gateway;
pub mod progress;
pub mod response_cache;
