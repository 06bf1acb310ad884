//! Advisor gateway adapters

pub mod http_gateway;

pub use http_gateway::{HttpAdvisorConfig, HttpAdvisorGateway};
