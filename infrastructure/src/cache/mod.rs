//! Response cache adapters

pub mod memory;

pub use memory::InMemoryResponseCache;
