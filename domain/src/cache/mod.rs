//! Response cache value objects

pub mod key;

pub use key::CacheKey;
