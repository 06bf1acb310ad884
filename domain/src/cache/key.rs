//! Response cache fingerprint

use crate::advisor::AdvisorId;
use crate::core::query::Context;
use crate::core::string::normalize_whitespace;
use serde::{Deserialize, Serialize};

/// Fingerprint of `(advisor, query, context)` (Value Object)
///
/// The query is trimmed, lower-cased and whitespace-collapsed before hashing,
/// so trivially different spellings of the same question share an entry.
/// Context keys are already ordered, which keeps the JSON rendering stable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(advisor: AdvisorId, query: &str, context: &Context) -> Self {
        let context_json =
            serde_json::to_string(context).unwrap_or_else(|_| format!("{:?}", context));

        let mut hasher = blake3::Hasher::new();
        hasher.update(advisor.as_str().as_bytes());
        hasher.update(b"\0");
        hasher.update(normalize_whitespace(query).as_bytes());
        hasher.update(b"\0");
        hasher.update(context_json.as_bytes());

        Self(hasher.finalize().to_hex().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Short form is enough to correlate log lines
        write!(f, "{}", &self.0[..self.0.len().min(12)])
    }
}
