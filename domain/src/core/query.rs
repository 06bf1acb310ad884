//! Query and context value objects

use super::error::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Context key that restricts routing to the advisors the query itself selects
pub const SINGLE_ADVISOR_MODE: &str = "single_advisor_mode";
/// Context key that keeps the primary advisor in single-advisor mode
pub const INCLUDE_PRIMARY: &str = "include_primary";
/// Context key carrying the request type (e.g. `comprehensive_assessment`)
pub const REQUEST_TYPE: &str = "request_type";
/// Request type that consults every advisor
pub const COMPREHENSIVE_ASSESSMENT: &str = "comprehensive_assessment";
/// Context flag set by the session when the user reported pain
pub const PAIN_REPORTED: &str = "pain_reported";
/// Context flag set by the session when an injury is suspected
pub const INJURY_CONCERN: &str = "injury_concern";
/// Context flag marking an emergency round
pub const EMERGENCY: &str = "emergency";
/// Context key carrying the emergency severity
pub const SEVERITY: &str = "severity";

/// Facts supplied by the session store alongside a query (Value Object)
///
/// Backed by an ordered map so that serialization is stable, which the
/// response cache relies on for its fingerprints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context {
    entries: BTreeMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    /// Interpret a key as a boolean flag.
    ///
    /// Accepts JSON `true`, the strings `"true"`/`"yes"`/`"1"` and non-zero numbers.
    pub fn flag(&self, key: &str) -> bool {
        match self.entries.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => {
                matches!(s.trim().to_lowercase().as_str(), "true" | "yes" | "1")
            }
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
            _ => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }
}

impl From<BTreeMap<String, Value>> for Context {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Self { entries }
    }
}

impl FromIterator<(String, Value)> for Context {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// A user query submitted for coordination (Value Object)
///
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    text: String,
    context: Context,
}

impl Query {
    /// Try to create a new query, rejecting blank text
    pub fn try_new(text: impl Into<String>, context: Context) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::InvalidQuery(
                "query text cannot be empty".to_string(),
            ));
        }
        Ok(Self { text, context })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Return a copy of this query with extra context entries
    pub fn with_context_entry(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut context = self.context.clone();
        context.insert(key, value);
        Self {
            text: self.text.clone(),
            context,
        }
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_creation() {
        let q = Query::try_new("my knee hurts", Context::new()).unwrap();
        assert_eq!(q.text(), "my knee hurts");
        assert!(q.context().is_empty());
    }

    #[test]
    fn test_blank_query_rejected() {
        assert!(Query::try_new("", Context::new()).is_err());
        assert!(Query::try_new("   ", Context::new()).is_err());
    }

    #[test]
    fn test_context_flags() {
        let ctx = Context::new()
            .with("a", true)
            .with("b", "yes")
            .with("c", 0)
            .with("d", "nope")
            .with("e", 2);

        assert!(ctx.flag("a"));
        assert!(ctx.flag("b"));
        assert!(!ctx.flag("c"));
        assert!(!ctx.flag("d"));
        assert!(ctx.flag("e"));
        assert!(!ctx.flag("missing"));
    }

    #[test]
    fn test_context_serialization_is_ordered() {
        let a = Context::new().with("zeta", 1).with("alpha", json!({"x": 1}));
        let b = Context::new().with("alpha", json!({"x": 1})).with("zeta", 1);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_with_context_entry_leaves_original_untouched() {
        let q = Query::try_new("help", Context::new()).unwrap();
        let pinned = q.with_context_entry(EMERGENCY, true);
        assert!(pinned.context().flag(EMERGENCY));
        assert!(!q.context().flag(EMERGENCY));
    }
}
