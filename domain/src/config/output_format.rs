//! Output format value object

use serde::{Deserialize, Serialize};

/// How a coordinated result is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Primary message, per-advisor insights, consensus, conflicts and actions
    Full,
    /// Primary message and ranked actions only (default)
    #[default]
    Summary,
    /// The whole result as JSON
    Json,
}
