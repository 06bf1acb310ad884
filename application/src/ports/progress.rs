//! Progress notification port
//!
//! Defines the interface for reporting progress during a coordination round.

use council_domain::AdvisorId;

/// Sequential stages of one coordination round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinationStage {
    Routing,
    Gathering,
    Resolving,
    Extracting,
}

impl CoordinationStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoordinationStage::Routing => "routing",
            CoordinationStage::Gathering => "gathering",
            CoordinationStage::Resolving => "resolving",
            CoordinationStage::Extracting => "extracting",
        }
    }
}

impl std::fmt::Display for CoordinationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Callback for progress updates during coordination
///
/// Implementations live in the presentation layer.
pub trait CoordinationProgress: Send + Sync {
    /// Called when a stage starts; `total_tasks` is the advisor count while gathering
    fn on_stage_start(&self, stage: CoordinationStage, total_tasks: usize);

    /// Called when one advisor's response is in
    fn on_advisor_complete(&self, advisor: AdvisorId, success: bool, cached: bool);

    /// Called when a stage completes
    fn on_stage_complete(&self, stage: CoordinationStage);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl CoordinationProgress for NoProgress {
    fn on_stage_start(&self, _stage: CoordinationStage, _total_tasks: usize) {}
    fn on_advisor_complete(&self, _advisor: AdvisorId, _success: bool, _cached: bool) {}
    fn on_stage_complete(&self, _stage: CoordinationStage) {}
}
