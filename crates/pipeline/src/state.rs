use std::fmt;

use serde::{Deserialize, Serialize};

/// Progress of one iteration. Each step may only follow the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IterationState {
    NotStarted,
    GeometryBuilt,
    InlineVerified,
    BatchVerified,
    AutomatedVerified,
    Exported,
}

impl IterationState {
    pub fn as_str(self) -> &'static str {
        match self {
            IterationState::NotStarted => "NOT_STARTED",
            IterationState::GeometryBuilt => "GEOMETRY_BUILT",
            IterationState::InlineVerified => "INLINE_VERIFIED",
            IterationState::BatchVerified => "BATCH_VERIFIED",
            IterationState::AutomatedVerified => "AUTOMATED_VERIFIED",
            IterationState::Exported => "EXPORTED",
        }
    }
}

impl fmt::Display for IterationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
