use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CheckpointError;
use crate::step::StepName;

/// What a verification stage found, grouped by tier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckpointPayload {
    #[serde(default)]
    pub critical_failures: Vec<String>,
    #[serde(default)]
    pub major_failures: Vec<String>,
    #[serde(default)]
    pub minor_issues: Vec<String>,
    #[serde(default)]
    pub passed: Vec<String>,
    /// Free-form stage output, kept for inspection.
    #[serde(default)]
    pub detail: serde_json::Value,
}

/// A certified verification checkpoint.
///
/// The only way to obtain one is [`VerificationCheckpoint::certify`] (or
/// deserialization, which re-runs it), so a stored checkpoint never carries
/// critical failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CheckpointRecord")]
pub struct VerificationCheckpoint {
    name: StepName,
    timestamp: DateTime<Utc>,
    payload: CheckpointPayload,
}

/// Unchecked on-disk shape of a checkpoint.
#[derive(Deserialize)]
struct CheckpointRecord {
    name: StepName,
    timestamp: DateTime<Utc>,
    payload: CheckpointPayload,
}

impl TryFrom<CheckpointRecord> for VerificationCheckpoint {
    type Error = CheckpointError;

    fn try_from(r: CheckpointRecord) -> Result<Self, Self::Error> {
        Self::certify_at(r.name, r.payload, r.timestamp)
    }
}

impl VerificationCheckpoint {
    /// Certify a stage now. Fails if the payload has any critical failure.
    pub fn certify(name: StepName, payload: CheckpointPayload) -> Result<Self, CheckpointError> {
        Self::certify_at(name, payload, Utc::now())
    }

    pub fn certify_at(
        name: StepName,
        payload: CheckpointPayload,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, CheckpointError> {
        if !payload.critical_failures.is_empty() {
            return Err(CheckpointError::Rejected {
                name,
                failures: payload.critical_failures,
            });
        }
        Ok(Self {
            name,
            timestamp,
            payload,
        })
    }

    pub fn name(&self) -> StepName {
        self.name
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn payload(&self) -> &CheckpointPayload {
        &self.payload
    }
}
