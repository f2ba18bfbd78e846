use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A verification stage that must be certified before export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    InlineVerification,
    BatchVerification,
    AutomatedVerification,
}

impl Stage {
    /// Every stage, in the order they must be certified.
    pub const ALL: [Stage; 3] = [
        Stage::InlineVerification,
        Stage::BatchVerification,
        Stage::AutomatedVerification,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::InlineVerification => "inline_verification",
            Stage::BatchVerification => "batch_verification",
            Stage::AutomatedVerification => "automated_verification",
        }
    }

    pub fn step(self, iteration: u32) -> StepName {
        StepName::new(self, iteration)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = ParseStepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| ParseStepError(s.to_string()))
    }
}

/// Checkpoint name: a stage plus an iteration, written `<stage>_<NNN>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StepName {
    pub stage: Stage,
    pub iteration: u32,
}

impl StepName {
    pub fn new(stage: Stage, iteration: u32) -> Self {
        Self { stage, iteration }
    }
}

impl fmt::Display for StepName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{:03}", self.stage, self.iteration)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a checkpoint name: {0:?}")]
pub struct ParseStepError(pub String);

impl FromStr for StepName {
    type Err = ParseStepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseStepError(s.to_string());
        let (stage, digits) = s.rsplit_once('_').ok_or_else(err)?;
        if digits.len() < 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        let stage = stage.parse::<Stage>().map_err(|_| err())?;
        let iteration = digits.parse::<u32>().map_err(|_| err())?;
        Ok(StepName::new(stage, iteration))
    }
}

impl Serialize for StepName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StepName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
