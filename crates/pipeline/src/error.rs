use building_engine::BuildError;
use checkpoint_store::{CheckpointError, Stage};
use scene_kernel::KernelError;

use crate::state::IterationState;

/// Errors that stop the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("{operation} requires state {expected}, iteration is {actual}")]
    OutOfOrder {
        operation: &'static str,
        expected: IterationState,
        actual: IterationState,
    },

    #[error("build failed: {0}")]
    Build(#[from] BuildError),

    #[error("{stage} found {} critical deviation(s): {}", failures.len(), failures.join(", "))]
    CriticalDeviation { stage: Stage, failures: Vec<String> },

    #[error("recording {stage} report: {source}")]
    Report {
        stage: Stage,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Checkpoint(#[from] CheckpointError),

    #[error("export blocked: {0}")]
    Gate(#[from] GateError),

    #[error("export failed: {0}")]
    Export(#[source] KernelError),
}

/// Why the export gate refused.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    #[error("{0}")]
    Uncertified(#[source] CheckpointError),

    #[error("required elements missing: {}", missing.join(", "))]
    Incomplete { missing: Vec<String> },
}
