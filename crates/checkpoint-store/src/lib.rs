//! Verification checkpoints: certified records that gate export.

pub mod checkpoints;
pub mod errors;
pub mod record;
pub mod step;
pub mod store;

pub use checkpoints::{Checkpoints, StageStatus};
pub use errors::{CheckpointError, StoreError};
pub use record::{CheckpointPayload, VerificationCheckpoint};
pub use step::{ParseStepError, Stage, StepName};
pub use store::{CheckpointStore, FileCheckpointStore, MemoryCheckpointStore};
