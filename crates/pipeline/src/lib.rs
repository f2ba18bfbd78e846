//! The verification pipeline: build, three certified verification stages,
//! then a gated export.

pub mod config;
pub mod error;
pub mod gate;
pub mod payload;
mod pipeline;
pub mod state;

pub use config::PipelineConfig;
pub use error::{GateError, PipelineError};
pub use gate::{export_file_name, export_gate, export_path, REQUIRED_ELEMENTS};
pub use payload::payload_from;
pub use pipeline::{Pipeline, RunSummary};
pub use state::IterationState;
