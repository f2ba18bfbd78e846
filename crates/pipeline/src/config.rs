use std::path::PathBuf;

use dimension_verify::DEFAULT_TOLERANCE_FLOOR;
use serde::{Deserialize, Serialize};

/// Where checkpoints and exports go, and how strict verification is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub checkpoint_dir: PathBuf,
    pub export_dir: PathBuf,
    /// Absolute deviation that always passes.
    pub tolerance_floor: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            checkpoint_dir: PathBuf::from("work/verification/checkpoints"),
            export_dir: PathBuf::from("exports"),
            tolerance_floor: DEFAULT_TOLERANCE_FLOOR,
        }
    }
}
