use std::path::{Path, PathBuf};

use building_engine::Scene;
use checkpoint_store::{CheckpointStore, Checkpoints};
use tracing::{instrument, warn};

use crate::error::GateError;

/// Elements a building must have before it can be exported.
pub const REQUIRED_ELEMENTS: [&str; 8] = [
    "Foundation",
    "Wall_Front",
    "Wall_Rear",
    "Wall_Left",
    "Wall_Right",
    "Roof",
    "Canopy_Roof",
    "Chimney",
];

pub fn export_file_name(iteration: u32) -> String {
    format!("building_iter_{:03}.stl", iteration)
}

pub fn export_path(export_dir: &Path, iteration: u32) -> PathBuf {
    export_dir.join(export_file_name(iteration))
}

/// Every verification stage certified, then every required element present.
#[instrument(skip(checkpoints, scene))]
pub fn export_gate<S: CheckpointStore>(
    checkpoints: &Checkpoints<S>,
    iteration: u32,
    scene: &Scene,
) -> Result<(), GateError> {
    checkpoints
        .require_all(iteration)
        .map_err(GateError::Uncertified)?;

    let missing = scene.missing(&REQUIRED_ELEMENTS);
    if !missing.is_empty() {
        warn!(?missing, "structural elements missing");
        return Err(GateError::Incomplete {
            missing: missing.into_iter().map(String::from).collect(),
        });
    }
    Ok(())
}
