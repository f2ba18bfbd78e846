use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use building_engine::{expected_elements, structural_elements};
use checkpoint_store::{Checkpoints, FileCheckpointStore};
use pipeline::{Pipeline, PipelineConfig};
use scene_kernel::MemoryKernel;
use storefront_types::{load_spec, BuildingSpec};
use tracing::info;

/// The in-memory kernel records each cut on its wall but exports walls as
/// uncut solids.
pub const UNMESHED_OPENINGS_NOTE: &str =
    "Note: openings are recorded per wall, not meshed; exported walls are solid.";

/// Defaults, with any flag given on the command line taking precedence.
pub fn config(
    checkpoint_dir: Option<PathBuf>,
    export_dir: Option<PathBuf>,
    floor: Option<f64>,
) -> PipelineConfig {
    let mut config = PipelineConfig::default();
    if let Some(dir) = checkpoint_dir {
        config.checkpoint_dir = dir;
    }
    if let Some(dir) = export_dir {
        config.export_dir = dir;
    }
    if let Some(floor) = floor {
        config.tolerance_floor = floor;
    }
    config
}

fn read_spec(path: &Path) -> Result<BuildingSpec> {
    let json =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    load_spec(&json).with_context(|| format!("loading {}", path.display()))
}

pub fn validate(path: &Path) -> Result<String> {
    let spec = read_spec(path)?;
    let mut out = String::new();
    writeln!(out, "{}: valid", path.display())?;
    writeln!(
        out,
        "  {} x {} m, walls {} m high, {} cutouts",
        spec.overall.width,
        spec.overall.depth,
        spec.walls.height,
        spec.cutouts.len()
    )?;
    let alcove = if spec.door_alcove.is_some() {
        "yes"
    } else {
        "no"
    };
    writeln!(
        out,
        "  parapet steps: {}, canopy posts: {}, alcove: {}",
        spec.parapet.as_ref().map_or(0, |p| p.steps.len()),
        spec.canopy.posts.len(),
        alcove
    )?;
    Ok(out)
}

pub fn run(path: &Path, iteration: u32, config: PipelineConfig) -> Result<String> {
    let spec = read_spec(path)?;
    info!(spec = %path.display(), iteration, "running pipeline");
    let inline = structural_elements(&spec);
    let batch = expected_elements(&spec);

    let store = FileCheckpointStore::new(&config.checkpoint_dir);
    let mut pipeline = Pipeline::new(MemoryKernel::new(), store, config);
    let summary = pipeline
        .run(iteration, spec, &inline, &batch)
        .with_context(|| format!("iteration {}", iteration))?;

    let mut out = String::new();
    writeln!(
        out,
        "Cutouts: {} applied, {} skipped",
        summary.cutouts_applied,
        summary.cutout_diagnostics.len()
    )?;
    for d in &summary.cutout_diagnostics {
        writeln!(out, "  {}", d)?;
    }
    writeln!(
        out,
        "Openings filled: {} ({} pieces), {} left empty",
        summary.fills.filled.len(),
        summary.fills.pieces,
        summary.fills.skipped.len()
    )?;
    for report in &summary.reports {
        writeln!(out)?;
        write!(out, "{}", report)?;
    }
    writeln!(
        out,
        "\nExported {} ({} solids, {} triangles)",
        summary.artifact.path.display(),
        summary.artifact.solid_count,
        summary.artifact.triangle_count
    )?;
    writeln!(out, "{}", UNMESHED_OPENINGS_NOTE)?;
    Ok(out)
}

pub fn status(config: &PipelineConfig, iteration: u32) -> Result<String> {
    let checkpoints = Checkpoints::new(FileCheckpointStore::new(&config.checkpoint_dir));
    let mut out = String::new();
    writeln!(out, "Iteration {}:", iteration)?;
    for s in checkpoints.status(iteration)? {
        match s.certified_at {
            Some(at) => writeln!(out, "  [x] {} ({})", s.name, at.to_rfc3339())?,
            None => writeln!(out, "  [ ] {}", s.name)?,
        }
    }
    Ok(out)
}

pub fn clear(config: &PipelineConfig, iteration: Option<u32>) -> Result<String> {
    let mut checkpoints = Checkpoints::new(FileCheckpointStore::new(&config.checkpoint_dir));
    let removed = match iteration {
        Some(i) => checkpoints.clear_iteration(i)?,
        None => checkpoints.clear_all()?,
    };
    Ok(format!("Removed {} checkpoint(s)\n", removed))
}
