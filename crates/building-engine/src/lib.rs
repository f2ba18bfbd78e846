//! Turns a building specification into named solids, cuts its openings and
//! fills them.

pub mod builder;
pub mod cutout;
pub mod error;
pub mod expectations;
pub mod fill;
pub mod scene;

pub use builder::build_elements;
pub use cutout::{apply_cutouts, AppliedCutout, CutoutReport, Diagnostic, DiagnosticReason};
pub use error::BuildError;
pub use expectations::{expected_elements, structural_elements, ElementExpectation};
pub use fill::{fill_openings, FillReport};
pub use scene::Scene;

use scene_kernel::Kernel;
use storefront_types::BuildingSpec;

/// A built scene and what happened to its openings.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub scene: Scene,
    pub cutouts: CutoutReport,
    pub fills: FillReport,
}

/// Build every element, apply every cutout, then fill the cut openings.
pub fn build(spec: &BuildingSpec, kernel: &mut dyn Kernel) -> Result<BuildOutcome, BuildError> {
    let mut scene = build_elements(spec, kernel)?;
    let cutouts = apply_cutouts(spec, &scene, kernel);
    let fills = fill_openings(spec, &cutouts, &mut scene, kernel)?;
    Ok(BuildOutcome {
        scene,
        cutouts,
        fills,
    })
}
