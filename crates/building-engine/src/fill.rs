use building_ops::{execute_shape, plan_fill, Orientation};
use scene_kernel::Kernel;
use storefront_types::BuildingSpec;
use tracing::{info, instrument, warn};

use crate::cutout::CutoutReport;
use crate::error::BuildError;
use crate::scene::Scene;

/// What was placed into the cut openings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FillReport {
    /// Cutouts that received their frame, in document order.
    pub filled: Vec<String>,
    /// Cutouts with a fill whose opening was never cut.
    pub skipped: Vec<String>,
    pub pieces: usize,
}

/// Place frames, glass and door leaves into every opening that was cut.
///
/// Fills follow the cutouts' document order. A fill whose cutout was skipped
/// is skipped with it; a piece the kernel cannot create stops the build.
#[instrument(skip_all, fields(fills = spec.opening_fill.len()))]
pub fn fill_openings(
    spec: &BuildingSpec,
    cutouts: &CutoutReport,
    scene: &mut Scene,
    kernel: &mut dyn Kernel,
) -> Result<FillReport, BuildError> {
    let mut report = FillReport::default();

    for named in &spec.cutouts {
        let Some(fill) = spec.opening_fill.get(&named.name) else {
            continue;
        };
        let Some(applied) = cutouts.applied.iter().find(|a| a.name == named.name) else {
            warn!(cutout = %named.name, "opening was not cut; fill skipped");
            report.skipped.push(named.name.clone());
            continue;
        };

        let orientation = Orientation::for_wall(applied.wall, spec.door_alcove.as_ref());
        for piece in plan_fill(&named.name, &named.spec, fill, orientation) {
            let element = execute_shape(
                kernel,
                &piece.name,
                piece.role,
                &piece.shape(),
                spec.colors.color_for(piece.role),
            )?;
            scene.insert(element)?;
            report.pieces += 1;
        }
        report.filled.push(named.name.clone());
    }

    info!(
        filled = report.filled.len(),
        pieces = report.pieces,
        skipped = report.skipped.len(),
        "openings filled"
    );
    Ok(report)
}
