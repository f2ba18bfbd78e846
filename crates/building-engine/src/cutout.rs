use std::fmt;

use building_ops::{alcove_cutter_rotation, execute_cut, CutterPlan, Side};
use scene_kernel::Kernel;
use storefront_types::{BuildingSpec, CutoutSpec, WallKey};
use tracing::{info, instrument, warn};

use crate::scene::Scene;

/// A cutout that was subtracted from its wall.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedCutout {
    pub name: String,
    pub wall: WallKey,
    pub plan: CutterPlan,
}

/// Why a cutout was skipped.
#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticReason {
    /// The wall key is not one the building knows.
    UnknownWall { key: String },
    /// The key is valid but that wall was not built (e.g. no alcove).
    WallNotBuilt { wall: WallKey },
    /// The kernel refused the boolean difference.
    KernelRejected { reason: String },
}

/// A non-fatal problem with one cutout.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub cutout: String,
    pub reason: DiagnosticReason,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            DiagnosticReason::UnknownWall { key } => {
                write!(f, "cutout {}: unknown wall {:?}", self.cutout, key)
            }
            DiagnosticReason::WallNotBuilt { wall } => write!(
                f,
                "cutout {}: wall {} ({}) is not in the scene",
                self.cutout,
                wall,
                wall.element_name()
            ),
            DiagnosticReason::KernelRejected { reason } => {
                write!(f, "cutout {}: {}", self.cutout, reason)
            }
        }
    }
}

/// Outcome of applying every cutout of a building.
#[derive(Debug, Clone, Default)]
pub struct CutoutReport {
    pub applied: Vec<AppliedCutout>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CutoutReport {
    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }
}

/// Subtract every cutout from its wall, in document order.
///
/// A cutout that cannot be resolved or cut is skipped with one diagnostic;
/// the rest still run.
#[instrument(skip_all, fields(cutouts = spec.cutouts.len()))]
pub fn apply_cutouts(spec: &BuildingSpec, scene: &Scene, kernel: &mut dyn Kernel) -> CutoutReport {
    let mut report = CutoutReport::default();

    for named in &spec.cutouts {
        let skip = |reason| Diagnostic {
            cutout: named.name.clone(),
            reason,
        };

        let wall = match named.spec.wall.parse::<WallKey>() {
            Ok(wall) => wall,
            Err(_) => {
                let d = skip(DiagnosticReason::UnknownWall {
                    key: named.spec.wall.clone(),
                });
                warn!("{}", d);
                report.diagnostics.push(d);
                continue;
            }
        };

        let Some(target) = scene.get(wall.element_name()) else {
            let d = skip(DiagnosticReason::WallNotBuilt { wall });
            warn!("{}", d);
            report.diagnostics.push(d);
            continue;
        };

        let plan = plan_for(spec, wall, &named.spec);
        let cutter_name = format!("Cutter_{}", named.name);
        match execute_cut(kernel, target, &cutter_name, &plan) {
            Ok(()) => report.applied.push(AppliedCutout {
                name: named.name.clone(),
                wall,
                plan,
            }),
            Err(e) => {
                let d = skip(DiagnosticReason::KernelRejected {
                    reason: e.to_string(),
                });
                warn!("{}", d);
                report.diagnostics.push(d);
            }
        }
    }

    info!(
        applied = report.applied.len(),
        skipped = report.diagnostics.len(),
        "cutouts applied"
    );
    report
}

/// Cutter for a cutout on a wall that exists in the scene.
fn plan_for(spec: &BuildingSpec, wall: WallKey, cutout: &CutoutSpec) -> CutterPlan {
    let alcove = spec.door_alcove.as_ref();
    let thickness = match (wall, alcove) {
        (WallKey::AlcoveLeft | WallKey::AlcoveRight | WallKey::AlcoveBack, Some(a)) => a.thickness,
        _ => spec.walls.thickness,
    };
    match (wall, alcove) {
        (WallKey::AlcoveLeft, Some(a)) => {
            CutterPlan::angled(cutout, thickness, alcove_cutter_rotation(a, Side::Left))
        }
        (WallKey::AlcoveRight, Some(a)) => {
            CutterPlan::angled(cutout, thickness, alcove_cutter_rotation(a, Side::Right))
        }
        _ => CutterPlan::straight(wall, cutout, thickness),
    }
}
