//! Whole-building verification against the document's validation targets.

use building_engine::Scene;
use scene_kernel::{Bounds, KernelQuery};
use serde::{Deserialize, Serialize};
use storefront_types::{Role, ValidationTargets};
use tracing::{info, instrument};

use crate::tolerance::{classify, classify_count, log_deviation, Summary, ToleranceResult};

const OUTER_WALLS: [&str; 4] = ["Wall_Front", "Wall_Rear", "Wall_Left", "Wall_Right"];

/// Raw values read from the scene. Absent elements measure zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildingMeasurements {
    pub overall_width: f64,
    pub overall_depth: f64,
    pub wall_height: f64,
    pub roof_top: f64,
    pub parapet_height_front: f64,
    pub parapet_level_heights: Vec<f64>,
    pub canopy_width: f64,
    pub canopy_depth: f64,
    pub canopy_post_count: u32,
    pub chimney_total_height: f64,
}

impl BuildingMeasurements {
    /// Read every measured quantity. `levels` is how many parapet steps to
    /// look for.
    pub fn measure(kernel: &dyn KernelQuery, scene: &Scene, levels: usize) -> Self {
        let bounds = |name: &str| {
            scene
                .get(name)
                .and_then(|el| kernel.world_bounds(&el.handle).ok())
        };
        let top = |name: &str| bounds(name).map_or(0.0, |b| b.max[2]);

        let walls = OUTER_WALLS
            .iter()
            .filter_map(|name| bounds(*name))
            .reduce(|a, b| a.union(&b));
        let (overall_width, overall_depth, wall_height) = match walls {
            Some(Bounds { min, max }) => (max[0] - min[0], max[1] - min[1], max[2]),
            None => (0.0, 0.0, 0.0),
        };

        let roof_top = top("Roof");
        let above_roof = |name: &str| bounds(name).map_or(0.0, |b| b.max[2] - roof_top);

        let canopy = bounds("Canopy_Roof").map(|b| b.size());

        Self {
            overall_width,
            overall_depth,
            wall_height,
            roof_top,
            parapet_height_front: above_roof("Parapet_Front"),
            parapet_level_heights: (1..=levels)
                .map(|i| above_roof(&format!("Parapet_Left_Level_{}", i)))
                .collect(),
            canopy_width: canopy.map_or(0.0, |s| s[0]),
            canopy_depth: canopy.map_or(0.0, |s| s[1]),
            canopy_post_count: scene.with_role(Role::CanopyPost).count() as u32,
            chimney_total_height: top("Chimney"),
        }
    }
}

/// Outcome of a whole-building check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingResult {
    pub checks: Vec<ToleranceResult>,
    pub summary: Summary,
    pub measurements: BuildingMeasurements,
}

impl BuildingResult {
    pub fn is_failed(&self) -> bool {
        self.summary.is_failed()
    }
}

/// Compare the built scene to the building-level targets.
///
/// A target of zero is skipped. Post count must match exactly.
#[instrument(skip_all)]
pub fn verify_building(
    kernel: &dyn KernelQuery,
    scene: &Scene,
    targets: &ValidationTargets,
    floor: f64,
) -> BuildingResult {
    let m = BuildingMeasurements::measure(kernel, scene, targets.parapet_level_heights.len());

    let mut checks = Vec::new();
    let mut check = |name: &str, expected: f64, measured: f64| {
        if expected != 0.0 {
            checks.push(classify(name, expected, measured, floor));
        }
    };

    check("overall_width", targets.overall_width, m.overall_width);
    check("overall_depth", targets.overall_depth, m.overall_depth);
    check("wall_height", targets.wall_height, m.wall_height);
    check(
        "parapet_height_front",
        targets.parapet_height_front,
        m.parapet_height_front,
    );
    for (i, (expected, measured)) in targets
        .parapet_level_heights
        .iter()
        .zip(&m.parapet_level_heights)
        .enumerate()
    {
        check(&format!("parapet_level_{}", i + 1), *expected, *measured);
    }
    check("canopy_width", targets.canopy_width, m.canopy_width);
    check("canopy_depth", targets.canopy_depth, m.canopy_depth);
    check(
        "chimney_total_height",
        targets.chimney_total_height,
        m.chimney_total_height,
    );

    match targets.canopy_post_count {
        Some(expected) if expected > 0 => checks.push(classify_count(
            "canopy_post_count",
            expected,
            m.canopy_post_count,
        )),
        _ => {}
    }

    let mut summary = Summary::default();
    for r in &checks {
        log_deviation(r);
        summary.record(&r.dimension, r.severity);
    }

    info!(
        checks = checks.len(),
        critical = summary.critical.len(),
        "building verification complete"
    );
    BuildingResult {
        checks,
        summary,
        measurements: m,
    }
}
