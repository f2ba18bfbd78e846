use building_engine::{ElementExpectation, Scene};
use scene_kernel::KernelQuery;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::tolerance::{classify, log_deviation, Severity, Summary, ToleranceResult};

/// Verdict for one element: its worst axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementVerdict {
    pub name: String,
    pub severity: Severity,
    pub axes: Vec<ToleranceResult>,
    /// False when the element was not in the scene.
    pub found: bool,
}

/// Per-element verification of a batch of expectations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub verdicts: Vec<ElementVerdict>,
    pub summary: Summary,
}

impl BatchResult {
    pub fn is_failed(&self) -> bool {
        self.summary.is_failed()
    }

    pub fn checks(&self) -> impl Iterator<Item = &ToleranceResult> {
        self.verdicts.iter().flat_map(|v| v.axes.iter())
    }
}

/// Measure each expected element's bounds and classify every axis.
///
/// Axes with an expected value of zero or less are skipped. An expected
/// element missing from the scene is critical.
#[instrument(skip_all, fields(expectations = expectations.len()))]
pub fn verify_elements(
    kernel: &dyn KernelQuery,
    scene: &Scene,
    expectations: &[ElementExpectation],
    floor: f64,
) -> BatchResult {
    let mut verdicts = Vec::with_capacity(expectations.len());
    let mut summary = Summary::default();

    for exp in expectations {
        let bounds = scene
            .get(&exp.name)
            .and_then(|el| kernel.world_bounds(&el.handle).ok());

        let verdict = match bounds {
            Some(b) => {
                let size = b.size();
                let axes: Vec<ToleranceResult> = [
                    ("width", exp.width, size[0]),
                    ("depth", exp.depth, size[1]),
                    ("height", exp.height, size[2]),
                ]
                .into_iter()
                .filter(|(_, expected, _)| *expected > 0.0)
                .map(|(axis, expected, measured)| {
                    classify(&format!("{}.{}", exp.name, axis), expected, measured, floor)
                })
                .collect();
                let severity = axes
                    .iter()
                    .map(|a| a.severity)
                    .max()
                    .unwrap_or(Severity::Pass);
                ElementVerdict {
                    name: exp.name.clone(),
                    severity,
                    axes,
                    found: true,
                }
            }
            None => ElementVerdict {
                name: exp.name.clone(),
                severity: Severity::Critical,
                axes: Vec::new(),
                found: false,
            },
        };

        if !verdict.found {
            error!(element = %verdict.name, "expected element not in scene");
        }
        verdict.axes.iter().for_each(log_deviation);

        summary.record(&verdict.name, verdict.severity);
        verdicts.push(verdict);
    }

    info!(
        passed = summary.passed.len(),
        minor = summary.minor.len(),
        major = summary.major.len(),
        critical = summary.critical.len(),
        "element verification complete"
    );
    BatchResult { verdicts, summary }
}
