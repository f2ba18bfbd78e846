//! Tolerance tiers: pure classification of one measured value.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Deviations at or below this absolute amount always pass.
pub const DEFAULT_TOLERANCE_FLOOR: f64 = 0.01;

/// Severity tier of a deviation, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Pass,
    Minor,
    Major,
    Critical,
}

impl Severity {
    /// Half-open bands, each boundary belonging to the lower tier:
    /// ≤1% pass, ≤5% minor, ≤10% major, above that critical.
    pub fn from_percent_error(percent: f64) -> Self {
        if percent <= 1.0 {
            Severity::Pass
        } else if percent <= 5.0 {
            Severity::Minor
        } else if percent <= 10.0 {
            Severity::Major
        } else {
            Severity::Critical
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Pass => "PASS",
            Severity::Minor => "MINOR",
            Severity::Major => "MAJOR",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One measured dimension against its expected value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToleranceResult {
    pub dimension: String,
    pub expected: f64,
    pub measured: f64,
    pub abs_error: f64,
    pub percent_error: f64,
    pub severity: Severity,
}

/// Classify a measurement. Pure: identical inputs give identical results.
pub fn classify(dimension: &str, expected: f64, measured: f64, floor: f64) -> ToleranceResult {
    let abs_error = (measured - expected).abs();
    let percent_error = if expected != 0.0 {
        abs_error / expected.abs() * 100.0
    } else if abs_error == 0.0 {
        0.0
    } else {
        f64::INFINITY
    };
    let severity = if abs_error <= floor {
        Severity::Pass
    } else {
        Severity::from_percent_error(percent_error)
    };
    ToleranceResult {
        dimension: dimension.to_string(),
        expected,
        measured,
        abs_error,
        percent_error,
        severity,
    }
}

/// Count-type check: any mismatch is critical.
pub fn classify_count(dimension: &str, expected: u32, measured: u32) -> ToleranceResult {
    let matches = expected == measured;
    ToleranceResult {
        dimension: dimension.to_string(),
        expected: expected as f64,
        measured: measured as f64,
        abs_error: (expected as f64 - measured as f64).abs(),
        percent_error: if matches { 0.0 } else { 100.0 },
        severity: if matches {
            Severity::Pass
        } else {
            Severity::Critical
        },
    }
}

/// Log a non-passing result: minor and major as warnings, critical as errors.
pub(crate) fn log_deviation(r: &ToleranceResult) {
    match r.severity {
        Severity::Pass => {}
        Severity::Minor | Severity::Major => warn!(
            dimension = %r.dimension,
            expected = r.expected,
            measured = r.measured,
            percent = r.percent_error,
            severity = %r.severity,
            "dimension deviation"
        ),
        Severity::Critical => error!(
            dimension = %r.dimension,
            expected = r.expected,
            measured = r.measured,
            percent = r.percent_error,
            "critical dimension deviation"
        ),
    }
}

/// Names grouped by tier. Any critical entry fails the whole set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub passed: Vec<String>,
    pub minor: Vec<String>,
    pub major: Vec<String>,
    pub critical: Vec<String>,
}

impl Summary {
    pub fn record(&mut self, name: &str, severity: Severity) {
        let bucket = match severity {
            Severity::Pass => &mut self.passed,
            Severity::Minor => &mut self.minor,
            Severity::Major => &mut self.major,
            Severity::Critical => &mut self.critical,
        };
        bucket.push(name.to_string());
    }

    pub fn is_failed(&self) -> bool {
        !self.critical.is_empty()
    }

    pub fn total(&self) -> usize {
        self.passed.len() + self.minor.len() + self.major.len() + self.critical.len()
    }
}
