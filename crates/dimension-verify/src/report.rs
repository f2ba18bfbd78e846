//! Plain-text verification reports.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::building::BuildingResult;
use crate::element::BatchResult;
use crate::tolerance::{Severity, Summary, ToleranceResult};

/// A titled list of checks with their tier summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub title: String,
    pub checks: Vec<ToleranceResult>,
    /// Elements that were expected but not found.
    pub missing: Vec<String>,
    pub summary: Summary,
}

impl VerificationReport {
    pub fn from_batch(title: impl Into<String>, batch: &BatchResult) -> Self {
        Self {
            title: title.into(),
            checks: batch.checks().cloned().collect(),
            missing: batch
                .verdicts
                .iter()
                .filter(|v| !v.found)
                .map(|v| v.name.clone())
                .collect(),
            summary: batch.summary.clone(),
        }
    }

    pub fn from_building(title: impl Into<String>, result: &BuildingResult) -> Self {
        Self {
            title: title.into(),
            checks: result.checks.clone(),
            missing: Vec::new(),
            summary: result.summary.clone(),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.summary.is_failed()
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("=== {} ===\n\n", self.title));

        out.push_str(&format!("Checks ({}):\n", self.checks.len()));
        for c in &self.checks {
            out.push_str(&format!(
                "  [{}] {}: expected {:.3}, measured {:.3} ({:.2}%)\n",
                c.severity, c.dimension, c.expected, c.measured, c.percent_error,
            ));
        }

        if !self.missing.is_empty() {
            out.push_str(&format!("\nMissing ({}):\n", self.missing.len()));
            for name in &self.missing {
                out.push_str(&format!("  [{}] {}\n", Severity::Critical, name));
            }
        }

        let s = &self.summary;
        out.push_str(&format!(
            "\nSummary: {} passed, {} minor, {} major, {} critical\n",
            s.passed.len(),
            s.minor.len(),
            s.major.len(),
            s.critical.len(),
        ));
        let verdict = if s.is_failed() { "FAILED" } else { "OK" };
        out.push_str(&format!("Result: {}\n", verdict));
        out
    }
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}
