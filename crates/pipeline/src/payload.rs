use checkpoint_store::CheckpointPayload;
use dimension_verify::{Summary, VerificationReport};

/// Checkpoint contents for a finished verification stage. The full report
/// rides along as `detail`.
pub fn payload_from(report: &VerificationReport) -> Result<CheckpointPayload, serde_json::Error> {
    let detail = serde_json::to_value(report)?;
    let Summary {
        passed,
        minor,
        major,
        critical,
    } = report.summary.clone();
    Ok(CheckpointPayload {
        critical_failures: critical,
        major_failures: major,
        minor_issues: minor,
        passed,
        detail,
    })
}
