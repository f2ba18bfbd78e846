//! Measures a built scene and grades each deviation into a tolerance tier.
//!
//! Nothing here mutates geometry: every entry point takes the kernel as a
//! read-only [`KernelQuery`](scene_kernel::KernelQuery).

pub mod building;
pub mod element;
pub mod report;
pub mod tolerance;

pub use building::{verify_building, BuildingMeasurements, BuildingResult};
pub use element::{verify_elements, BatchResult, ElementVerdict};
pub use report::VerificationReport;
pub use tolerance::{
    classify, classify_count, Severity, Summary, ToleranceResult, DEFAULT_TOLERANCE_FLOOR,
};
