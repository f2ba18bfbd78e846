use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A point or extent in world space, metres.
pub type Vec3 = [f64; 3];

/// Quad face as four indices into a vertex list.
pub type Quad = [usize; 4];

/// Opaque handle to a solid in the geometry kernel.
/// Valid only until the next kernel reset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SolidHandle(pub(crate) u64);

impl SolidHandle {
    pub(crate) fn id(&self) -> u64 {
        self.0
    }
}

/// Axis-aligned world-space bounds of a solid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    /// Bounds of a point set. `None` when empty.
    pub fn of_points(points: &[Vec3]) -> Option<Self> {
        let first = *points.first()?;
        let mut b = Bounds {
            min: first,
            max: first,
        };
        for p in &points[1..] {
            for i in 0..3 {
                b.min[i] = b.min[i].min(p[i]);
                b.max[i] = b.max[i].max(p[i]);
            }
        }
        Some(b)
    }

    pub fn size(&self) -> Vec3 {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    pub fn center(&self) -> Vec3 {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
            (self.min[2] + self.max[2]) / 2.0,
        ]
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        let mut b = *self;
        for i in 0..3 {
            b.min[i] = b.min[i].min(other.min[i]);
            b.max[i] = b.max[i].max(other.max[i]);
        }
        b
    }

    /// True when the two boxes share interior volume.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        (0..3).all(|i| self.min[i] < other.max[i] && other.min[i] < self.max[i])
    }
}

/// What the kernel wrote during an export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportArtifact {
    pub path: PathBuf,
    pub solid_count: usize,
    pub triangle_count: usize,
    pub bytes: usize,
}

/// Errors from kernel operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum KernelError {
    #[error("boolean operation failed: {reason}")]
    BooleanFailed { reason: String },

    #[error("invalid geometry for {name}: {reason}")]
    InvalidGeometry { name: String, reason: String },

    #[error("solid not found: {id}")]
    SolidNotFound { id: u64 },

    #[error("export failed: {reason}")]
    ExportFailed { reason: String },

    #[error("invalid color {color:?}")]
    InvalidColor { color: String },
}
