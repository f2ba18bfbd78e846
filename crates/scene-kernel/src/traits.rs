use std::path::Path;

use crate::types::*;

/// Scene-building capabilities of the geometry kernel.
///
/// Every solid carries a scene name. The kernel owns all geometry; callers
/// hold only handles.
pub trait Kernel {
    /// Axis-aligned box of `size` (x, y, z) centred at `center`.
    fn create_box(&mut self, name: &str, size: Vec3, center: Vec3)
        -> Result<SolidHandle, KernelError>;

    /// Upright cylinder centred at `center`.
    fn create_cylinder(
        &mut self,
        name: &str,
        radius: f64,
        height: f64,
        center: Vec3,
    ) -> Result<SolidHandle, KernelError>;

    /// Closed volume from explicit vertices and quad faces.
    fn create_custom(
        &mut self,
        name: &str,
        vertices: &[Vec3],
        faces: &[Quad],
    ) -> Result<SolidHandle, KernelError>;

    /// Subtract `cutter` from `target` in place. The cutter is consumed and
    /// removed from the scene whether or not the operation succeeds.
    fn boolean_difference(
        &mut self,
        target: &SolidHandle,
        cutter: SolidHandle,
    ) -> Result<(), KernelError>;

    fn assign_flat_color(&mut self, solid: &SolidHandle, color_hex: &str)
        -> Result<(), KernelError>;

    /// Write the given solids to `path` as a single mesh file.
    fn export(&mut self, solids: &[SolidHandle], path: &Path)
        -> Result<ExportArtifact, KernelError>;

    /// Drop every solid. Outstanding handles become invalid.
    fn reset(&mut self);
}

/// Read-only scene queries. Measurement code takes only this trait, so it
/// cannot change geometry.
pub trait KernelQuery {
    fn world_bounds(&self, solid: &SolidHandle) -> Result<Bounds, KernelError>;

    fn solid_name(&self, solid: &SolidHandle) -> Option<&str>;
}

/// Mutable building plus read-only measurement on one object.
pub trait KernelBundle: Kernel + KernelQuery {
    fn as_query(&self) -> &dyn KernelQuery;
}

impl<T: Kernel + KernelQuery> KernelBundle for T {
    fn as_query(&self) -> &dyn KernelQuery {
        self
    }
}
