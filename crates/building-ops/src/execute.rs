use scene_kernel::Kernel;
use storefront_types::Role;
use tracing::debug;

use crate::cutter::CutterPlan;
use crate::types::{GeometryElement, OpError, Shape};

/// Create `shape` in the kernel, colour it, and describe the result.
pub fn execute_shape(
    kernel: &mut dyn Kernel,
    name: &str,
    role: Role,
    shape: &Shape,
    color_hex: &str,
) -> Result<GeometryElement, OpError> {
    let wrap = |source| OpError::Create {
        name: name.to_string(),
        source,
    };

    let handle = match shape {
        Shape::Box { size, center } => kernel.create_box(name, *size, *center),
        Shape::Cylinder {
            radius,
            height,
            center,
        } => kernel.create_cylinder(name, *radius, *height, *center),
        Shape::Hexahedron { hex, .. } => kernel.create_custom(name, hex.vertices(), hex.faces()),
    }
    .map_err(wrap)?;

    kernel.assign_flat_color(&handle, color_hex).map_err(wrap)?;

    Ok(GeometryElement {
        name: name.to_string(),
        role,
        kind: shape.kind(),
        dimensions: shape.dimensions(),
        center: shape.center(),
        rotation_z: shape.rotation_z(),
        handle,
    })
}

/// Create the cutter for `plan` and subtract it from `target`.
///
/// An axis-aligned cutter is a plain box. A rotated cutter is created with
/// its rotation already in its vertices, so the difference runs against the
/// final cutter shape. The kernel consumes the cutter either way.
pub fn execute_cut(
    kernel: &mut dyn Kernel,
    target: &GeometryElement,
    cutter_name: &str,
    plan: &CutterPlan,
) -> Result<(), OpError> {
    let wrap = |source| OpError::Cut {
        target: target.name.clone(),
        cutter: cutter_name.to_string(),
        source,
    };

    let cutter = if plan.is_axis_aligned() {
        kernel.create_box(cutter_name, plan.size, plan.center)
    } else {
        let hex = plan.hexahedron();
        kernel.create_custom(cutter_name, hex.vertices(), hex.faces())
    }
    .map_err(wrap)?;

    debug!(
        target = %target.name,
        cutter = cutter_name,
        depth = plan.depth,
        rotation_deg = plan.rotation_z.to_degrees(),
        "applying cutter"
    );
    kernel.boolean_difference(&target.handle, cutter).map_err(wrap)
}
