use std::f64::consts::{FRAC_PI_2, PI};

use scene_kernel::Vec3;
use storefront_types::{CutoutSpec, DoorAlcove, WallKey};

use crate::hexahedron::Hexahedron;
use crate::shapes::Side;

/// Extra cutter depth on each side of the wall.
pub const CUTTER_CLEARANCE: f64 = 0.01;

/// Rotations closer to zero than this count as axis-aligned.
const ROTATION_EPS: f64 = 1e-12;

/// Where and how big a cutter is, before it exists in the kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutterPlan {
    /// Box size along the cutter's local axes.
    pub size: Vec3,
    /// Extent through the wall.
    pub depth: f64,
    pub center: Vec3,
    /// Rotation about Z, radians, in (-90°, 90°].
    pub rotation_z: f64,
}

impl CutterPlan {
    /// Cutter for an opening in an axis-aligned wall.
    pub fn straight(key: WallKey, cutout: &CutoutSpec, wall_thickness: f64) -> Self {
        let depth = cutter_depth(wall_thickness, cutout);
        // Left and right walls are thick along X.
        let size = if key.thickness_along_x() {
            [depth, cutout.width, cutout.height]
        } else {
            [cutout.width, depth, cutout.height]
        };
        Self {
            size,
            depth,
            center: cutter_center(cutout),
            rotation_z: 0.0,
        }
    }

    /// Cutter for an opening in an angled alcove side wall.
    pub fn angled(cutout: &CutoutSpec, wall_thickness: f64, rotation_z: f64) -> Self {
        let depth = cutter_depth(wall_thickness, cutout);
        Self {
            size: [cutout.width, depth, cutout.height],
            depth,
            center: cutter_center(cutout),
            rotation_z: normalize_half_turn(rotation_z),
        }
    }

    pub fn is_axis_aligned(&self) -> bool {
        self.rotation_z.abs() < ROTATION_EPS
    }

    /// Cutter corners with the rotation already applied.
    pub fn hexahedron(&self) -> Hexahedron {
        Hexahedron::oriented_box(self.size, self.center, self.rotation_z)
    }
}

/// Depth that fully penetrates the wall: thickness plus the recess and reveal
/// margins plus clearance on both faces.
pub fn cutter_depth(wall_thickness: f64, cutout: &CutoutSpec) -> f64 {
    wall_thickness + cutout.recess_depth + cutout.reveal_depth + 2.0 * CUTTER_CLEARANCE
}

/// Cutouts are positioned by their sill; the cutter is centred on the opening.
pub fn cutter_center(cutout: &CutoutSpec) -> Vec3 {
    [
        cutout.position.x,
        cutout.position.y,
        cutout.position.z + cutout.height / 2.0,
    ]
}

/// Direction of an alcove side wall in plan, measured from +Y toward +X.
pub fn wall_direction_angle(alcove: &DoorAlcove, side: Side) -> f64 {
    let s = match side {
        Side::Left => alcove.left,
        Side::Right => alcove.right,
    };
    (s.back_x - s.front_x).atan2(alcove.y_back - alcove.y_front)
}

/// Cutter rotation for an alcove side wall: 90° minus the wall's direction
/// angle, brought into (-90°, 90°].
pub fn alcove_cutter_rotation(alcove: &DoorAlcove, side: Side) -> f64 {
    normalize_half_turn(FRAC_PI_2 - wall_direction_angle(alcove, side))
}

/// Bring an angle into (-π/2, π/2]. A rectangular cutter looks the same after
/// a half turn, so this never changes the cut.
pub fn normalize_half_turn(angle: f64) -> f64 {
    let mut a = angle % PI;
    if a > FRAC_PI_2 {
        a -= PI;
    } else if a <= -FRAC_PI_2 {
        a += PI;
    }
    a
}
