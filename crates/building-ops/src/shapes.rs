//! Custom volumes of the building: alcove side walls, alcove ceiling and
//! chimney gable.

use storefront_types::{AlcoveCeiling, AlcoveSide, ChimneyGable, DoorAlcove};

use crate::hexahedron::Hexahedron;

/// Which alcove side wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Direction of the wall's outer face along X.
    fn outward(self) -> f64 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Angled alcove side wall.
///
/// Cap A is the outer face, cap B the inner face. The wall runs from
/// `y_front` to the front face of the back wall, with its centreline moving
/// from `front_x` to `back_x`. Both sides come from this one routine, so a
/// symmetric alcove yields walls that are exact X mirrors.
pub fn alcove_side_wall(alcove: &DoorAlcove, side: Side) -> Hexahedron {
    let AlcoveSide { front_x, back_x } = match side {
        Side::Left => alcove.left,
        Side::Right => alcove.right,
    };
    let offset = side.outward() * alcove.thickness / 2.0;
    let (y0, y1) = (alcove.y_front, alcove.side_wall_back_y());
    let (z0, z1) = (0.0, alcove.height);

    let face = |dx: f64| {
        [
            [front_x + dx, y0, z0],
            [back_x + dx, y1, z0],
            [back_x + dx, y1, z1],
            [front_x + dx, y0, z1],
        ]
    };
    Hexahedron::from_caps(face(offset), face(-offset))
}

/// Trapezoidal alcove ceiling slab.
///
/// Cap A is the underside, cap B the top. Corners go front-left,
/// front-right, back-right, back-left.
pub fn alcove_ceiling(alcove: &DoorAlcove, ceiling: &AlcoveCeiling) -> Hexahedron {
    let (fw, bw) = (ceiling.front_width / 2.0, ceiling.back_width / 2.0);
    let (y0, y1) = (alcove.y_front, alcove.y_back);
    let slab = |z: f64| {
        [
            [-fw, y0, z],
            [fw, y0, z],
            [bw, y1, z],
            [-bw, y1, z],
        ]
    };
    Hexahedron::from_caps(
        slab(ceiling.elevation),
        slab(ceiling.elevation + ceiling.thickness),
    )
}

/// Gabled chimney cap with the ridge along Y.
///
/// Caps are the front and rear gable ends. A zero `ridge_width` collapses
/// the top edge of each cap to a point.
pub fn chimney_gable(
    center_x: f64,
    center_y: f64,
    width: f64,
    depth: f64,
    base_z: f64,
    gable: &ChimneyGable,
) -> Hexahedron {
    let (hw, hd, hr) = (width / 2.0, depth / 2.0, gable.ridge_width / 2.0);
    let peak = base_z + gable.height;
    let end = |y: f64| {
        [
            [center_x - hw, y, base_z],
            [center_x + hw, y, base_z],
            [center_x + hr, y, peak],
            [center_x - hr, y, peak],
        ]
    };
    Hexahedron::from_caps(end(center_y - hd), end(center_y + hd))
}
