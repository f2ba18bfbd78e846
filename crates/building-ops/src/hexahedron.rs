use scene_kernel::{Bounds, Quad, Vec3};

/// Face winding shared by every custom hexahedron.
///
/// Vertices 0..4 form cap A and 4..8 cap B, with vertex `4 + i` opposite
/// vertex `i`. Corners go around each cap in the same direction; for a wall
/// that is front-base, back-base, back-top, front-top. Faces: cap A, cap B,
/// then the four sides joining edges 0-3, 1-2, 3-2 and 0-1.
pub const HEX_FACES: [Quad; 6] = [
    [0, 1, 2, 3],
    [4, 7, 6, 5],
    [0, 3, 7, 4],
    [1, 5, 6, 2],
    [3, 2, 6, 7],
    [0, 4, 5, 1],
];

/// Eight-vertex volume bounded by two opposing quads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hexahedron {
    vertices: [Vec3; 8],
}

impl Hexahedron {
    /// Build from two caps. `b[i]` must sit opposite `a[i]`.
    pub fn from_caps(a: [Vec3; 4], b: [Vec3; 4]) -> Self {
        Self {
            vertices: [a[0], a[1], a[2], a[3], b[0], b[1], b[2], b[3]],
        }
    }

    /// Box of local `size` (x, y, z) rotated by `rotation_z` radians about the
    /// vertical axis through `center`. Cap A is the local +x face.
    pub fn oriented_box(size: Vec3, center: Vec3, rotation_z: f64) -> Self {
        let [hx, hy, hz] = [size[0] / 2.0, size[1] / 2.0, size[2] / 2.0];
        let (sin, cos) = rotation_z.sin_cos();
        let place = |x: f64, y: f64, z: f64| {
            [
                center[0] + x * cos - y * sin,
                center[1] + x * sin + y * cos,
                center[2] + z,
            ]
        };
        let cap = |x: f64| {
            [
                place(x, -hy, -hz),
                place(x, hy, -hz),
                place(x, hy, hz),
                place(x, -hy, hz),
            ]
        };
        Self::from_caps(cap(hx), cap(-hx))
    }

    pub fn vertices(&self) -> &[Vec3; 8] {
        &self.vertices
    }

    pub fn faces(&self) -> &'static [Quad; 6] {
        &HEX_FACES
    }

    /// Reflect through the plane x = 0, keeping vertex order.
    pub fn mirrored_x(&self) -> Self {
        let mut vertices = self.vertices;
        for v in &mut vertices {
            v[0] = -v[0];
        }
        Self { vertices }
    }

    pub fn bounds(&self) -> Bounds {
        let mut b = Bounds {
            min: self.vertices[0],
            max: self.vertices[0],
        };
        for v in &self.vertices[1..] {
            for i in 0..3 {
                b.min[i] = b.min[i].min(v[i]);
                b.max[i] = b.max[i].max(v[i]);
            }
        }
        b
    }
}
