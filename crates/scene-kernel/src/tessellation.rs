//! Triangulation of the kernel's polygonal solids for export.

use crate::types::Vec3;

/// Flat triangle mesh: positions as [x0, y0, z0, x1, ...], indices in triples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Append another mesh, offsetting its indices.
    pub fn append(&mut self, other: &TriangleMesh) {
        let base = self.vertex_count() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }
}

/// Fan-triangulate each polygon face and orient the result outward.
///
/// Faces may repeat a vertex (a gable with a sharp ridge collapses a quad to a
/// triangle); zero-area triangles are dropped. If the faces wind inward, as a
/// mirrored volume does, every triangle is flipped.
pub fn tessellate_polyhedron(vertices: &[Vec3], faces: &[Vec<usize>]) -> TriangleMesh {
    let mut triangles: Vec<[usize; 3]> = Vec::new();
    for face in faces {
        for k in 1..face.len().saturating_sub(1) {
            let tri = [face[0], face[k], face[k + 1]];
            if area2(vertices, tri) > 1e-12 {
                triangles.push(tri);
            }
        }
    }

    if signed_volume(vertices, &triangles) < 0.0 {
        for tri in &mut triangles {
            tri.swap(1, 2);
        }
    }

    TriangleMesh {
        vertices: vertices
            .iter()
            .flat_map(|v| v.iter().map(|&c| c as f32))
            .collect(),
        indices: triangles
            .iter()
            .flat_map(|t| t.iter().map(|&i| i as u32))
            .collect(),
    }
}

/// Signed volume enclosed by a triangle soup (positive when outward-facing).
pub fn signed_volume(vertices: &[Vec3], triangles: &[[usize; 3]]) -> f64 {
    triangles
        .iter()
        .map(|&[a, b, c]| dot(vertices[a], cross(vertices[b], vertices[c])) / 6.0)
        .sum()
}

fn area2(vertices: &[Vec3], [a, b, c]: [usize; 3]) -> f64 {
    let ab = sub(vertices[b], vertices[a]);
    let ac = sub(vertices[c], vertices[a]);
    let n = cross(ab, ac);
    dot(n, n).sqrt()
}

fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}
