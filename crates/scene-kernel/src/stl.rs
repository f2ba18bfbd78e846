//! Binary STL encoding.

use crate::tessellation::TriangleMesh;
use crate::types::KernelError;

/// Encode a mesh as binary STL.
///
/// Layout: 80-byte header, u32 triangle count (little-endian), then per
/// triangle 3×f32 normal + 3×(3×f32 vertex) + u16 attribute = 50 bytes.
pub fn encode_binary_stl(mesh: &TriangleMesh, name: &str) -> Result<Vec<u8>, KernelError> {
    let tri_count = mesh.triangle_count();
    if tri_count == 0 {
        return Err(KernelError::ExportFailed {
            reason: "mesh has no triangles".to_string(),
        });
    }

    let vertex_count = mesh.vertex_count();
    if let Some(&idx) = mesh.indices.iter().find(|&&i| i as usize >= vertex_count) {
        return Err(KernelError::ExportFailed {
            reason: format!(
                "index {} out of range (vertex count = {})",
                idx, vertex_count
            ),
        });
    }

    let mut buf = Vec::with_capacity(84 + tri_count * 50);

    let header = format!("binary STL: {}", name);
    let header_bytes = header.as_bytes();
    buf.extend_from_slice(&header_bytes[..header_bytes.len().min(80)]);
    buf.resize(80, 0u8);

    buf.extend_from_slice(&(tri_count as u32).to_le_bytes());

    for tri in mesh.indices.chunks(3) {
        let p = |k: usize| {
            let i = tri[k] as usize * 3;
            [mesh.vertices[i], mesh.vertices[i + 1], mesh.vertices[i + 2]]
        };
        let (p0, p1, p2) = (p(0), p(1), p(2));

        let a = [p1[0] - p0[0], p1[1] - p0[1], p1[2] - p0[2]];
        let b = [p2[0] - p0[0], p2[1] - p0[1], p2[2] - p0[2]];
        let n = [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ];
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        let n = if len > 1e-12 {
            [n[0] / len, n[1] / len, n[2] / len]
        } else {
            [0.0f32, 0.0, 1.0]
        };

        for c in n.iter().chain(&p0).chain(&p1).chain(&p2) {
            buf.extend_from_slice(&c.to_le_bytes());
        }
        buf.extend_from_slice(&0u16.to_le_bytes());
    }

    Ok(buf)
}
