//! MemoryKernel: deterministic in-process kernel that records every call.
//!
//! Solids are kept as polygon meshes. A boolean difference is recorded on the
//! target instead of re-meshing it: an opening that lies inside a wall does
//! not change the wall's bounds, and the record keeps the cutter's exact
//! vertices for inspection. Export writes a binary STL of the solids as they
//! were created; recorded cuts are not part of the exported mesh.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info, instrument};

use crate::stl::encode_binary_stl;
use crate::tessellation::{tessellate_polyhedron, TriangleMesh};
use crate::traits::{Kernel, KernelQuery};
use crate::types::*;

/// Segments used to approximate a cylinder's wall.
pub const CYLINDER_SEGMENTS: usize = 32;

/// The shape a solid was created as.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolidKind {
    Box,
    Cylinder { radius: f64, height: f64 },
    Custom,
}

/// One kernel call, in the order it was made.
#[derive(Debug, Clone, PartialEq)]
pub enum KernelCall {
    CreateBox { name: String },
    CreateCylinder { name: String },
    CreateCustom { name: String },
    BooleanDifference { target: String, cutter: String },
    AssignColor { name: String, color: String },
    Export { path: String, solids: usize },
    Reset,
}

/// A cutter that was subtracted from a solid.
#[derive(Debug, Clone, PartialEq)]
pub struct CutRecord {
    pub cutter_name: String,
    pub cutter_vertices: Vec<Vec3>,
    pub cutter_bounds: Bounds,
}

#[derive(Debug, Clone)]
struct MemorySolid {
    name: String,
    kind: SolidKind,
    vertices: Vec<Vec3>,
    faces: Vec<Vec<usize>>,
    bounds: Bounds,
    color: Option<String>,
    cuts: Vec<CutRecord>,
}

/// Deterministic kernel for tests and headless runs.
pub struct MemoryKernel {
    next_handle: u64,
    solids: HashMap<u64, MemorySolid>,
    calls: Vec<KernelCall>,
    failing_targets: Vec<String>,
}

impl MemoryKernel {
    pub fn new() -> Self {
        Self {
            next_handle: 1,
            solids: HashMap::new(),
            calls: Vec::new(),
            failing_targets: Vec::new(),
        }
    }

    /// Make every later boolean difference on the named solid fail.
    pub fn fail_booleans_on(&mut self, target_name: &str) {
        self.failing_targets.push(target_name.to_string());
    }

    /// Every call made since construction, resets included.
    pub fn calls(&self) -> &[KernelCall] {
        &self.calls
    }

    pub fn export_calls(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, KernelCall::Export { .. }))
            .count()
    }

    /// Number of solids currently in the scene.
    pub fn live_count(&self) -> usize {
        self.solids.len()
    }

    pub fn find(&self, name: &str) -> Option<SolidHandle> {
        self.solids
            .iter()
            .find(|(_, s)| s.name == name)
            .map(|(id, _)| SolidHandle(*id))
    }

    pub fn kind_of(&self, solid: &SolidHandle) -> Option<SolidKind> {
        self.solids.get(&solid.id()).map(|s| s.kind)
    }

    pub fn vertices_of(&self, solid: &SolidHandle) -> Option<&[Vec3]> {
        self.solids.get(&solid.id()).map(|s| s.vertices.as_slice())
    }

    pub fn color_of(&self, solid: &SolidHandle) -> Option<&str> {
        self.solids.get(&solid.id()).and_then(|s| s.color.as_deref())
    }

    pub fn cuts_on(&self, solid: &SolidHandle) -> &[CutRecord] {
        self.solids
            .get(&solid.id())
            .map(|s| s.cuts.as_slice())
            .unwrap_or(&[])
    }

    fn alloc_handle(&mut self) -> SolidHandle {
        let h = SolidHandle(self.next_handle);
        self.next_handle += 1;
        h
    }

    fn insert(
        &mut self,
        name: &str,
        kind: SolidKind,
        vertices: Vec<Vec3>,
        faces: Vec<Vec<usize>>,
        bounds: Bounds,
    ) -> SolidHandle {
        let handle = self.alloc_handle();
        self.solids.insert(
            handle.id(),
            MemorySolid {
                name: name.to_string(),
                kind,
                vertices,
                faces,
                bounds,
                color: None,
                cuts: Vec::new(),
            },
        );
        handle
    }

    fn solid(&self, handle: &SolidHandle) -> Result<&MemorySolid, KernelError> {
        self.solids
            .get(&handle.id())
            .ok_or(KernelError::SolidNotFound { id: handle.id() })
    }
}

impl Default for MemoryKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl Kernel for MemoryKernel {
    fn create_box(
        &mut self,
        name: &str,
        size: Vec3,
        center: Vec3,
    ) -> Result<SolidHandle, KernelError> {
        check_finite(name, &[size, center])?;
        if size.iter().any(|&s| s <= 0.0) {
            return Err(KernelError::InvalidGeometry {
                name: name.to_string(),
                reason: format!("box size must be positive, got {:?}", size),
            });
        }
        self.calls.push(KernelCall::CreateBox {
            name: name.to_string(),
        });

        let [hx, hy, hz] = [size[0] / 2.0, size[1] / 2.0, size[2] / 2.0];
        let [cx, cy, cz] = center;
        let vertices = vec![
            [cx + hx, cy - hy, cz - hz],
            [cx + hx, cy + hy, cz - hz],
            [cx + hx, cy + hy, cz + hz],
            [cx + hx, cy - hy, cz + hz],
            [cx - hx, cy - hy, cz - hz],
            [cx - hx, cy + hy, cz - hz],
            [cx - hx, cy + hy, cz + hz],
            [cx - hx, cy - hy, cz + hz],
        ];
        let faces = BOX_FACES.iter().map(|f| f.to_vec()).collect();
        let bounds = Bounds {
            min: [cx - hx, cy - hy, cz - hz],
            max: [cx + hx, cy + hy, cz + hz],
        };
        let handle = self.insert(name, SolidKind::Box, vertices, faces, bounds);
        debug!(name, ?size, ?center, "box created");
        Ok(handle)
    }

    fn create_cylinder(
        &mut self,
        name: &str,
        radius: f64,
        height: f64,
        center: Vec3,
    ) -> Result<SolidHandle, KernelError> {
        check_finite(name, &[[radius, height, 0.0], center])?;
        if radius <= 0.0 || height <= 0.0 {
            return Err(KernelError::InvalidGeometry {
                name: name.to_string(),
                reason: format!("cylinder radius {} height {}", radius, height),
            });
        }
        self.calls.push(KernelCall::CreateCylinder {
            name: name.to_string(),
        });

        let n = CYLINDER_SEGMENTS;
        let [cx, cy, cz] = center;
        let (z0, z1) = (cz - height / 2.0, cz + height / 2.0);
        let mut vertices = Vec::with_capacity(2 * n);
        for z in [z0, z1] {
            for i in 0..n {
                let a = std::f64::consts::TAU * i as f64 / n as f64;
                vertices.push([cx + radius * a.cos(), cy + radius * a.sin(), z]);
            }
        }
        let mut faces: Vec<Vec<usize>> = vec![(0..n).rev().collect(), (n..2 * n).collect()];
        for i in 0..n {
            let j = (i + 1) % n;
            faces.push(vec![i, j, n + j, n + i]);
        }
        let bounds = Bounds {
            min: [cx - radius, cy - radius, z0],
            max: [cx + radius, cy + radius, z1],
        };
        let handle = self.insert(
            name,
            SolidKind::Cylinder { radius, height },
            vertices,
            faces,
            bounds,
        );
        debug!(name, radius, height, ?center, "cylinder created");
        Ok(handle)
    }

    fn create_custom(
        &mut self,
        name: &str,
        vertices: &[Vec3],
        faces: &[Quad],
    ) -> Result<SolidHandle, KernelError> {
        check_finite(name, vertices)?;
        if faces.len() < 4 {
            return Err(KernelError::InvalidGeometry {
                name: name.to_string(),
                reason: format!("a closed volume needs at least 4 faces, got {}", faces.len()),
            });
        }
        if let Some(&bad) = faces.iter().flatten().find(|&&i| i >= vertices.len()) {
            return Err(KernelError::InvalidGeometry {
                name: name.to_string(),
                reason: format!(
                    "face index {} out of range ({} vertices)",
                    bad,
                    vertices.len()
                ),
            });
        }
        let bounds = Bounds::of_points(vertices).ok_or_else(|| KernelError::InvalidGeometry {
            name: name.to_string(),
            reason: "no vertices".to_string(),
        })?;
        self.calls.push(KernelCall::CreateCustom {
            name: name.to_string(),
        });

        let faces = faces.iter().map(|f| f.to_vec()).collect();
        let handle = self.insert(name, SolidKind::Custom, vertices.to_vec(), faces, bounds);
        debug!(name, vertices = vertices.len(), "custom volume created");
        Ok(handle)
    }

    #[instrument(skip(self))]
    fn boolean_difference(
        &mut self,
        target: &SolidHandle,
        cutter: SolidHandle,
    ) -> Result<(), KernelError> {
        // The cutter leaves the scene on every path.
        let cutter_solid = self
            .solids
            .remove(&cutter.id())
            .ok_or(KernelError::SolidNotFound { id: cutter.id() })?;
        let target_solid = self
            .solids
            .get_mut(&target.id())
            .ok_or(KernelError::SolidNotFound { id: target.id() })?;

        self.calls.push(KernelCall::BooleanDifference {
            target: target_solid.name.clone(),
            cutter: cutter_solid.name.clone(),
        });

        if self.failing_targets.contains(&target_solid.name) {
            return Err(KernelError::BooleanFailed {
                reason: format!("difference on {} rejected", target_solid.name),
            });
        }
        if !target_solid.bounds.overlaps(&cutter_solid.bounds) {
            return Err(KernelError::BooleanFailed {
                reason: format!(
                    "cutter {} does not intersect {}",
                    cutter_solid.name, target_solid.name
                ),
            });
        }

        target_solid.cuts.push(CutRecord {
            cutter_name: cutter_solid.name,
            cutter_vertices: cutter_solid.vertices,
            cutter_bounds: cutter_solid.bounds,
        });
        Ok(())
    }

    fn assign_flat_color(
        &mut self,
        solid: &SolidHandle,
        color_hex: &str,
    ) -> Result<(), KernelError> {
        let valid = color_hex.len() == 7
            && color_hex.starts_with('#')
            && color_hex[1..].chars().all(|c| c.is_ascii_hexdigit());
        if !valid {
            return Err(KernelError::InvalidColor {
                color: color_hex.to_string(),
            });
        }
        let s = self
            .solids
            .get_mut(&solid.id())
            .ok_or(KernelError::SolidNotFound { id: solid.id() })?;
        s.color = Some(color_hex.to_string());
        self.calls.push(KernelCall::AssignColor {
            name: s.name.clone(),
            color: color_hex.to_string(),
        });
        Ok(())
    }

    #[instrument(skip(self, solids), fields(count = solids.len()))]
    fn export(
        &mut self,
        solids: &[SolidHandle],
        path: &Path,
    ) -> Result<ExportArtifact, KernelError> {
        let mut mesh = TriangleMesh::default();
        for handle in solids {
            let s = self.solid(handle)?;
            mesh.append(&tessellate_polyhedron(&s.vertices, &s.faces));
        }

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("scene");
        let bytes = encode_binary_stl(&mesh, name)?;

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| KernelError::ExportFailed {
                reason: format!("{}: {}", dir.display(), e),
            })?;
        }
        std::fs::write(path, &bytes).map_err(|e| KernelError::ExportFailed {
            reason: format!("{}: {}", path.display(), e),
        })?;

        self.calls.push(KernelCall::Export {
            path: path.display().to_string(),
            solids: solids.len(),
        });
        info!(path = %path.display(), triangles = mesh.triangle_count(), "scene exported");

        Ok(ExportArtifact {
            path: path.to_path_buf(),
            solid_count: solids.len(),
            triangle_count: mesh.triangle_count(),
            bytes: bytes.len(),
        })
    }

    fn reset(&mut self) {
        self.solids.clear();
        self.calls.push(KernelCall::Reset);
    }
}

impl KernelQuery for MemoryKernel {
    fn world_bounds(&self, solid: &SolidHandle) -> Result<Bounds, KernelError> {
        self.solid(solid).map(|s| s.bounds)
    }

    fn solid_name(&self, solid: &SolidHandle) -> Option<&str> {
        self.solids.get(&solid.id()).map(|s| s.name.as_str())
    }
}

/// Face winding shared by boxes and custom hexahedra: +x cap, -x cap,
/// then the -y, +y, +z and -z sides.
const BOX_FACES: [Quad; 6] = [
    [0, 1, 2, 3],
    [4, 7, 6, 5],
    [0, 3, 7, 4],
    [1, 5, 6, 2],
    [3, 2, 6, 7],
    [0, 4, 5, 1],
];

fn check_finite(name: &str, values: &[Vec3]) -> Result<(), KernelError> {
    if values.iter().flatten().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(KernelError::InvalidGeometry {
            name: name.to_string(),
            reason: "non-finite coordinate".to_string(),
        })
    }
}
