use scene_kernel::{KernelError, SolidHandle, Vec3};
use serde::{Deserialize, Serialize};
use storefront_types::Role;

use crate::hexahedron::Hexahedron;

/// How a scene element was constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementKind {
    Box,
    Cylinder,
    CustomHexahedron,
}

/// Bounding dimensions: width along X, depth along Y, height along Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub depth: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn from_size(size: Vec3) -> Self {
        Self {
            width: size[0],
            depth: size[1],
            height: size[2],
        }
    }
}

/// Geometry to create, independent of any kernel.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Box { size: Vec3, center: Vec3 },
    Cylinder { radius: f64, height: f64, center: Vec3 },
    Hexahedron { hex: Hexahedron, rotation_z: f64 },
}

impl Shape {
    pub fn kind(&self) -> ElementKind {
        match self {
            Shape::Box { .. } => ElementKind::Box,
            Shape::Cylinder { .. } => ElementKind::Cylinder,
            Shape::Hexahedron { .. } => ElementKind::CustomHexahedron,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        match self {
            Shape::Box { size, .. } => Dimensions::from_size(*size),
            Shape::Cylinder { radius, height, .. } => Dimensions {
                width: 2.0 * radius,
                depth: 2.0 * radius,
                height: *height,
            },
            Shape::Hexahedron { hex, .. } => Dimensions::from_size(hex.bounds().size()),
        }
    }

    pub fn center(&self) -> Vec3 {
        match self {
            Shape::Box { center, .. } | Shape::Cylinder { center, .. } => *center,
            Shape::Hexahedron { hex, .. } => hex.bounds().center(),
        }
    }

    pub fn rotation_z(&self) -> f64 {
        match self {
            Shape::Hexahedron { rotation_z, .. } => *rotation_z,
            _ => 0.0,
        }
    }
}

/// A named solid in the scene.
#[derive(Debug, Clone)]
pub struct GeometryElement {
    pub name: String,
    pub role: Role,
    pub kind: ElementKind,
    /// Dimensions at creation, before any cutout.
    pub dimensions: Dimensions,
    pub center: Vec3,
    pub rotation_z: f64,
    /// Runtime-only, valid until the kernel is reset.
    pub handle: SolidHandle,
}

/// Errors from building operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum OpError {
    #[error("kernel error creating {name}: {source}")]
    Create {
        name: String,
        #[source]
        source: KernelError,
    },

    #[error("kernel error cutting {target} with {cutter}: {source}")]
    Cut {
        target: String,
        cutter: String,
        #[source]
        source: KernelError,
    },
}
