pub mod memory_kernel;
pub mod stl;
pub mod tessellation;
pub mod traits;
pub mod types;

pub use memory_kernel::{CutRecord, KernelCall, MemoryKernel, SolidKind, CYLINDER_SEGMENTS};
pub use traits::*;
pub use types::*;
