//! CPU-side quad geometry for horizontal block runs and the backend seam
//! that turns it into renderer-owned handles.
#![forbid(unsafe_code)]

pub mod backend;
pub mod constants;
pub mod quad;

pub use backend::{CpuGeometry, CpuMeshHandle, GeometryBackend};
pub use constants::{BLOCK_SIZE, HALF_BLOCK};
pub use quad::{QuadMesh, Vertex};
