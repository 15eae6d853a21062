use crate::quad::QuadMesh;

/// Turns CPU quads into renderer-owned geometry.
///
/// Every handle returned by [`upload`](GeometryBackend::upload) must come back
/// through [`release`](GeometryBackend::release) exactly once; whoever stores
/// the handle owns that pairing.
pub trait GeometryBackend {
    type Handle;

    fn upload(&mut self, mesh: &QuadMesh) -> Self::Handle;

    fn release(&mut self, handle: Self::Handle);
}

/// Handle produced by [`CpuGeometry`]; keeps the mesh itself.
#[derive(Clone, Debug, PartialEq)]
pub struct CpuMeshHandle {
    pub serial: u64,
    pub mesh: QuadMesh,
}

/// Backend that keeps geometry in memory and tracks how many handles are live.
#[derive(Debug, Default)]
pub struct CpuGeometry {
    next_serial: u64,
    live: usize,
    uploaded: u64,
    released: u64,
}

impl CpuGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles uploaded and not yet released.
    #[inline]
    pub fn live(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn uploaded(&self) -> u64 {
        self.uploaded
    }

    #[inline]
    pub fn released(&self) -> u64 {
        self.released
    }
}

impl GeometryBackend for CpuGeometry {
    type Handle = CpuMeshHandle;

    fn upload(&mut self, mesh: &QuadMesh) -> CpuMeshHandle {
        let serial = self.next_serial;
        self.next_serial = self.next_serial.wrapping_add(1);
        self.live += 1;
        self.uploaded += 1;
        CpuMeshHandle {
            serial,
            mesh: mesh.clone(),
        }
    }

    fn release(&mut self, handle: CpuMeshHandle) {
        if self.live == 0 {
            log::error!(target: "mesh", "released geometry #{} with no live handles", handle.serial);
            return;
        }
        self.live -= 1;
        self.released += 1;
    }
}
