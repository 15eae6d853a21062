use std::sync::{Arc, RwLock};

use tessel_mesh_cpu::{CpuGeometry, GeometryBackend};

use crate::error::GridResult;
use crate::grid::WorldGrid;
use crate::overlap::Probe;

/// Thread-shareable world. The grid and its run index sit behind one lock,
/// so a query never observes a cell edit without the matching rebuild.
pub struct SharedWorld<B: GeometryBackend = CpuGeometry> {
    inner: Arc<RwLock<WorldGrid<B>>>,
}

impl<B: GeometryBackend> Clone for SharedWorld<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: GeometryBackend> SharedWorld<B> {
    pub fn new(grid: WorldGrid<B>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(grid)),
        }
    }

    pub fn read<R>(&self, f: impl FnOnce(&WorldGrid<B>) -> R) -> GridResult<R> {
        let guard = self.inner.read()?;
        Ok(f(&*guard))
    }

    pub fn write<R>(&self, f: impl FnOnce(&mut WorldGrid<B>) -> R) -> GridResult<R> {
        let mut guard = self.inner.write()?;
        Ok(f(&mut *guard))
    }

    pub fn load(&self, source: &[u8], width: usize, height: usize) -> GridResult<()> {
        self.write(|g| g.load(source, width, height))?
    }

    pub fn save(&self, dest: &mut [u8], width: usize, height: usize) -> GridResult<()> {
        self.read(|g| g.save(dest, width, height))?
    }

    pub fn get(&self, x: usize, y: usize) -> GridResult<u8> {
        self.read(|g| g.get(x, y))?
    }

    pub fn set(&self, x: usize, y: usize, id: u8) -> GridResult<()> {
        self.write(|g| g.set(x, y, id))?
    }

    pub fn overlaps(&self, probe: &Probe) -> GridResult<bool> {
        self.read(|g| g.overlaps(probe))
    }
}
