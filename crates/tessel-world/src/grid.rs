use tessel_blocks::Block;
use tessel_mesh_cpu::{CpuGeometry, GeometryBackend};

use crate::config::{RebuildPolicy, WorldConfig};
use crate::error::{GridError, GridResult};
use crate::runs::{Run, RunEntry, RunIndex};

/// Authoritative block grid plus its derived run index.
///
/// The grid owns the geometry backend so that every run handle is released
/// exactly once: when a rebuild discards it, or when the grid is dropped.
/// Not internally synchronised; see [`SharedWorld`](crate::SharedWorld).
pub struct WorldGrid<B: GeometryBackend = CpuGeometry> {
    width: usize,
    height: usize,
    cells: Vec<u8>,
    index: RunIndex<B::Handle>,
    backend: B,
    policy: RebuildPolicy,
}

impl WorldGrid<CpuGeometry> {
    /// Empty grid backed by in-memory geometry.
    pub fn cpu() -> Self {
        Self::new(CpuGeometry::new())
    }
}

impl<B: GeometryBackend> WorldGrid<B> {
    pub fn new(backend: B) -> Self {
        Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
            index: RunIndex::new(),
            backend,
            policy: RebuildPolicy::default(),
        }
    }

    pub fn with_config(backend: B, cfg: &WorldConfig) -> Self {
        let mut grid = Self::new(backend);
        grid.policy = cfg.rebuild;
        grid
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn policy(&self) -> RebuildPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: RebuildPolicy) {
        self.policy = policy;
    }

    /// Row-major cell identifiers.
    #[inline]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn row(&self, y: usize) -> GridResult<&[u8]> {
        if y >= self.height {
            return Err(self.out_of_bounds(0, y));
        }
        Ok(&self.cells[y * self.width..(y + 1) * self.width])
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[inline]
    pub fn run_index(&self) -> &RunIndex<B::Handle> {
        &self.index
    }

    /// Runs with their geometry, in stored order.
    #[inline]
    pub fn entries(&self) -> &[RunEntry<B::Handle>] {
        self.index.entries()
    }

    pub fn runs(&self) -> impl Iterator<Item = &Run> + '_ {
        self.index.runs()
    }

    /// Replaces the grid with a copy of `source` (row-major, `width * height` cells).
    ///
    /// New storage is allocated before the old grid is released, so on error
    /// the previous contents and run index remain intact.
    pub fn load(&mut self, source: &[u8], width: usize, height: usize) -> GridResult<()> {
        let cells = width
            .checked_mul(height)
            .ok_or(GridError::Dimensions { width, height })?;
        if source.len() != cells {
            return Err(GridError::BufferSize {
                expected: cells,
                found: source.len(),
            });
        }
        let mut storage = Vec::new();
        storage
            .try_reserve_exact(cells)
            .map_err(|_| GridError::Allocation { cells })?;
        storage.extend_from_slice(source);

        self.cells = storage;
        self.width = width;
        self.height = height;
        self.rebuild();
        log::info!(
            target: "world",
            "loaded {}x{} world ({} runs)",
            width,
            height,
            self.index.len()
        );
        Ok(())
    }

    /// Copies the grid into `dest` if the caller's dimensions match exactly.
    pub fn save(&self, dest: &mut [u8], width: usize, height: usize) -> GridResult<()> {
        if width != self.width || height != self.height {
            log::error!(
                target: "world",
                "world size mismatch: grid is {}x{}, save requested {}x{}",
                self.width,
                self.height,
                width,
                height
            );
            return Err(GridError::DimensionMismatch {
                expected: (self.width, self.height),
                found: (width, height),
            });
        }
        if dest.len() != self.cells.len() {
            return Err(GridError::BufferSize {
                expected: self.cells.len(),
                found: dest.len(),
            });
        }
        dest.copy_from_slice(&self.cells);
        Ok(())
    }

    pub fn get(&self, x: usize, y: usize) -> GridResult<u8> {
        let i = self.index_of(x, y)?;
        Ok(self.cells[i])
    }

    pub fn block(&self, x: usize, y: usize) -> GridResult<Block> {
        self.get(x, y).map(Block::from_id)
    }

    /// Writes one cell and refreshes the run index per the rebuild policy.
    pub fn set(&mut self, x: usize, y: usize, id: u8) -> GridResult<()> {
        let i = self.index_of(x, y)?;
        self.cells[i] = id;
        match self.policy {
            RebuildPolicy::Full => self.rebuild(),
            RebuildPolicy::RowLocal => {
                let row = &self.cells[y * self.width..(y + 1) * self.width];
                self.index.rebuild_row(row, y, &mut self.backend);
            }
        }
        Ok(())
    }

    pub fn set_block(&mut self, x: usize, y: usize, block: Block) -> GridResult<()> {
        self.set(x, y, block.id())
    }

    /// Discards every run and its geometry, then regenerates from the cells.
    pub fn rebuild(&mut self) {
        self.index
            .rebuild(&self.cells, self.width, self.height, &mut self.backend);
    }

    #[inline]
    fn index_of(&self, x: usize, y: usize) -> GridResult<usize> {
        if x >= self.width || y >= self.height {
            return Err(self.out_of_bounds(x, y));
        }
        Ok(y * self.width + x)
    }

    fn out_of_bounds(&self, x: usize, y: usize) -> GridError {
        GridError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }
}

impl<B: GeometryBackend> Drop for WorldGrid<B> {
    fn drop(&mut self) {
        self.index.clear(&mut self.backend);
    }
}

impl<B: GeometryBackend> std::fmt::Debug for WorldGrid<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorldGrid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("runs", &self.index.len())
            .field("policy", &self.policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_empty() {
        let grid = WorldGrid::cpu();
        assert_eq!((grid.width(), grid.height()), (0, 0));
        assert!(grid.run_index().is_empty());
        assert!(matches!(grid.get(0, 0), Err(GridError::OutOfBounds { .. })));
    }

    #[test]
    fn load_rejects_short_buffer_and_keeps_old_state() {
        let mut grid = WorldGrid::cpu();
        grid.load(&[1, 1, 0, 2], 2, 2).unwrap();
        let err = grid.load(&[1, 2, 3], 2, 2).unwrap_err();
        assert_eq!(err, GridError::BufferSize { expected: 4, found: 3 });
        assert_eq!(grid.cells(), &[1, 1, 0, 2]);
        assert_eq!(grid.run_index().len(), 2);
    }

    #[test]
    fn load_rejects_overflowing_dimensions() {
        let mut grid = WorldGrid::cpu();
        let err = grid.load(&[], usize::MAX, 2).unwrap_err();
        assert!(matches!(err, GridError::Dimensions { .. }));
    }

    #[test]
    fn save_mismatch_leaves_dest_untouched() {
        let mut grid = WorldGrid::cpu();
        grid.load(&[3; 6], 3, 2).unwrap();
        let mut out = [9u8; 6];
        let err = grid.save(&mut out, 2, 3).unwrap_err();
        assert_eq!(
            err,
            GridError::DimensionMismatch {
                expected: (3, 2),
                found: (2, 3)
            }
        );
        assert_eq!(out, [9u8; 6]);
    }

    #[test]
    fn set_out_of_range_fails_without_mutation() {
        let mut grid = WorldGrid::cpu();
        grid.load(&[1, 2, 3, 4], 2, 2).unwrap();
        let err = grid.set(2, 0, 9).unwrap_err();
        assert_eq!(
            err,
            GridError::OutOfBounds {
                x: 2,
                y: 0,
                width: 2,
                height: 2
            }
        );
        assert_eq!(grid.cells(), &[1, 2, 3, 4]);
        assert!(grid.row(2).is_err());
        assert_eq!(grid.row(1).unwrap(), &[3, 4]);
    }

    #[test]
    fn block_accessor_maps_zero_to_empty() {
        let mut grid = WorldGrid::cpu();
        grid.load(&[0, 4], 2, 1).unwrap();
        assert_eq!(grid.block(0, 0).unwrap(), Block::Empty);
        assert_eq!(grid.block(1, 0).unwrap(), Block::from_id(4));
        grid.set_block(1, 0, Block::Empty).unwrap();
        assert!(grid.run_index().is_empty());
    }

    #[test]
    fn reload_releases_previous_geometry() {
        let mut grid = WorldGrid::cpu();
        grid.load(&[1, 0, 1, 0], 4, 1).unwrap();
        assert_eq!(grid.backend().live(), 2);
        grid.load(&[2, 2], 2, 1).unwrap();
        assert_eq!(grid.backend().live(), 1);
        assert_eq!(grid.backend().released(), 2);
    }
}
