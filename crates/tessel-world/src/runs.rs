//! Horizontal run decomposition of the grid.
//!
//! Each row is split into maximal spans of identical non-empty identifiers.
//! Runs are stored grouped by row, rows ascending, and within a row by
//! ascending `x`; renderers and the overlap query rely on that order.

use std::num::NonZeroU8;

use tessel_blocks::Block;
use tessel_geom::{Rect, Vec2};
use tessel_mesh_cpu::{GeometryBackend, HALF_BLOCK, QuadMesh};

/// A maximal horizontal span of one block identifier within a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Run {
    pub x: usize,
    pub y: usize,
    pub length: usize,
    pub block: NonZeroU8,
}

impl Run {
    #[inline]
    pub fn id(&self) -> u8 {
        self.block.get()
    }

    #[inline]
    pub fn as_block(&self) -> Block {
        Block::Occupied(self.block)
    }

    /// Column one past the last cell of the run.
    #[inline]
    pub fn end_x(&self) -> usize {
        self.x + self.length
    }

    /// World-space bounds. Block centres sit on integer coordinates.
    pub fn bounds(&self) -> Rect {
        let x = self.x as f32;
        let y = self.y as f32;
        Rect::new(
            Vec2::new(x - HALF_BLOCK, y - HALF_BLOCK),
            Vec2::new(x + self.length as f32 - HALF_BLOCK, y + HALF_BLOCK),
        )
    }

    /// Translation that places the origin-centred run quad over the run's cells.
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.x as f32 + (self.length as f32 - 1.0) / 2.0,
            self.y as f32,
        )
    }
}

/// Appends the runs of one row to `out`, left to right.
pub fn scan_row(row: &[u8], y: usize, out: &mut Vec<Run>) {
    let mut current = 0u8;
    let mut start = 0usize;
    let mut length = 0usize;
    for (x, &cell) in row.iter().enumerate() {
        if cell != current {
            if let Some(block) = NonZeroU8::new(current) {
                out.push(Run {
                    x: start,
                    y,
                    length,
                    block,
                });
            }
            current = cell;
            start = x;
            length = 1;
        } else {
            length += 1;
        }
    }
    // a row may end mid-run
    if let Some(block) = NonZeroU8::new(current) {
        out.push(Run {
            x: start,
            y,
            length,
            block,
        });
    }
}

/// Geometry-free run decomposition of a row-major grid.
pub fn build_runs(cells: &[u8], width: usize, height: usize) -> Vec<Run> {
    let mut out = Vec::new();
    if width == 0 {
        return out;
    }
    for (y, row) in cells.chunks_exact(width).take(height).enumerate() {
        scan_row(row, y, &mut out);
    }
    out
}

/// A run together with the geometry uploaded for it.
#[derive(Debug)]
pub struct RunEntry<H> {
    pub run: Run,
    pub geometry: H,
}

/// Ordered runs of a grid plus the geometry that draws them.
///
/// The index never releases geometry on its own; every path that discards
/// entries takes the backend that produced them.
#[derive(Debug)]
pub struct RunIndex<H> {
    entries: Vec<RunEntry<H>>,
    // row_starts[y]..row_starts[y + 1] are the entries of row y
    row_starts: Vec<usize>,
}

impl<H> Default for RunIndex<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            row_starts: vec![0],
        }
    }
}

impl<H> RunIndex<H> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn entries(&self) -> &[RunEntry<H>] {
        &self.entries
    }

    pub fn runs(&self) -> impl Iterator<Item = &Run> + '_ {
        self.entries.iter().map(|e| &e.run)
    }

    /// Entries of row `y`; empty when the row has no runs or does not exist.
    pub fn row(&self, y: usize) -> &[RunEntry<H>] {
        match (self.row_starts.get(y), self.row_starts.get(y + 1)) {
            (Some(&start), Some(&end)) => &self.entries[start..end],
            _ => &[],
        }
    }

    /// Releases every entry's geometry and empties the index.
    pub fn clear<B>(&mut self, backend: &mut B)
    where
        B: GeometryBackend<Handle = H>,
    {
        for entry in self.entries.drain(..) {
            backend.release(entry.geometry);
        }
        self.row_starts.clear();
        self.row_starts.push(0);
    }

    /// Discards all runs and regenerates them from `cells`.
    pub fn rebuild<B>(&mut self, cells: &[u8], width: usize, height: usize, backend: &mut B)
    where
        B: GeometryBackend<Handle = H>,
    {
        self.clear(backend);
        let mut runs = Vec::new();
        if width > 0 {
            for (y, row) in cells.chunks_exact(width).take(height).enumerate() {
                scan_row(row, y, &mut runs);
                self.row_starts.push(runs.len());
            }
        }
        self.entries.reserve(runs.len());
        for run in runs {
            let geometry = backend.upload(&QuadMesh::for_run(run.length));
            self.entries.push(RunEntry { run, geometry });
        }
        log::debug!(
            target: "world",
            "run index rebuilt: {} runs over {}x{}",
            self.entries.len(),
            width,
            height
        );
    }

    /// Regenerates the runs of row `y` in place, leaving other rows' entries
    /// and geometry untouched. Does nothing when `y` is not an indexed row.
    pub fn rebuild_row<B>(&mut self, row: &[u8], y: usize, backend: &mut B)
    where
        B: GeometryBackend<Handle = H>,
    {
        let (start, end) = match (self.row_starts.get(y), self.row_starts.get(y + 1)) {
            (Some(&s), Some(&e)) => (s, e),
            _ => return,
        };
        let mut fresh = Vec::new();
        scan_row(row, y, &mut fresh);
        let added = fresh.len();
        let replacement: Vec<RunEntry<H>> = fresh
            .into_iter()
            .map(|run| RunEntry {
                geometry: backend.upload(&QuadMesh::for_run(run.length)),
                run,
            })
            .collect();
        for old in self.entries.splice(start..end, replacement) {
            backend.release(old.geometry);
        }
        let removed = end - start;
        for s in &mut self.row_starts[y + 1..] {
            *s = *s - removed + added;
        }
        log::trace!(target: "world", "row {} rebuilt: {} -> {} runs", y, removed, added);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(runs: &[Run]) -> Vec<(usize, usize, usize, u8)> {
        runs.iter().map(|r| (r.x, r.y, r.length, r.id())).collect()
    }

    #[test]
    fn run_in_middle_of_air() {
        let runs = build_runs(&[0, 5, 5, 0], 4, 1);
        assert_eq!(ids(&runs), vec![(1, 0, 2, 5)]);
    }

    #[test]
    fn full_row_emits_at_row_end() {
        let runs = build_runs(&[5, 5, 5, 5], 4, 1);
        assert_eq!(ids(&runs), vec![(0, 0, 4, 5)]);
    }

    #[test]
    fn adjacent_different_ids_split() {
        let runs = build_runs(&[1, 1, 2, 3, 3, 3], 6, 1);
        assert_eq!(ids(&runs), vec![(0, 0, 2, 1), (2, 0, 1, 2), (3, 0, 3, 3)]);
    }

    #[test]
    fn runs_never_cross_rows() {
        // 3 wide, 2 tall, same id everywhere
        let runs = build_runs(&[7; 6], 3, 2);
        assert_eq!(ids(&runs), vec![(0, 0, 3, 7), (0, 1, 3, 7)]);
    }

    #[test]
    fn empty_and_degenerate_grids() {
        assert!(build_runs(&[], 0, 0).is_empty());
        assert!(build_runs(&[], 0, 5).is_empty());
        assert!(build_runs(&[0, 0, 0], 3, 1).is_empty());
    }

    #[test]
    fn run_bounds_and_center() {
        let run = Run {
            x: 1,
            y: 2,
            length: 2,
            block: NonZeroU8::new(5).unwrap(),
        };
        let b = run.bounds();
        assert_eq!(b.min, Vec2::new(0.5, 1.5));
        assert_eq!(b.max, Vec2::new(2.5, 2.5));
        assert_eq!(run.center(), Vec2::new(1.5, 2.0));
        assert_eq!(run.end_x(), 3);
        assert_eq!(run.as_block(), Block::from_id(5));
    }

    #[test]
    fn row_slices_follow_row_starts() {
        let mut be = tessel_mesh_cpu::CpuGeometry::new();
        let mut index = RunIndex::new();
        index.rebuild(&[1, 0, 2, 0, 0, 0, 3, 3, 0], 3, 3, &mut be);
        assert_eq!(index.row(0).len(), 2);
        assert!(index.row(1).is_empty());
        assert_eq!(index.row(2).len(), 1);
        assert!(index.row(3).is_empty());
        index.clear(&mut be);
        assert_eq!(be.live(), 0);
    }
}
