//! Broad-phase overlap between a probe rectangle and the world's runs.

use tessel_blocks::BlockRegistry;
use tessel_geom::{Rect, Vec2};
use tessel_mesh_cpu::GeometryBackend;

use crate::grid::WorldGrid;
use crate::runs::Run;

/// Collision box supplied by the physics layer.
///
/// `x`/`y` are the centre, `width`/`height` the full extents and `angle` the
/// rotation in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Probe {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub angle: f32,
}

impl Probe {
    pub const fn axis_aligned(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            angle: 0.0,
        }
    }

    #[inline]
    pub fn is_axis_aligned(&self) -> bool {
        self.angle == 0.0
    }

    /// Axis-aligned box used for the test.
    ///
    /// A rotated probe is replaced by a square whose half-extent is half the
    /// diagonal, which contains the probe at any angle.
    pub fn bounds(&self) -> Rect {
        let center = Vec2::new(self.x, self.y);
        if self.is_axis_aligned() {
            Rect::from_center_half_extents(center, Vec2::new(self.width, self.height) / 2.0)
        } else {
            let half = Vec2::new(self.width, self.height).length() / 2.0;
            Rect::from_center_half_extents(center, Vec2::new(half, half))
        }
    }
}

fn query_bounds(probe: &Probe) -> Rect {
    if !probe.is_axis_aligned() {
        log::warn!(
            target: "collision",
            "probe at ({:.2}, {:.2}) is not axis-aligned (angle {:.3}); using its diagonal box",
            probe.x,
            probe.y,
            probe.angle
        );
    }
    probe.bounds()
}

/// Runs overlapping `probe`, in stored order.
pub fn overlapping_runs<'a, B: GeometryBackend>(
    grid: &'a WorldGrid<B>,
    probe: &Probe,
) -> impl Iterator<Item = &'a Run> + 'a {
    let bounds = query_bounds(probe);
    grid.runs().filter(move |run| run.bounds().overlaps(&bounds))
}

pub fn first_overlap<'a, B: GeometryBackend>(
    grid: &'a WorldGrid<B>,
    probe: &Probe,
) -> Option<&'a Run> {
    overlapping_runs(grid, probe).next()
}

/// True if `probe` overlaps any run. Touching edges do not count.
pub fn overlaps<B: GeometryBackend>(grid: &WorldGrid<B>, probe: &Probe) -> bool {
    first_overlap(grid, probe).is_some()
}

/// Like [`overlaps`], but only runs whose block type is solid are considered.
pub fn overlaps_solid<B: GeometryBackend>(
    grid: &WorldGrid<B>,
    registry: &BlockRegistry,
    probe: &Probe,
) -> bool {
    overlapping_runs(grid, probe).any(|run| registry.is_solid(run.as_block()))
}

impl<B: GeometryBackend> WorldGrid<B> {
    #[inline]
    pub fn overlaps(&self, probe: &Probe) -> bool {
        overlaps(self, probe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() <= 1e-5
    }

    #[test]
    fn axis_aligned_bounds_use_half_extents() {
        let b = Probe::axis_aligned(1.0, 2.0, 4.0, 2.0).bounds();
        assert!(approx(b.min.x, -1.0) && approx(b.max.x, 3.0));
        assert!(approx(b.min.y, 1.0) && approx(b.max.y, 3.0));
    }

    #[test]
    fn rotated_bounds_use_diagonal_square() {
        let p = Probe {
            angle: 0.3,
            ..Probe::axis_aligned(0.0, 0.0, 3.0, 4.0)
        };
        let b = p.bounds();
        assert!(approx(b.max.x, 2.5) && approx(b.max.y, 2.5));
        assert!(approx(b.min.x, -2.5) && approx(b.min.y, -2.5));
    }

    #[test]
    fn empty_world_never_overlaps() {
        let grid = WorldGrid::cpu();
        assert!(!grid.overlaps(&Probe::axis_aligned(0.0, 0.0, 100.0, 100.0)));
    }
}
