//! Renderer-facing view of the run index.
//!
//! The camera and registry are passed in by the caller; nothing here reaches
//! for engine-wide state.

use tessel_blocks::{BlockFlags, BlockRegistry, TextureRef};
use tessel_geom::{Rect, Vec2};
use tessel_mesh_cpu::GeometryBackend;

use crate::grid::WorldGrid;
use crate::runs::Run;

/// World-space view rectangle centred on `(x, y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Camera {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn view_rect(&self) -> Rect {
        Rect::from_center_half_extents(
            Vec2::new(self.x, self.y),
            Vec2::new(self.width, self.height) / 2.0,
        )
    }

    /// Maps a world-space point into [-1, 1] clip space.
    pub fn to_clip(&self, p: Vec2) -> Vec2 {
        let left = self.x - self.width / 2.0;
        let bottom = self.y - self.height / 2.0;
        Vec2::new(
            ((p.x - left) / self.width) * 2.0 - 1.0,
            ((p.y - bottom) / self.height) * 2.0 - 1.0,
        )
    }
}

/// One run ready for submission.
#[derive(Debug)]
pub struct DrawItem<'a, H> {
    pub run: &'a Run,
    pub geometry: &'a H,
    pub texture: Option<TextureRef>,
    pub flags: BlockFlags,
    /// Model translation for the origin-centred run quad.
    pub center: Vec2,
}

/// Visible, drawable runs in stored order.
///
/// Runs whose type carries `NO_DRAW` and runs entirely outside the camera
/// are skipped.
pub fn draw_list<'a, B: GeometryBackend>(
    grid: &'a WorldGrid<B>,
    registry: &BlockRegistry,
    camera: &Camera,
) -> Vec<DrawItem<'a, B::Handle>> {
    let view = camera.view_rect();
    let mut out = Vec::new();
    for entry in grid.entries() {
        let ty = registry.lookup(entry.run.id());
        if !ty.is_drawn() {
            continue;
        }
        if !entry.run.bounds().overlaps(&view) {
            continue;
        }
        out.push(DrawItem {
            run: &entry.run,
            geometry: &entry.geometry,
            texture: ty.visual,
            flags: ty.flags,
            center: entry.run.center(),
        });
    }
    log::trace!(target: "render", "draw list: {} of {} runs", out.len(), grid.run_index().len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_space_corners() {
        let cam = Camera::new(10.0, 5.0, 20.0, 10.0);
        assert_eq!(cam.to_clip(Vec2::new(0.0, 0.0)), Vec2::new(-1.0, -1.0));
        assert_eq!(cam.to_clip(Vec2::new(20.0, 10.0)), Vec2::new(1.0, 1.0));
        assert_eq!(cam.to_clip(Vec2::new(10.0, 5.0)), Vec2::new(0.0, 0.0));
    }
}
