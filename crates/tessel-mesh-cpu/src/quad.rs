use tessel_geom::{Rect, Vec2};

use crate::constants::{BLOCK_SIZE, HALF_BLOCK, QUAD_VERTS};

/// Position plus texture coordinate, laid out the way vertex buffers expect.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    #[inline]
    const fn new(x: f32, y: f32, u: f32, v: f32) -> Self {
        Self {
            pos: [x, y, 0.0],
            uv: [u, v],
        }
    }
}

/// Two-triangle quad, centred on the origin.
#[derive(Clone, Debug, PartialEq)]
pub struct QuadMesh {
    pub verts: [Vertex; QUAD_VERTS],
}

impl QuadMesh {
    /// Quad covering a run of `length` blocks, one block tall.
    ///
    /// U spans `0..length` so a repeating texture tiles once per block.
    pub fn for_run(length: usize) -> Self {
        let hw = length as f32 * BLOCK_SIZE / 2.0;
        let hh = HALF_BLOCK;
        let u1 = length as f32;
        Self {
            verts: [
                Vertex::new(-hw, hh, 0.0, 1.0),
                Vertex::new(hw, -hh, u1, 0.0),
                Vertex::new(hw, hh, u1, 1.0),
                Vertex::new(-hw, hh, 0.0, 1.0),
                Vertex::new(hw, -hh, u1, 0.0),
                Vertex::new(-hw, -hh, 0.0, 0.0),
            ],
        }
    }

    /// Object-space bounds of the quad.
    pub fn bounds(&self) -> Rect {
        let mut min = Vec2::new(f32::INFINITY, f32::INFINITY);
        let mut max = Vec2::new(f32::NEG_INFINITY, f32::NEG_INFINITY);
        for v in &self.verts {
            min.x = min.x.min(v.pos[0]);
            min.y = min.y.min(v.pos[1]);
            max.x = max.x.max(v.pos[0]);
            max.y = max.y.max(v.pos[1]);
        }
        Rect::new(min, max)
    }

    /// Flattened positions, three floats per vertex.
    pub fn positions(&self) -> Vec<f32> {
        self.verts.iter().flat_map(|v| v.pos).collect()
    }
}
