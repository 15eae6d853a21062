/// Edge length of one block in world units. Block centres sit on integer coordinates.
pub const BLOCK_SIZE: f32 = 1.0;

/// Distance from a block centre to its edge.
pub const HALF_BLOCK: f32 = BLOCK_SIZE / 2.0;

// two triangles per quad
pub const QUAD_VERTS: usize = 6;
