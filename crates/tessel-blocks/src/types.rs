use std::num::NonZeroU8;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Contents of a single grid cell. Identifier 0 is always `Empty`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Block {
    #[default]
    Empty,
    Occupied(NonZeroU8),
}

impl Block {
    #[inline]
    pub const fn from_id(id: u8) -> Self {
        match NonZeroU8::new(id) {
            Some(nz) => Block::Occupied(nz),
            None => Block::Empty,
        }
    }

    #[inline]
    pub const fn id(self) -> u8 {
        match self {
            Block::Empty => 0,
            Block::Occupied(nz) => nz.get(),
        }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, Block::Empty)
    }
}

impl From<u8> for Block {
    #[inline]
    fn from(id: u8) -> Self {
        Block::from_id(id)
    }
}

impl From<Block> for u8 {
    #[inline]
    fn from(b: Block) -> u8 {
        b.id()
    }
}

bitflags! {
    /// Physical and rendering properties of a block type.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct BlockFlags: u8 {
        const RIGHT_TOP_SLOPE = 1;
        const LEFT_TOP_SLOPE = 1 << 1;
        const RIGHT_BOTTOM_SLOPE = 1 << 2;
        const LEFT_BOTTOM_SLOPE = 1 << 3;
        const SOLID = 1 << 4;
        const NO_LIGHT = 1 << 5;
        const NO_DRAW = 1 << 6;

        const ANY_SLOPE = Self::RIGHT_TOP_SLOPE.bits()
            | Self::LEFT_TOP_SLOPE.bits()
            | Self::RIGHT_BOTTOM_SLOPE.bits()
            | Self::LEFT_BOTTOM_SLOPE.bits();
    }
}

impl BlockFlags {
    /// Parses the snake_case flag names used in registry config files.
    ///
    /// Distinct from the generated `from_name`, which expects the constant
    /// names (`"SOLID"`).
    pub fn from_config_name(name: &str) -> Option<BlockFlags> {
        match name {
            "right_top_slope" => Some(BlockFlags::RIGHT_TOP_SLOPE),
            "left_top_slope" => Some(BlockFlags::LEFT_TOP_SLOPE),
            "right_bottom_slope" => Some(BlockFlags::RIGHT_BOTTOM_SLOPE),
            "left_bottom_slope" => Some(BlockFlags::LEFT_BOTTOM_SLOPE),
            "solid" => Some(BlockFlags::SOLID),
            "no_light" => Some(BlockFlags::NO_LIGHT),
            "no_draw" => Some(BlockFlags::NO_DRAW),
            _ => None,
        }
    }
}

/// Opaque handle to a drawable surface owned by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureRef(pub u32);

/// Per-identifier block description.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlockType {
    pub visual: Option<TextureRef>,
    pub flags: BlockFlags,
}

impl BlockType {
    pub const EMPTY: BlockType = BlockType {
        visual: None,
        flags: BlockFlags::empty(),
    };

    #[inline]
    pub fn is_solid(&self) -> bool {
        self.flags.contains(BlockFlags::SOLID)
    }

    #[inline]
    pub fn is_drawn(&self) -> bool {
        !self.flags.contains(BlockFlags::NO_DRAW)
    }

    #[inline]
    pub fn is_slope(&self) -> bool {
        self.flags.intersects(BlockFlags::ANY_SLOPE)
    }
}
