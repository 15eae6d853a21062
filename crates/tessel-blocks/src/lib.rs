//! Block identifiers, block type flags, and the block type registry.
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod registry;
pub mod types;

pub use error::RegistryError;
pub use registry::BlockRegistry;
pub use types::{Block, BlockFlags, BlockType, TextureRef};
