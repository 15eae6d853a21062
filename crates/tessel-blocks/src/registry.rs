use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::config::{BlockDef, BlocksConfig};
use super::error::RegistryError;
use super::types::{Block, BlockFlags, BlockType, TextureRef};

const SLOTS: usize = u8::MAX as usize + 1;

/// Fixed table mapping every 8-bit identifier to a block type.
///
/// Unregistered identifiers resolve to [`BlockType::EMPTY`]. Identifier 0 is
/// reserved for empty cells and never holds a descriptor.
#[derive(Clone, Debug)]
pub struct BlockRegistry {
    types: [BlockType; SLOTS],
    registered: [bool; SLOTS],
    by_name: HashMap<String, u8>,
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self {
            types: [BlockType::EMPTY; SLOTS],
            registered: [false; SLOTS],
            by_name: HashMap::new(),
        }
    }

    /// Stores a descriptor whose only flag is `SOLID` (when `solid`).
    /// Overwrites any previous registration for `id`.
    pub fn register(&mut self, id: u8, visual: Option<TextureRef>, solid: bool) {
        let flags = if solid {
            BlockFlags::SOLID
        } else {
            BlockFlags::empty()
        };
        self.register_with_flags(id, visual, flags);
    }

    pub fn register_with_flags(&mut self, id: u8, visual: Option<TextureRef>, flags: BlockFlags) {
        if id == 0 {
            log::warn!(target: "blocks", "ignoring registration for reserved block id 0");
            return;
        }
        let slot = id as usize;
        if self.registered[slot] {
            log::debug!(target: "blocks", "block id {} re-registered; previous type replaced", id);
        }
        self.types[slot] = BlockType { visual, flags };
        self.registered[slot] = true;
    }

    #[inline]
    pub fn lookup(&self, id: u8) -> BlockType {
        self.types[id as usize]
    }

    #[inline]
    pub fn lookup_block(&self, block: Block) -> BlockType {
        self.lookup(block.id())
    }

    #[inline]
    pub fn is_solid(&self, block: Block) -> bool {
        self.lookup_block(block).is_solid()
    }

    pub fn id_by_name(&self, name: &str) -> Option<u8> {
        self.by_name.get(name).copied()
    }

    /// True once `id` has been registered, even with an all-zero descriptor.
    #[inline]
    pub fn is_registered(&self, id: u8) -> bool {
        self.registered[id as usize]
    }

    /// Number of identifiers that have been registered.
    pub fn registered_count(&self) -> usize {
        self.registered.iter().filter(|r| **r).count()
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, RegistryError> {
        let cfg: BlocksConfig = toml::from_str(toml_str)?;
        Self::from_config(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn from_config(cfg: BlocksConfig) -> Result<Self, RegistryError> {
        let mut reg = BlockRegistry::new();
        for def in cfg.blocks {
            reg.apply_def(def)?;
        }
        log::info!(target: "blocks", "loaded {} block types", reg.registered_count());
        Ok(reg)
    }

    fn apply_def(&mut self, def: BlockDef) -> Result<(), RegistryError> {
        if def.id == 0 {
            return Err(RegistryError::ReservedId { name: def.name });
        }
        if self.by_name.contains_key(&def.name) {
            return Err(RegistryError::DuplicateName(def.name));
        }
        let mut flags = if def.solid.unwrap_or(true) {
            BlockFlags::SOLID
        } else {
            BlockFlags::empty()
        };
        for flag in &def.flags {
            match BlockFlags::from_config_name(flag) {
                Some(f) => flags |= f,
                None => {
                    return Err(RegistryError::UnknownFlag {
                        name: def.name,
                        flag: flag.clone(),
                    });
                }
            }
        }
        self.register_with_flags(def.id, def.texture.map(TextureRef), flags);
        self.by_name.retain(|old, id| {
            let stale = *id == def.id;
            if stale {
                log::debug!(target: "blocks", "block name {} dropped; id {} redefined as {}", old, def.id, def.name);
            }
            !stale
        });
        self.by_name.insert(def.name, def.id);
        Ok(())
    }
}
