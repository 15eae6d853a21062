use serde::Deserialize;

/// Top-level shape of a block registry TOML file.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct BlocksConfig {
    #[serde(default)]
    pub blocks: Vec<BlockDef>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BlockDef {
    pub id: u8,
    pub name: String,
    #[serde(default)]
    pub texture: Option<u32>,
    // Defaults to solid when omitted
    #[serde(default)]
    pub solid: Option<bool>,
    #[serde(default)]
    pub flags: Vec<String>,
}
