use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read block config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse block config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("block id 0 is reserved for empty cells (entry `{name}`)")]
    ReservedId { name: String },

    #[error("unknown block flag `{flag}` on `{name}`")]
    UnknownFlag { name: String, flag: String },

    #[error("block name `{0}` is defined more than once")]
    DuplicateName(String),
}
