use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown comparison mode '{0}' (expected ordinal, ignore-ascii-case or ignore-case)")]
    UnknownComparison(String),

    #[error("invalid tokenizer config: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
