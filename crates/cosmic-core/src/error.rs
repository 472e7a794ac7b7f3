//! Error type for the fallible surfaces of the atlas: table loading, configuration and
//! the reference-integrity pass. Lookups never error; absence is `None`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed table {table} ({path}): {source}")]
    Json {
        table: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate id {id:?} in table {table}")]
    DuplicateId { table: &'static str, id: String },

    #[error("invalid gate wheel: {0}")]
    InvalidWheel(String),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("malformed profile: {0}")]
    Profile(#[source] serde_json::Error),

    #[error("{count} broken reference(s), first: {first}")]
    BrokenReferences { count: usize, first: String },
}

pub type AtlasResult<T> = Result<T, AtlasError>;
