//! Error types for the content layer

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or parsing content files
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("front-matter must be a mapping, found {0}")]
    NotAMapping(&'static str),

    #[error("unterminated front-matter block")]
    Unterminated,
}

impl ContentError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = ContentError> = std::result::Result<T, E>;
