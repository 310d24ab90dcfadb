use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a documentation build.
#[derive(Debug, Error)]
pub enum DocsError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog {path}: {source}")]
    Catalog {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No registry entry for model: {0}")]
    MissingRecord(String),

    #[error("Model has no config: {0}")]
    MissingConfig(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl DocsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Per-directive failures. These never abort the build; the directive renders
/// the message as a paragraph in place of the model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("Invalid model path: '{0}'")]
    InvalidPath(String),

    #[error("Could not load model: '{0}'")]
    ModelNotFound(String),
}
