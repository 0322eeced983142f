use std::path::PathBuf;

use crate::registry::TokenizerHandle;

pub(crate) type EngineError = tokenizers::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything this layer reports to the managed caller. The engine's own
/// errors are boxed trait objects, so they cross as rendered messages.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Handle never issued, or already destroyed.
    #[error("invalid tokenizer handle {0}")]
    InvalidHandle(TokenizerHandle),
    #[error(transparent)]
    Creation(#[from] CreationError),
    /// Engine failure during tokenize. The handle stays valid.
    #[error("tokenization failed: {0}")]
    Tokenization(String),
}

/// A configuration source that could not produce an engine instance.
/// No handle is issued alongside any of these.
#[derive(Debug, thiserror::Error)]
pub enum CreationError {
    #[error("no bundled tokenizer named {0:?}")]
    UnknownName(String),
    #[error("pretrained source {name:?} unreachable: {reason}")]
    SourceUnreachable { name: String, reason: String },
    #[error("cannot read tokenizer file {path:?}: {reason}")]
    UnreadableFile { path: PathBuf, reason: String },
    #[error("malformed tokenizer configuration: {0}")]
    Malformed(String),
}

impl Error {
    pub(crate) fn tokenization(err: EngineError) -> Self {
        Error::Tokenization(err.to_string())
    }
}

impl CreationError {
    pub(crate) fn malformed(err: EngineError) -> Self {
        CreationError::Malformed(err.to_string())
    }
}
