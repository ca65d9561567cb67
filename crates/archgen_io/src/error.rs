//! Error types for archgen_io.
//!
//! Every file operation reports which path it was working on through
//! `IoError::Context`.

use archgen_core::CoreError;
use thiserror::Error;

/// Main error type for archgen_io operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// Values that could not be turned into JSON or TOML text
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// File system errors
    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    /// Malformed or mistyped JSON documents
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A file parsed but describes something the generator cannot use
    #[error("Validation error: {0}")]
    Validation(String),

    /// Structural errors raised by the generation engine, e.g. a loaded
    /// architecture breaking its invariants
    #[error("Generation error: {0}")]
    Core(#[from] CoreError),

    /// Another error, annotated with the operation that produced it
    #[error("{context}: {source}")]
    Context {
        context: String,
        source: Box<IoError>,
    },
}

/// Result type alias for archgen_io operations.
pub type Result<T> = std::result::Result<T, IoError>;

impl IoError {
    /// Creates a new serialization error.
    #[must_use]
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        Self::Serialization(msg.into())
    }

    /// Creates a new validation error.
    #[must_use]
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    /// Wraps an error with the operation that produced it.
    #[must_use]
    pub fn with_context<S: Into<String>>(self, context: S) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with every layer of context removed.
    #[must_use]
    pub fn root(&self) -> &IoError {
        match self {
            Self::Context { source, .. } => source.root(),
            other => other,
        }
    }
}
