//! Error types for project operations.
//!
//! Every validating operation on a project checks its arguments fully
//! before touching any state, so an `Err` always means "nothing changed".

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by project registries, the serializer and the script
/// synthesizer.
#[derive(Error, Debug)]
pub enum ProjectError {
    /// A frame number or other value lies outside its valid interval.
    #[error("{0}")]
    OutOfRange(String),

    /// A range intersects one that is already registered.
    #[error("{0}")]
    Overlap(String),

    /// A preset or custom list name is not usable as a script identifier,
    /// or is already taken.
    #[error("{0}")]
    InvalidName(String),

    /// The named preset, custom list, section or range does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Reading or writing a project file failed.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Input could not be understood (bad JSON, bad pattern string).
    #[error("{0}")]
    Malformed(String),
}

/// Plain classification of a [`ProjectError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    OutOfRange,
    Overlap,
    InvalidName,
    NotFound,
    IoFailure,
    MalformedInput,
}

impl ProjectError {
    /// Create an out-of-range error.
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::OutOfRange(message.into())
    }

    /// Create an overlap error.
    pub fn overlap(message: impl Into<String>) -> Self {
        Self::Overlap(message.into())
    }

    /// Create an invalid name error.
    pub fn invalid_name(message: impl Into<String>) -> Self {
        Self::InvalidName(message.into())
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create an I/O error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a malformed input error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }

    /// Which kind of failure this is.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::OutOfRange(_) => ErrorKind::OutOfRange,
            Self::Overlap(_) => ErrorKind::Overlap,
            Self::InvalidName(_) => ErrorKind::InvalidName,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Io { .. } => ErrorKind::IoFailure,
            Self::Malformed(_) => ErrorKind::MalformedInput,
        }
    }
}

/// Result type for project operations.
pub type ProjectResult<T> = Result<T, ProjectError>;
