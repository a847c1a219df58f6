use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of the load → rename → sample → write pipeline.
#[derive(Debug, Error)]
pub enum SampleError {
    /// The path is missing, unreadable, or not writable.
    #[error("cannot access {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The CSV structure is malformed.
    #[error("malformed CSV in {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// Rename keys that do not match any column.
    #[error("{missing:?} not found in columns")]
    Schema { missing: Vec<String> },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl SampleError {
    pub(crate) fn file_access(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SampleError::FileAccess {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        SampleError::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SampleError>;
