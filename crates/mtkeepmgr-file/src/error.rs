//! Error types for dump file access

use std::io;
use thiserror::Error;

/// File connector errors
#[derive(Debug, Error)]
pub enum FileError {
    /// File could not be opened
    #[error("unable to open dump file '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    /// File size could not be determined
    #[error("unable to get dump file '{path}' size: {source}")]
    Stat {
        path: String,
        #[source]
        source: io::Error,
    },

    /// File has no contents
    #[error("dump file '{path}' is empty")]
    Empty { path: String },

    /// Reading the contents failed or ended early
    #[error("unable to read dump file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Result type for file connector operations
pub type Result<T> = std::result::Result<T, FileError>;

impl From<FileError> for mtkeepmgr_core::Error {
    fn from(e: FileError) -> Self {
        let context = match &e {
            FileError::Open { path, .. } => format!("unable to open dump file '{}'", path),
            FileError::Stat { path, .. } => format!("unable to get dump file '{}' size", path),
            FileError::Read { path, .. } | FileError::Empty { path } => {
                format!("unable to read dump file '{}'", path)
            }
        };
        match e {
            FileError::Open { source, .. }
            | FileError::Stat { source, .. }
            | FileError::Read { source, .. } => mtkeepmgr_core::Error::io(context, source),
            FileError::Empty { .. } => mtkeepmgr_core::Error::io(
                context,
                io::Error::new(io::ErrorKind::UnexpectedEof, "input file is empty"),
            ),
        }
    }
}
