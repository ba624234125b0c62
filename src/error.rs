//! Error types for fiend
//!
//! Two families of failure exist and they are kept apart on purpose:
//! - Configuration errors are fatal and are reported before any traversal
//!   output is produced
//! - Entry errors describe a single path that could not be processed; the
//!   walker logs them, abandons that frame and keeps going
//!
//! Library code uses thiserror enums; the binary wraps them with anyhow.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Top-level error type for the fiend library
#[derive(Error, Debug)]
pub enum FiendError {
    /// Invalid command line or expression
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// I/O errors on the output stream
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Fatal configuration errors, detected before traversal starts
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A test or action is missing its required argument
    #[error("missing argument to `{flag}'")]
    MissingArgument { flag: String },

    /// `-exec` without a token ending in `;`
    #[error("missing terminating `;' for `-exec'")]
    UnterminatedExec,

    /// `-maxdepth` value missing, negative or not a number
    #[error("invalid argument `{value}' to `-maxdepth': expected a non-negative integer")]
    InvalidMaxDepth { value: String },

    /// `-name` pattern that cannot be compiled
    #[error("invalid pattern `{pattern}' for `-name': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// `-newer` reference file that cannot be statted
    #[error("cannot stat reference file '{}' for `-newer': {source}", path.display())]
    NewerReference {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Recoverable errors for a single traversal frame
#[derive(Error, Debug)]
pub enum EntryError {
    /// Path vanished or never existed
    #[error("{}: No such file or directory", path.display())]
    NotFound { path: PathBuf },

    /// Metadata query failed for any other reason
    #[error("{}: cannot access: {source}", path.display())]
    Access {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Directory could not be opened or a listing entry could not be read
    #[error("{}: cannot read directory: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Entry identity was already visited in this run
    #[error("{}: already visited (file system loop); skipping", path.display())]
    Loop { path: PathBuf },
}

impl EntryError {
    /// Classify a metadata failure for `path`
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            EntryError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            EntryError::Access {
                path: path.to_path_buf(),
                source: err,
            }
        }
    }

    /// Loops are reported as warnings rather than errors
    pub fn is_loop(&self) -> bool {
        matches!(self, EntryError::Loop { .. })
    }

    /// Returns the path associated with this error
    pub fn path(&self) -> &Path {
        match self {
            EntryError::NotFound { path } => path,
            EntryError::Access { path, .. } => path,
            EntryError::ReadDir { path, .. } => path,
            EntryError::Loop { path } => path,
        }
    }
}

/// Result type alias for FiendError
pub type Result<T> = std::result::Result<T, FiendError>;

/// Result type alias for ConfigError
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
