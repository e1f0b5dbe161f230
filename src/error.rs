//! Error types for namespace operations and runtime setup.

use thiserror::Error;

/// Failure kinds surfaced by namespace operations.
///
/// Every operation reports failure as a value; none of the core paths panic.
/// A failed mutation leaves the tree exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsError {
    /// Name is empty, contains the delimiter, or is `.`/`..`.
    #[error("invalid entry name {0:?}")]
    InvalidName(String),

    /// The target directory already holds an entry under this name.
    #[error("entry {0:?} already exists")]
    AlreadyExists(String),

    /// A path component does not exist and auto-creation was not requested.
    #[error("entry {0:?} does not exist")]
    NotFound(String),

    /// A leaf was used where a directory is required.
    #[error("{0:?} is not a directory")]
    NotADirectory(String),

    /// A directory was used where a leaf is required.
    #[error("{0:?} is not a leaf")]
    NotALeaf(String),

    /// A leaf cannot replace an existing directory of the same name.
    #[error("directory {0:?} cannot be replaced by a leaf")]
    TypeMismatch(String),

    /// The root directory is permanent.
    #[error("the root directory cannot be deleted")]
    CannotDeleteRoot,

    /// The node was already deleted by an earlier call.
    #[error("entry is already deleted")]
    AlreadyDeleted,

    /// The operation is not available for this node kind.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// The handle refers to a tombstoned node.
    #[error("entry has been destroyed")]
    Destroyed,
}

/// Setup-time failures: configuration loading and logging initialization.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
