//! Error types for the annotation editor.

use thiserror::Error;

use crate::model::{GroupId, MaskId};

/// Rejection of user-entered group data.
///
/// Editor state is left untouched when one of these is returned, so the
/// caller can re-prompt.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Group name is empty after trimming
    #[error("Group name is required.")]
    EmptyName,

    /// Group code is empty after trimming
    #[error("Group code is required.")]
    EmptyCode,
}

/// Errors that can occur when loading, saving or storing a document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Document was written by a newer, incompatible version
    #[error("Document version {found} is not supported (expected {expected})")]
    UnsupportedVersion {
        /// Version this build writes
        expected: String,
        /// Version found in the document
        found: String,
    },

    /// Two masks share an id
    #[error("Duplicate mask id: {0}")]
    DuplicateMaskId(MaskId),

    /// A group registry key does not match the group's own id
    #[error("Group stored under key '{key}' has id '{id}'")]
    GroupKeyMismatch {
        /// Key in the group map
        key: GroupId,
        /// Id inside the group record
        id: GroupId,
    },

    /// Storage backend failure (localStorage in WASM)
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Errors that can occur when loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        /// Version found in the file
        file_version: u32,
        /// Highest version this build reads
        supported_version: u32,
    },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Storage error (localStorage in WASM)
    #[error("Storage error: {0}")]
    StorageError(String),
}
