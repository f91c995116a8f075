use std::path::PathBuf;
use thiserror::Error;

use crate::irods::CommandStatus;

/// The main error type for dirods operations.
#[derive(Debug, Error)]
pub enum DirodsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read admin metadata from {path}: {source}")]
    AdminMetadataRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse admin metadata from {path}: {source}")]
    AdminMetadataParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize admin metadata: {0}")]
    AdminMetadataWrite(#[source] serde_json::Error),

    #[error("Failed to read manifest from {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest from {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Identifier '{0}' is not listed in the dataset manifest")]
    UnknownIdentifier(String),

    #[error("Failed to launch '{command}': {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command '{command}' failed with {status}")]
    CommandFailed {
        command: String,
        status: CommandStatus,
    },

    #[error("Failed to parse JSON fetched from {remote_path}: {source}")]
    RemoteJson {
        remote_path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Refusing to write outside the dataset directory: {field} '{path}'")]
    UnsafeLocalPath { field: String, path: String },

    #[error("Invalid zone '{zone}': {message}")]
    InvalidZone { zone: String, message: String },

    #[error("{failed} of {total} iRODS invocation(s) failed")]
    TransferIncomplete { failed: usize, total: usize },
}
