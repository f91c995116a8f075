//! The dataset manifest: one entry per data file.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DirodsError;

/// File listing of a dataset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Data files in manifest order.
    pub file_list: Vec<ManifestEntry>,

    /// Other top-level keys such as `hash_function`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single data file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Path relative to the manifest root.
    pub path: String,

    /// Content hash; doubles as the remote object name.
    pub hash: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtime: Option<f64>,
}

impl ManifestEntry {
    pub fn new(path: impl Into<String>, hash: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            hash: hash.into(),
            size: None,
            mtime: None,
        }
    }
}

/// Reads a manifest from a JSON file.
pub fn read_manifest(path: &Path) -> Result<Manifest, DirodsError> {
    let file = File::open(path).map_err(|source| DirodsError::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| DirodsError::ManifestParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses a manifest from raw JSON bytes.
pub fn from_json_slice(bytes: &[u8]) -> Result<Manifest, serde_json::Error> {
    serde_json::from_slice(bytes)
}
