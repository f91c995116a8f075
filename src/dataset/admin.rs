//! Admin metadata stored at `<dataset>/.dtool/dtool`.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DirodsError;

/// Location of the admin metadata file relative to the dataset root.
pub const ADMIN_METADATA_RELPATH: &str = ".dtool/dtool";

fn default_manifest_path() -> String {
    ".dtool/manifest.json".to_string()
}

fn default_readme_path() -> String {
    "README.yml".to_string()
}

fn default_manifest_root() -> String {
    ".".to_string()
}

/// Administrative metadata describing a dataset.
///
/// Only the keys this tool needs are typed. Everything else in the file
/// (`type`, `dtool_version`, `creator_username`, ...) lands in `extra` so a
/// re-serialized copy keeps the full mapping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdminMetadata {
    /// Unique identifier of the dataset; also the remote collection name.
    pub uuid: String,

    /// Human readable dataset name; also the local directory name on `get`.
    pub name: String,

    /// Manifest location relative to the dataset root.
    #[serde(default = "default_manifest_path")]
    pub manifest_path: String,

    /// README location relative to the dataset root.
    #[serde(default = "default_readme_path")]
    pub readme_path: String,

    /// Directory that manifest entry paths are relative to.
    #[serde(default = "default_manifest_root")]
    pub manifest_root: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AdminMetadata {
    /// Creates admin metadata with default structural paths.
    pub fn new(uuid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            name: name.into(),
            manifest_path: default_manifest_path(),
            readme_path: default_readme_path(),
            manifest_root: default_manifest_root(),
            extra: Map::new(),
        }
    }

    /// Returns every key/value pair, typed and extra alike, in sorted key order.
    pub fn to_map(&self) -> BTreeMap<String, Value> {
        let mut map: BTreeMap<String, Value> = self
            .extra
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        map.insert("uuid".into(), Value::String(self.uuid.clone()));
        map.insert("name".into(), Value::String(self.name.clone()));
        map.insert(
            "manifest_path".into(),
            Value::String(self.manifest_path.clone()),
        );
        map.insert("readme_path".into(), Value::String(self.readme_path.clone()));
        map.insert(
            "manifest_root".into(),
            Value::String(self.manifest_root.clone()),
        );
        map
    }
}

/// Reads admin metadata from a JSON file.
pub fn read_admin_metadata(path: &Path) -> Result<AdminMetadata, DirodsError> {
    let file = File::open(path).map_err(|source| DirodsError::AdminMetadataRead {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| DirodsError::AdminMetadataParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses admin metadata from raw JSON bytes.
pub fn from_json_slice(bytes: &[u8]) -> Result<AdminMetadata, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Renders admin metadata as pretty JSON with sorted keys.
pub fn to_json_string(admin: &AdminMetadata) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&admin.to_map())
}
