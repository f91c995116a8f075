//! Local datasets laid out in the dtool directory convention.
//!
//! A dataset rooted at `<root>` consists of:
//!
//! - `<root>/.dtool/dtool`: admin metadata (uuid, name, structural paths)
//! - `<root>/<manifest_path>`: manifest listing every data file and its hash
//! - `<root>/<readme_path>`: free-form README
//! - data files under `<root>/<manifest_root>/`
//!
//! The content hash of a file is its identifier, and also the name of the
//! object that holds it in the remote collection.

pub mod admin;
pub mod manifest;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub use admin::AdminMetadata;
pub use manifest::{Manifest, ManifestEntry};

use crate::error::DirodsError;

/// A dataset read from local disk.
#[derive(Clone, Debug)]
pub struct DataSet {
    root: PathBuf,
    admin: AdminMetadata,
    manifest: Manifest,
}

impl DataSet {
    /// Loads the dataset rooted at `path`.
    ///
    /// # Errors
    /// Returns an error if the directory, its admin metadata or its manifest
    /// cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, DirodsError> {
        let root = fs::canonicalize(path)?;
        let admin = admin::read_admin_metadata(&root.join(admin::ADMIN_METADATA_RELPATH))?;
        let manifest = manifest::read_manifest(&root.join(&admin.manifest_path))?;

        tracing::debug!(
            root = %root.display(),
            uuid = %admin.uuid,
            files = manifest.file_list.len(),
            "loaded dataset"
        );

        Ok(Self {
            root,
            admin,
            manifest,
        })
    }

    /// Assembles a dataset from parts already in memory.
    pub fn new(root: impl Into<PathBuf>, admin: AdminMetadata, manifest: Manifest) -> Self {
        Self {
            root: root.into(),
            admin,
            manifest,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn uuid(&self) -> &str {
        &self.admin.uuid
    }

    pub fn name(&self) -> &str {
        &self.admin.name
    }

    pub fn admin_metadata(&self) -> &AdminMetadata {
        &self.admin
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Distinct content identifiers in manifest order.
    ///
    /// Files with identical content share one identifier; the first entry
    /// listing it wins.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.manifest
            .file_list
            .iter()
            .map(|entry| entry.hash.as_str())
            .filter(|hash| seen.insert(*hash))
            .collect()
    }

    /// Directory that manifest entry paths are relative to.
    pub fn data_root(&self) -> PathBuf {
        self.root.join(&self.admin.manifest_root)
    }

    /// Absolute path of the file holding `identifier`.
    pub fn abspath_from_identifier(&self, identifier: &str) -> Option<PathBuf> {
        self.manifest
            .file_list
            .iter()
            .find(|entry| entry.hash == identifier)
            .map(|entry| self.data_root().join(&entry.path))
    }

    pub fn abs_manifest_path(&self) -> PathBuf {
        self.root.join(&self.admin.manifest_path)
    }

    pub fn abs_readme_path(&self) -> PathBuf {
        self.root.join(&self.admin.readme_path)
    }
}
