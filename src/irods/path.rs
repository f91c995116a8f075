//! Remote path construction.
//!
//! Plain string joining. Identifiers and file names are used verbatim: no
//! character validation and no normalization of `.`, `..` or repeated
//! slashes.

use crate::config::Zone;

/// Remote object holding the manifest.
pub const MANIFEST_OBJECT: &str = "manifest.json";

/// Remote object holding the serialized admin metadata.
pub const ADMIN_METADATA_OBJECT: &str = "dtool";

/// Remote object holding the README.
pub const README_OBJECT: &str = "README.yml";

/// The collection for a dataset: `<zone>/<uuid>`.
pub fn collection_path(zone: &Zone, uuid: &str) -> String {
    object_path(zone.as_str(), uuid)
}

/// A child of a collection: `<base>/<name>`.
pub fn object_path(base: &str, name: &str) -> String {
    format!("{base}/{name}")
}
