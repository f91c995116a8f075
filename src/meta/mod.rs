//! Collection metadata (AVUs) and listing of stored datasets.

use std::fmt;

use serde_json::Value;

use crate::config::Zone;
use crate::dataset::DataSet;
use crate::error::DirodsError;
use crate::irods::{parse, path, CommandRunner, IrodsCommand};
use crate::transfer::TransferReport;

/// Attribute that holds the dataset name.
pub const NAME_ATTRIBUTE: &str = "name";

/// A dataset collection found under the zone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectionEntry {
    pub uuid: String,
    /// Value of the `name` AVU, if one is attached.
    pub name: Option<String>,
}

impl fmt::Display for CollectionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.uuid, self.name.as_deref().unwrap_or("-"))
    }
}

/// Renders an admin metadata value as an AVU value.
///
/// Strings are passed through untouched; anything else uses its compact
/// JSON text.
pub fn avu_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Attaches every admin metadata pair to the dataset's collection.
///
/// One `imeta add` per pair, in sorted key order. Values are not escaped.
pub fn store_metadata<R>(
    runner: &mut R,
    zone: &Zone,
    dataset: &DataSet,
) -> Result<TransferReport, DirodsError>
where
    R: CommandRunner + ?Sized,
{
    let base = path::collection_path(zone, dataset.uuid());
    let mut report = TransferReport::new(&base);

    for (key, value) in dataset.admin_metadata().to_map() {
        let cmd = IrodsCommand::imeta_add(&base, &key, &avu_text(&value));
        report.record(&cmd, runner.run(&cmd)?);
    }

    Ok(report)
}

/// Lists the dataset collections directly under `zone` with their names.
///
/// # Errors
/// Fails if `ils` or any `imeta ls` exits non-zero.
pub fn list_datasets<R>(runner: &mut R, zone: &Zone) -> Result<Vec<CollectionEntry>, DirodsError>
where
    R: CommandRunner + ?Sized,
{
    let listing = runner.output(&IrodsCommand::ils(zone.as_str()))?;
    let listing = String::from_utf8_lossy(&listing);

    let mut entries = Vec::new();
    for collection in parse::collections_from_ils(&listing) {
        let Some(uuid) = parse::uuid_from_collection_path(&collection) else {
            tracing::debug!(%collection, "no uuid segment, skipping");
            continue;
        };

        let avus = runner.output(&IrodsCommand::imeta_ls(&collection, NAME_ATTRIBUTE))?;
        entries.push(CollectionEntry {
            uuid: uuid.to_string(),
            name: parse::avu_value(&String::from_utf8_lossy(&avus)),
        });
    }

    Ok(entries)
}
