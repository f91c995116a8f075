use std::io::Write;

use tempfile::NamedTempFile;

use crate::config::Zone;
use crate::dataset::{admin, DataSet};
use crate::error::DirodsError;
use crate::irods::path::{self, ADMIN_METADATA_OBJECT, MANIFEST_OBJECT, README_OBJECT};
use crate::irods::{CommandRunner, IrodsCommand};

use super::TransferReport;

/// Stores a local dataset in `<zone>/<uuid>`.
///
/// Issues `imkdir` for the collection, then one `iput` per identifier,
/// followed by the manifest, the admin metadata and the README. A failed
/// invocation is recorded in the report and the sequence carries on; nothing
/// already written is rolled back.
///
/// # Errors
/// Returns an error only if an icommand cannot be launched or the admin
/// metadata cannot be staged in a temporary file.
pub fn put_dataset<R>(
    runner: &mut R,
    zone: &Zone,
    dataset: &DataSet,
) -> Result<TransferReport, DirodsError>
where
    R: CommandRunner + ?Sized,
{
    let base = path::collection_path(zone, dataset.uuid());
    let mut report = TransferReport::new(&base);

    tracing::info!(
        uuid = dataset.uuid(),
        name = dataset.name(),
        collection = %base,
        "storing dataset"
    );

    let cmd = IrodsCommand::imkdir(&base);
    report.record(&cmd, runner.run(&cmd)?);

    for identifier in dataset.identifiers() {
        let source = dataset
            .abspath_from_identifier(identifier)
            .ok_or_else(|| DirodsError::UnknownIdentifier(identifier.to_string()))?;
        let cmd = IrodsCommand::iput(&source, &path::object_path(&base, identifier));
        report.record(&cmd, runner.run(&cmd)?);
    }

    let cmd = IrodsCommand::iput(
        &dataset.abs_manifest_path(),
        &path::object_path(&base, MANIFEST_OBJECT),
    );
    report.record(&cmd, runner.run(&cmd)?);

    // Staged copy is removed when `staged` drops.
    let mut staged = NamedTempFile::new()?;
    let admin_json =
        admin::to_json_string(dataset.admin_metadata()).map_err(DirodsError::AdminMetadataWrite)?;
    staged.write_all(admin_json.as_bytes())?;
    staged.flush()?;
    let cmd = IrodsCommand::iput(
        staged.path(),
        &path::object_path(&base, ADMIN_METADATA_OBJECT),
    );
    report.record(&cmd, runner.run(&cmd)?);
    drop(staged);

    let cmd = IrodsCommand::iput(
        &dataset.abs_readme_path(),
        &path::object_path(&base, README_OBJECT),
    );
    report.record(&cmd, runner.run(&cmd)?);

    tracing::info!(
        collection = %base,
        invocations = report.total(),
        failed = report.failed_count(),
        "store finished"
    );

    Ok(report)
}
