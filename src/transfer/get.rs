use std::fs;
use std::path::{Component, Path};

use crate::config::Zone;
use crate::dataset::{admin, manifest};
use crate::error::DirodsError;
use crate::irods::path::{self, ADMIN_METADATA_OBJECT, MANIFEST_OBJECT, README_OBJECT};
use crate::irods::{CommandRunner, IrodsCommand};

use super::TransferReport;

/// Fetches the dataset stored in `<zone>/<uuid>` into `<dest>/<name>`.
///
/// The admin metadata and manifest are fetched first and written verbatim,
/// recreating the dataset layout: `.dtool/dtool`, the manifest at its
/// `manifest_path`, the README at its `readme_path`, and each data file under
/// `manifest_root`. The README and each data file are fetched only if nothing
/// exists at their local path yet; size and hash are not checked.
///
/// # Errors
/// Fails if the admin metadata or manifest cannot be fetched or parsed, if
/// any path they name is absolute or climbs out with `..`, or if local
/// directories and files cannot be written. Failed data file fetches are
/// recorded in the report instead.
pub fn get_dataset<R>(
    runner: &mut R,
    zone: &Zone,
    uuid: &str,
    dest: &Path,
) -> Result<TransferReport, DirodsError>
where
    R: CommandRunner + ?Sized,
{
    let base = path::collection_path(zone, uuid);
    let mut report = TransferReport::new(&base);

    let admin_remote = path::object_path(&base, ADMIN_METADATA_OBJECT);
    let raw_admin = runner.output(&IrodsCommand::iget_stdout(&admin_remote))?;
    let admin = admin::from_json_slice(&raw_admin).map_err(|source| DirodsError::RemoteJson {
        remote_path: admin_remote,
        source,
    })?;

    let manifest_remote = path::object_path(&base, MANIFEST_OBJECT);
    let raw_manifest = runner.output(&IrodsCommand::iget_stdout(&manifest_remote))?;
    let manifest =
        manifest::from_json_slice(&raw_manifest).map_err(|source| DirodsError::RemoteJson {
            remote_path: manifest_remote,
            source,
        })?;

    // Nothing is written until every remote-supplied path is known to stay
    // under the dataset directory.
    let root = dest.join(checked_relative("name", &admin.name)?);
    let manifest_local = root.join(checked_relative("manifest_path", &admin.manifest_path)?);
    let readme_local = root.join(checked_relative("readme_path", &admin.readme_path)?);
    let data_root = root.join(checked_relative("manifest_root", &admin.manifest_root)?);
    let mut data_files = Vec::with_capacity(manifest.file_list.len());
    for entry in &manifest.file_list {
        data_files.push((entry, data_root.join(checked_relative("path", &entry.path)?)));
    }

    tracing::info!(
        uuid,
        name = %admin.name,
        root = %root.display(),
        files = manifest.file_list.len(),
        "fetching dataset"
    );

    let admin_local = root.join(admin::ADMIN_METADATA_RELPATH);
    create_parent_dirs(&admin_local)?;
    fs::write(&admin_local, &raw_admin)?;

    create_parent_dirs(&manifest_local)?;
    fs::write(&manifest_local, &raw_manifest)?;

    if readme_local.exists() {
        report.skip(readme_local);
    } else {
        create_parent_dirs(&readme_local)?;
        let cmd = IrodsCommand::iget(&path::object_path(&base, README_OBJECT), &readme_local);
        report.record(&cmd, runner.run(&cmd)?);
    }

    for (entry, local) in data_files {
        if local.exists() {
            report.skip(local);
            continue;
        }

        create_parent_dirs(&local)?;
        let cmd = IrodsCommand::iget(&path::object_path(&base, &entry.hash), &local);
        report.record(&cmd, runner.run(&cmd)?);
    }

    tracing::info!(
        collection = %base,
        invocations = report.total(),
        failed = report.failed_count(),
        skipped = report.skipped.len(),
        "fetch finished"
    );

    Ok(report)
}

/// Creates the parent directory of `path`; existing directories are fine.
fn create_parent_dirs(path: &Path) -> Result<(), DirodsError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent)?;
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Interprets a remote-supplied value as a path relative to its base.
///
/// Only plain names and `.` are accepted: `Path::join` would let an absolute
/// value replace the base, and `..` would climb out of it.
fn checked_relative<'a>(field: &str, value: &'a str) -> Result<&'a Path, DirodsError> {
    let path = Path::new(value);
    let stays_inside = !value.is_empty()
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));

    if stays_inside {
        Ok(path)
    } else {
        Err(DirodsError::UnsafeLocalPath {
            field: field.to_string(),
            path: value.to_string(),
        })
    }
}
