//! Integration tests for storing datasets.

use std::fs;
use std::path::Path;

use dirods::dataset::DataSet;
use dirods::transfer::put_dataset;
use dirods::{DirodsError, Zone};

mod common;
use common::{write_dataset, RecordingRunner};

#[test]
fn put_issues_mkdir_then_one_transfer_per_object() {
    let temp = tempfile::tempdir().expect("create temp dir");
    write_dataset(temp.path(), "abc123", &[("one.txt", "f1"), ("sub/two.txt", "f2")]);
    let root = fs::canonicalize(temp.path()).expect("canonicalize");

    let dataset = DataSet::from_path(temp.path()).expect("load dataset");
    let mut runner = RecordingRunner::new();
    let report = put_dataset(&mut runner, &Zone::default(), &dataset).expect("put");

    assert_eq!(runner.commands.len(), 6);
    assert_eq!(runner.commands[0], "imkdir /jic_archive/abc123");
    assert_eq!(
        runner.commands[1],
        format!("iput {} /jic_archive/abc123/f1", root.join("data/one.txt").display())
    );
    assert_eq!(
        runner.commands[2],
        format!(
            "iput {} /jic_archive/abc123/f2",
            root.join("data/sub/two.txt").display()
        )
    );
    assert_eq!(
        runner.commands[3],
        format!(
            "iput {} /jic_archive/abc123/manifest.json",
            root.join(".dtool/manifest.json").display()
        )
    );
    assert!(runner.commands[4].starts_with("iput "));
    assert!(runner.commands[4].ends_with(" /jic_archive/abc123/dtool"));
    assert_eq!(
        runner.commands[5],
        format!(
            "iput {} /jic_archive/abc123/README.yml",
            root.join("README.yml").display()
        )
    );

    assert_eq!(report.collection, "/jic_archive/abc123");
    assert_eq!(report.total(), 6);
    assert!(report.is_complete());
}

#[test]
fn put_transfer_count_is_identifiers_plus_three() {
    let temp = tempfile::tempdir().expect("create temp dir");
    // Two entries share content, so there are three identifiers.
    write_dataset(
        temp.path(),
        "def456",
        &[("a.txt", "h1"), ("b.txt", "h2"), ("c.txt", "h1"), ("d.txt", "h3")],
    );

    let dataset = DataSet::from_path(temp.path()).expect("load dataset");
    let mut runner = RecordingRunner::new();
    put_dataset(&mut runner, &Zone::default(), &dataset).expect("put");

    let programs = runner.programs();
    assert_eq!(programs.iter().filter(|p| **p == "imkdir").count(), 1);
    assert_eq!(programs.iter().filter(|p| **p == "iput").count(), 3 + 3);
    assert_eq!(programs[0], "imkdir");
}

#[test]
fn put_uploads_staged_admin_metadata_and_removes_it() {
    let temp = tempfile::tempdir().expect("create temp dir");
    write_dataset(temp.path(), "abc123", &[("one.txt", "f1")]);

    let dataset = DataSet::from_path(temp.path()).expect("load dataset");
    let mut runner = RecordingRunner::new();
    put_dataset(&mut runner, &Zone::default(), &dataset).expect("put");

    let (_, staged) = runner
        .uploads
        .iter()
        .find(|(remote, _)| remote == "/jic_archive/abc123/dtool")
        .expect("admin metadata uploaded");
    let uploaded: serde_json::Value = serde_json::from_slice(staged).expect("valid json");
    assert_eq!(uploaded["uuid"], "abc123");
    assert_eq!(uploaded["name"], "my-data");
    assert_eq!(uploaded["type"], "dataset");
    assert_eq!(uploaded["manifest_root"], "data");

    let staged_path = runner.commands[3]
        .strip_prefix("iput ")
        .and_then(|rest| rest.strip_suffix(" /jic_archive/abc123/dtool"))
        .expect("staged path");
    assert!(!Path::new(staged_path).exists());
}

#[test]
fn put_uses_configured_zone() {
    let temp = tempfile::tempdir().expect("create temp dir");
    write_dataset(temp.path(), "abc123", &[("one.txt", "f1")]);

    let dataset = DataSet::from_path(temp.path()).expect("load dataset");
    let mut runner = RecordingRunner::new();
    let zone = Zone::new("/tempZone").expect("zone");
    put_dataset(&mut runner, &zone, &dataset).expect("put");

    assert_eq!(runner.commands[0], "imkdir /tempZone/abc123");
    assert!(runner
        .commands
        .iter()
        .skip(1)
        .all(|line| line.contains(" /tempZone/abc123/")));
}

#[test]
fn put_continues_after_failed_invocation() {
    let temp = tempfile::tempdir().expect("create temp dir");
    write_dataset(temp.path(), "abc123", &[("one.txt", "f1"), ("two.txt", "f2")]);

    let dataset = DataSet::from_path(temp.path()).expect("load dataset");
    // Collection already exists from an earlier run.
    let mut runner = RecordingRunner::new().failing("imkdir /jic_archive/abc123");
    let report = put_dataset(&mut runner, &Zone::default(), &dataset).expect("put");

    assert_eq!(runner.commands.len(), 6);
    assert_eq!(report.failed_count(), 1);

    match report.into_result() {
        Err(DirodsError::TransferIncomplete { failed, total }) => {
            assert_eq!((failed, total), (1, 6));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn put_rejects_directory_without_admin_metadata() {
    let temp = tempfile::tempdir().expect("create temp dir");
    fs::write(temp.path().join("README.yml"), "---\n").expect("write readme");

    match DataSet::from_path(temp.path()) {
        Err(DirodsError::AdminMetadataRead { path, .. }) => {
            assert!(path.ends_with(".dtool/dtool"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn put_reports_missing_manifest_by_path() {
    let temp = tempfile::tempdir().expect("create temp dir");
    write_dataset(temp.path(), "abc123", &[("one.txt", "f1")]);
    fs::remove_file(temp.path().join(".dtool/manifest.json")).expect("remove manifest");

    let err = DataSet::from_path(temp.path()).expect_err("should fail");

    assert!(err.to_string().contains(".dtool/manifest.json"));
    assert!(matches!(err, DirodsError::ManifestRead { .. }));
}

#[test]
fn put_rejects_malformed_manifest() {
    let temp = tempfile::tempdir().expect("create temp dir");
    write_dataset(temp.path(), "abc123", &[("one.txt", "f1")]);
    fs::write(temp.path().join(".dtool/manifest.json"), "{not json").expect("corrupt");

    match DataSet::from_path(temp.path()) {
        Err(DirodsError::ManifestParse { path, .. }) => {
            assert!(path.ends_with(".dtool/manifest.json"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}
