#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use dirods::irods::{CommandRunner, CommandStatus, IrodsCommand};
use dirods::DirodsError;

/// A `CommandRunner` that records command lines instead of running them.
///
/// `iget <remote> <local>` writes a placeholder file at `<local>`, and
/// `iput <local> <remote>` captures the local file contents, so tests can
/// observe both sides of a transfer. Like the real client, `iget` refuses to
/// overwrite an existing local file and exits with code 4.
#[derive(Default)]
pub struct RecordingRunner {
    pub commands: Vec<String>,
    pub uploads: Vec<(String, Vec<u8>)>,
    outputs: HashMap<String, Vec<u8>>,
    failing: HashSet<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canned stdout for a captured command.
    pub fn with_output(mut self, command: &str, output: impl Into<Vec<u8>>) -> Self {
        self.outputs.insert(command.to_string(), output.into());
        self
    }

    /// Makes a command exit with code 1.
    pub fn failing(mut self, command: &str) -> Self {
        self.failing.insert(command.to_string());
        self
    }

    pub fn programs(&self) -> Vec<&str> {
        self.commands
            .iter()
            .map(|line| line.split(' ').next().unwrap_or_default())
            .collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&mut self, cmd: &IrodsCommand) -> Result<CommandStatus, DirodsError> {
        let line = cmd.to_string();
        self.commands.push(line.clone());

        if self.failing.contains(&line) {
            return Ok(CommandStatus::from_code(1));
        }

        match (cmd.program(), cmd.args()) {
            ("iget", [_, local]) if local != "-" => {
                if Path::new(local).exists() {
                    return Ok(CommandStatus::from_code(4));
                }
                fs::write(local, b"fetched")?;
            }
            ("iput", [local, remote]) => {
                let contents = fs::read(local)?;
                self.uploads
                    .push((remote.to_string_lossy().into_owned(), contents));
            }
            _ => {}
        }

        Ok(CommandStatus::success())
    }

    fn output(&mut self, cmd: &IrodsCommand) -> Result<Vec<u8>, DirodsError> {
        let line = cmd.to_string();
        self.commands.push(line.clone());

        self.outputs
            .get(&line)
            .cloned()
            .ok_or(DirodsError::CommandFailed {
                command: line,
                status: CommandStatus::from_code(3),
            })
    }
}

/// Admin metadata for the sample dataset.
pub fn admin_json(uuid: &str) -> String {
    format!(
        r#"{{
  "uuid": "{uuid}",
  "name": "my-data",
  "type": "dataset",
  "dtool_version": "0.13.0",
  "manifest_path": ".dtool/manifest.json",
  "readme_path": "README.yml",
  "manifest_root": "data"
}}"#
    )
}

/// Manifest JSON for `(path, hash)` entries.
pub fn manifest_json(entries: &[(&str, &str)]) -> String {
    let file_list: Vec<String> = entries
        .iter()
        .map(|(path, hash)| format!(r#"{{"path": "{path}", "hash": "{hash}", "size": 5}}"#))
        .collect();
    format!(
        r#"{{"hash_function": "shasum", "file_list": [{}]}}"#,
        file_list.join(", ")
    )
}

/// Writes a dataset with uuid `uuid` whose data files are `(path, hash)`.
pub fn write_dataset(root: &Path, uuid: &str, entries: &[(&str, &str)]) {
    fs::create_dir_all(root.join(".dtool")).expect("create .dtool dir");
    fs::write(root.join(".dtool/dtool"), admin_json(uuid)).expect("write admin metadata");
    fs::write(
        root.join(".dtool/manifest.json"),
        manifest_json(entries),
    )
    .expect("write manifest");
    fs::write(root.join("README.yml"), "---\ndescription: test\n").expect("write readme");

    for (path, _) in entries {
        let file = root.join("data").join(path);
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent).expect("create data dir");
        }
        fs::write(file, "hello").expect("write data file");
    }
}
