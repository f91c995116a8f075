//! Invocation of the iRODS icommands client.
//!
//! Every remote operation is delegated to one of the `i*` binaries. This
//! module owns building those command lines and running them; path joining
//! lives in [`path`] and parsing of the client's text output in [`parse`].

pub mod parse;
pub mod path;

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use crate::error::DirodsError;

/// A single icommands invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IrodsCommand {
    program: &'static str,
    args: Vec<OsString>,
}

impl IrodsCommand {
    fn new(program: &'static str) -> Self {
        Self {
            program,
            args: Vec::new(),
        }
    }

    fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// `imkdir <collection>`
    pub fn imkdir(collection: &str) -> Self {
        Self::new("imkdir").arg(collection)
    }

    /// `iput <local> <remote>`
    pub fn iput(local: &Path, remote: &str) -> Self {
        Self::new("iput").arg(local).arg(remote)
    }

    /// `iget <remote> <local>`
    pub fn iget(remote: &str, local: &Path) -> Self {
        Self::new("iget").arg(remote).arg(local)
    }

    /// `iget <remote> -`, streaming the object to stdout.
    pub fn iget_stdout(remote: &str) -> Self {
        Self::new("iget").arg(remote).arg("-")
    }

    /// `imeta add -C <collection> <attribute> <value>`
    pub fn imeta_add(collection: &str, attribute: &str, value: &str) -> Self {
        Self::new("imeta")
            .arg("add")
            .arg("-C")
            .arg(collection)
            .arg(attribute)
            .arg(value)
    }

    /// `imeta ls -C <collection> <attribute>`
    pub fn imeta_ls(collection: &str, attribute: &str) -> Self {
        Self::new("imeta")
            .arg("ls")
            .arg("-C")
            .arg(collection)
            .arg(attribute)
    }

    /// `ils <collection>`
    pub fn ils(collection: &str) -> Self {
        Self::new("ils").arg(collection)
    }

    pub fn program(&self) -> &str {
        self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }
}

impl fmt::Display for IrodsCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Exit status of a finished invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandStatus {
    code: Option<i32>,
}

impl CommandStatus {
    /// A zero exit.
    pub fn success() -> Self {
        Self { code: Some(0) }
    }

    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// A process killed by a signal has no exit code.
    pub fn terminated() -> Self {
        Self { code: None }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn code(&self) -> Option<i32> {
        self.code
    }
}

impl From<ExitStatus> for CommandStatus {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {code}"),
            None => f.write_str("termination by signal"),
        }
    }
}

/// Executes icommands on behalf of the transfer and metadata operations.
pub trait CommandRunner {
    /// Runs a command whose output goes straight to the terminal.
    ///
    /// A non-zero exit is reported through the returned status, not as an
    /// error. Only a failure to launch the process is an error.
    fn run(&mut self, cmd: &IrodsCommand) -> Result<CommandStatus, DirodsError>;

    /// Runs a command and captures its stdout.
    ///
    /// A non-zero exit is an error.
    fn output(&mut self, cmd: &IrodsCommand) -> Result<Vec<u8>, DirodsError>;
}

/// Runs icommands as child processes found on `PATH`.
#[derive(Clone, Debug, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }

    fn command(cmd: &IrodsCommand) -> Command {
        let mut command = Command::new(cmd.program());
        command.args(cmd.args());
        command
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&mut self, cmd: &IrodsCommand) -> Result<CommandStatus, DirodsError> {
        println!("{cmd}");

        let status = Self::command(cmd)
            .status()
            .map_err(|source| DirodsError::CommandSpawn {
                command: cmd.to_string(),
                source,
            })?;

        Ok(status.into())
    }

    fn output(&mut self, cmd: &IrodsCommand) -> Result<Vec<u8>, DirodsError> {
        tracing::debug!(command = %cmd, "capturing output");

        let output = Self::command(cmd)
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| DirodsError::CommandSpawn {
                command: cmd.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(DirodsError::CommandFailed {
                command: cmd.to_string(),
                status: output.status.into(),
            });
        }

        Ok(output.stdout)
    }
}
