//! External command execution.
//!
//! Thin builder over [`std::process::Command`] for the host tools the
//! pipeline shells out to. `run()` inherits stdio and treats a non-zero
//! exit as an error naming the full command line; `capture_stdout()` is for
//! tools whose output we parse (e.g. `uname -m`).

use anyhow::{bail, Context, Result};
use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

/// Check if a command exists on the host system.
pub fn exists(cmd: &str) -> bool {
    which::which(cmd).is_ok()
}

/// Builder for an external command invocation with a checked exit status.
pub struct Cmd {
    command: Command,
}

impl Cmd {
    pub fn new(program: &str) -> Self {
        Self {
            command: Command::new(program),
        }
    }

    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        self.command.arg(arg);
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.command.args(args);
        self
    }

    pub fn arg_path(mut self, path: &Path) -> Self {
        self.command.arg(path);
        self
    }

    /// Run with inherited stdout/stderr.
    ///
    /// A non-zero exit becomes an error naming the command and its
    /// arguments.
    pub fn run(mut self) -> Result<()> {
        let rendered = self.render();
        let status = self
            .command
            .status()
            .with_context(|| format!("failed to run '{rendered}'"))?;
        if !status.success() {
            bail!("command failed ({status}): {rendered}");
        }
        Ok(())
    }

    /// Run without inheriting stdio and capture stdout as UTF-8.
    pub fn capture_stdout(mut self) -> Result<String> {
        let rendered = self.render();
        let output = self
            .command
            .output()
            .with_context(|| format!("failed to run '{rendered}'"))?;
        if !output.status.success() {
            bail!("command failed ({}): {rendered}", output.status);
        }
        String::from_utf8(output.stdout)
            .with_context(|| format!("'{rendered}' produced non-UTF-8 output"))
    }

    fn render(&self) -> String {
        let mut parts = vec![self.command.get_program().to_string_lossy().into_owned()];
        parts.extend(
            self.command
                .get_args()
                .map(|arg| arg.to_string_lossy().into_owned()),
        );
        parts.join(" ")
    }
}
