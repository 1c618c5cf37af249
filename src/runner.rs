use anyhow::{Context, Result, bail};
use pkgkit::CommandLine;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use crate::interrupt;
use crate::ui;

/// A command to run on the host, optionally fed from memory on stdin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub argv: Vec<String>,
    pub stdin: Option<String>,
}

impl Invocation {
    /// Build a command run through `sudo`
    pub fn sudo<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandLine::privileged(program, args).into()
    }

    pub fn with_stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }
}

impl From<CommandLine> for Invocation {
    fn from(line: CommandLine) -> Self {
        Self {
            argv: line.argv(),
            stdin: None,
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.argv.join(" "))
    }
}

/// Everything a provisioning step is allowed to do to the machine
pub trait Host {
    /// Run a command to completion. Only a failure to spawn is an error.
    fn run(&mut self, invocation: &Invocation) -> Result<()>;

    /// Whether anything (file, directory or symlink, even dangling) is at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` resolves to a directory, following symlinks
    fn is_dir(&self, path: &Path) -> bool;

    /// Current content of a readable file
    fn read(&self, path: &Path) -> Option<String>;

    /// Target of a symlink
    fn read_link(&self, path: &Path) -> Option<PathBuf>;
}

/// The real machine
pub struct SystemHost {
    dry_run: bool,
}

impl SystemHost {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }
}

impl Host for SystemHost {
    fn run(&mut self, invocation: &Invocation) -> Result<()> {
        ui::running(&invocation.to_string());

        if self.dry_run {
            log::debug!("dry run, not executing: {invocation}");
            return Ok(());
        }

        let status = spawn(invocation)?;
        interrupt::check()?;

        if !status.success() {
            log::warn!("{invocation} exited with {status}");
            ui::warn(&format!("command exited with {status}: {invocation}"));
        }

        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.symlink_metadata().is_ok()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read(&self, path: &Path) -> Option<String> {
        std::fs::read_to_string(path).ok()
    }

    fn read_link(&self, path: &Path) -> Option<PathBuf> {
        std::fs::read_link(path).ok()
    }
}

/// Spawn with inherited stdio. When stdin is supplied from memory the
/// child's stdout is discarded, since `tee` echoes everything it writes.
fn spawn(invocation: &Invocation) -> Result<ExitStatus> {
    let Some((program, args)) = invocation.argv.split_first() else {
        bail!("Refusing to run an empty command");
    };

    log::debug!("spawning {invocation}");

    let mut command = Command::new(program);
    command.args(args).stderr(Stdio::inherit());

    match &invocation.stdin {
        None => {
            command.stdin(Stdio::inherit()).stdout(Stdio::inherit());
            command
                .status()
                .with_context(|| format!("Failed to execute: {invocation}"))
        }
        Some(input) => {
            command.stdin(Stdio::piped()).stdout(Stdio::null());
            let mut child = command
                .spawn()
                .with_context(|| format!("Failed to execute: {invocation}"))?;

            // Dropping the pipe sends EOF. The child is reaped even when the
            // write fails, e.g. EPIPE after an early exit.
            let written = child
                .stdin
                .take()
                .map_or(Ok(()), |mut pipe| pipe.write_all(input.as_bytes()));

            if let Err(e) = written {
                if let Err(wait_err) = child.wait() {
                    log::debug!("failed to reap {invocation}: {wait_err}");
                }
                return Err(e).with_context(|| format!("Failed to write stdin of: {invocation}"));
            }

            child
                .wait()
                .with_context(|| format!("Failed to wait for: {invocation}"))
        }
    }
}

/// Check if a command exists
pub fn command_exists(cmd: &str) -> bool {
    Command::new("which")
        .arg(cmd)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}
