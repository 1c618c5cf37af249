//! Per-run state handed to every provisioning step

use anyhow::Result;
use pkgkit::Backend;
use std::path::Path;

use crate::config::Config;
use crate::prompt::Prompt;
use crate::runner::{Host, Invocation};

pub struct Session<'a> {
    pub config: &'a Config,
    pub host: &'a mut dyn Host,
    pub prompt: &'a mut dyn Prompt,
    packages: pkgkit::Result<Box<dyn Backend>>,
}

impl<'a> Session<'a> {
    /// `packages` keeps a detection failure around so that only the steps
    /// that actually need a package manager fail on it.
    pub fn new(
        config: &'a Config,
        host: &'a mut dyn Host,
        prompt: &'a mut dyn Prompt,
        packages: pkgkit::Result<Box<dyn Backend>>,
    ) -> Self {
        Self {
            config,
            host,
            prompt,
            packages,
        }
    }

    /// The package manager, or the reason none is available
    pub fn packages(&self) -> Result<&dyn Backend> {
        self.packages.as_deref().map_err(|e| e.clone().into())
    }

    pub fn run(&mut self, invocation: impl Into<Invocation>) -> Result<()> {
        self.host.run(&invocation.into())
    }

    /// Run `sudo <program> <args…>`
    pub fn sudo<I, S>(&mut self, program: &str, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.run(Invocation::sudo(program, args))
    }

    pub fn exists(&self, path: &Path) -> bool {
        self.host.exists(path)
    }

    pub fn is_dir(&self, path: &Path) -> bool {
        self.host.is_dir(path)
    }

    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        self.prompt.confirm(question)
    }
}
