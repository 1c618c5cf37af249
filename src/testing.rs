//! In-memory host and prompt for exercising steps without touching the machine

use anyhow::Result;
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};

use crate::prompt::Prompt;
use crate::runner::{Host, Invocation};

/// Records every invocation; answers filesystem probes from fixtures
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub invocations: Vec<Invocation>,
    files: HashMap<PathBuf, String>,
    dirs: HashSet<PathBuf>,
    links: HashMap<PathBuf, PathBuf>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files.insert(path.into(), content.to_string());
        self
    }

    pub fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.dirs.insert(path.into());
        self
    }

    pub fn with_link(mut self, path: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        self.links.insert(path.into(), target.into());
        self
    }

    /// Invocations rendered as command lines
    pub fn commands(&self) -> Vec<String> {
        self.invocations.iter().map(ToString::to_string).collect()
    }

    /// Content written with `sudo tee <path>`
    pub fn written(&self, path: &Path) -> Option<&str> {
        let target = path.to_string_lossy();
        self.invocations
            .iter()
            .rev()
            .find(|inv| inv.argv == ["sudo", "tee", target.as_ref()])
            .and_then(|inv| inv.stdin.as_deref())
    }
}

impl Host for RecordingHost {
    fn run(&mut self, invocation: &Invocation) -> Result<()> {
        self.invocations.push(invocation.clone());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.dirs.contains(path) || self.links.contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }

    fn read(&self, path: &Path) -> Option<String> {
        self.files.get(path).cloned()
    }

    fn read_link(&self, path: &Path) -> Option<PathBuf> {
        self.links.get(path).cloned()
    }
}

/// Hands out queued answers, then reports end of input
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    pub asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        self.asked.push(prompt.to_string());
        Ok(self.answers.pop_front())
    }
}
