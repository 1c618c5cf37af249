//! Writing root-owned config files without clobbering operator edits
//!
//! A target that already holds exactly the rendered content is left alone.
//! Anything else at the path is only removed after an explicit yes.

use anyhow::Result;
use std::path::Path;

use crate::runner::Invocation;
use crate::session::Session;
use crate::ui;

/// Outcome of offering to replace an existing file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Replace {
    /// Nothing there; go ahead
    Vacant,
    /// Already identical; nothing to do
    UpToDate,
    /// Operator agreed and the old file was removed
    Removed,
    /// Operator declined; the file must not be touched
    Kept,
}

impl Replace {
    pub fn should_write(self) -> bool {
        matches!(self, Self::Vacant | Self::Removed)
    }
}

/// Offer to delete whatever sits at `path` before writing `proposed` there
pub fn offer_replace(
    session: &mut Session<'_>,
    path: &Path,
    proposed: &str,
    what: &str,
) -> Result<Replace> {
    if !session.exists(path) {
        return Ok(Replace::Vacant);
    }

    match session.host.read(path) {
        Some(current) if current == proposed => {
            ui::success(&format!("{what} is already up to date"));
            return Ok(Replace::UpToDate);
        }
        Some(current) => {
            ui::warn(&format!("{what} already exists and differs"));
            ui::diff(&current, proposed);
        }
        None => ui::warn(&format!("{what} already exists")),
    }

    offer_removal(session, path, what)
}

/// Ask before removing `path`; declining leaves it as it is
pub fn offer_removal(session: &mut Session<'_>, path: &Path, what: &str) -> Result<Replace> {
    if session.confirm(&format!("delete existing {what}"))? {
        remove(session, path)?;
        Ok(Replace::Removed)
    } else {
        ui::note(&format!("keeping {}", path.display()));
        Ok(Replace::Kept)
    }
}

pub fn remove(session: &mut Session<'_>, path: &Path) -> Result<()> {
    session.sudo("rm", ["-f".to_string(), path_arg(path)])
}

/// Write through `sudo tee` so root-owned directories work without a shell
pub fn write(session: &mut Session<'_>, path: &Path, contents: &str) -> Result<()> {
    session.run(Invocation::sudo("tee", [path_arg(path)]).with_stdin(contents))
}

pub fn ensure_dir(session: &mut Session<'_>, path: &Path) -> Result<()> {
    if session.exists(path) {
        return Ok(());
    }
    ui::warn(&format!("{} does not exist: creating...", path.display()));
    session.sudo("mkdir", ["-p".to_string(), path_arg(path)])
}

pub fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::testing::{RecordingHost, ScriptedPrompt};

    const TARGET: &str = "/etc/example/site";

    fn offer(host: &mut RecordingHost, answers: &[&str]) -> Replace {
        let config = Config::default();
        let mut prompt = ScriptedPrompt::new(answers.iter().copied());
        let mut session = Session::new(
            &config,
            host,
            &mut prompt,
            Err(pkgkit::Error::UnknownPackageManager("none".to_string())),
        );
        offer_replace(&mut session, Path::new(TARGET), "new\n", "site entry").unwrap()
    }

    #[test]
    fn test_vacant_path() {
        let mut host = RecordingHost::new();
        assert_eq!(offer(&mut host, &[]), Replace::Vacant);
        assert!(host.commands().is_empty());
    }

    #[test]
    fn test_identical_content_is_left_alone() {
        let mut host = RecordingHost::new().with_file(TARGET, "new\n");
        assert_eq!(offer(&mut host, &["y"]), Replace::UpToDate);
        assert!(host.commands().is_empty());
    }

    #[test]
    fn test_decline_keeps_file() {
        let mut host = RecordingHost::new().with_file(TARGET, "old\n");
        let outcome = offer(&mut host, &["n"]);
        assert_eq!(outcome, Replace::Kept);
        assert!(!outcome.should_write());
        assert!(host.commands().is_empty());
    }

    #[test]
    fn test_accept_removes_file() {
        let mut host = RecordingHost::new().with_file(TARGET, "old\n");
        let outcome = offer(&mut host, &["yes"]);
        assert_eq!(outcome, Replace::Removed);
        assert!(outcome.should_write());
        assert_eq!(host.commands(), vec![format!("sudo rm -f {TARGET}")]);
    }

    #[test]
    fn test_write_feeds_stdin() {
        let mut host = RecordingHost::new();
        let config = Config::default();
        let mut prompt = ScriptedPrompt::default();
        let mut session = Session::new(
            &config,
            &mut host,
            &mut prompt,
            Err(pkgkit::Error::UnknownPackageManager("none".to_string())),
        );
        write(&mut session, Path::new(TARGET), "hello\n").unwrap();
        drop(session);

        assert_eq!(host.written(Path::new(TARGET)), Some("hello\n"));
    }
}
