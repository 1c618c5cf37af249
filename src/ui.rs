//! Terminal output for the provisioning session
//!
//! Progress and outcomes go to stdout so they interleave with the output of
//! the commands being run; only failures go to stderr.

use colored::{ColoredString, Colorize};
use similar::{ChangeTag, TextDiff};

#[derive(Debug, Clone, Copy)]
enum Tone {
    Note,
    Done,
    Caution,
    Failure,
}

impl Tone {
    fn mark(self) -> ColoredString {
        match self {
            Self::Note => "ℹ".blue(),
            Self::Done => "✓".green(),
            Self::Caution => "⚠".yellow(),
            Self::Failure => "✗".red(),
        }
    }
}

fn status(tone: Tone, msg: &str) {
    match tone {
        Tone::Failure => eprintln!("{} {msg}", tone.mark()),
        _ => println!("{} {msg}", tone.mark()),
    }
}

pub fn info(msg: &str) {
    status(Tone::Note, msg);
}

/// Something was already in the desired state, or just got there
pub fn success(msg: &str) {
    status(Tone::Done, msg);
}

pub fn warn(msg: &str) {
    status(Tone::Caution, msg);
}

pub fn error(msg: &str) {
    status(Tone::Failure, msg);
}

/// Secondary detail under the line before it
pub fn note(msg: &str) {
    println!("  {}", msg.dimmed());
}

/// Announce what a provisioning step is about to do
pub fn action(msg: &str) {
    println!("{}", msg.blue());
}

/// Trace line printed before every external command
pub fn running(command: &str) {
    println!("{}", format!("running: {command}").blue());
}

/// Session banner: a title and aligned `label  value` rows
pub fn summary(title: &str, rows: &[(&str, String)]) {
    println!();
    println!("{}", title.bold());
    for (label, value) in summary_rows(rows) {
        println!("  {}  {value}", label.dimmed());
    }
}

fn summary_rows<'a>(rows: &'a [(&str, String)]) -> Vec<(String, &'a str)> {
    let width = rows.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
    rows.iter()
        .map(|(label, value)| (format!("{label:<width$}"), value.as_str()))
        .collect()
}

/// Show what replacing `current` with `proposed` would change
pub fn diff(current: &str, proposed: &str) {
    for (tag, line) in changed_lines(current, proposed) {
        let line = format!("{} {line}", if tag == ChangeTag::Delete { '-' } else { '+' });
        match tag {
            ChangeTag::Delete => println!("    {}", line.red()),
            _ => println!("    {}", line.green()),
        }
    }
    println!();
}

/// Removed and added lines only, without their line endings
fn changed_lines(current: &str, proposed: &str) -> Vec<(ChangeTag, String)> {
    TextDiff::from_lines(current, proposed)
        .iter_all_changes()
        .filter(|change| change.tag() != ChangeTag::Equal)
        .map(|change| {
            let line = change.value().trim_end_matches(['\r', '\n']).to_string();
            (change.tag(), line)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changed_lines_skip_unchanged() {
        let current = "[Service]\nExecStart=npm start\nRestart=always\n";
        let proposed = "[Service]\nExecStart=npm run start\nRestart=always\n";

        assert_eq!(
            changed_lines(current, proposed),
            vec![
                (ChangeTag::Delete, "ExecStart=npm start".to_string()),
                (ChangeTag::Insert, "ExecStart=npm run start".to_string()),
            ]
        );
        assert!(changed_lines(proposed, proposed).is_empty());
    }

    #[test]
    fn test_summary_rows_align_labels() {
        let rows = [
            ("Config", "built-in defaults".to_string()),
            ("Package manager", "apt-get".to_string()),
        ];
        let aligned = summary_rows(&rows);
        assert_eq!(aligned[0].0, "Config         ");
        assert_eq!(aligned[1], ("Package manager".to_string(), "apt-get"));
    }
}
