//! Reading answers from the operator

use anyhow::{Context, Result};
use std::io::{self, BufRead, IsTerminal, Write};

use crate::interrupt::{self, Interrupted};

/// Source of typed answers
pub trait Prompt {
    /// Ask for one line of input. `None` means the input stream is closed.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Ask a yes/no question. Anything but `y`/`yes` is a no, including EOF.
    fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.read_line(&format!("{question}? [y/N]"))?;
        Ok(answer.is_some_and(|a| is_affirmative(&a)))
    }
}

/// Only an explicit `y` or `yes` (any case) counts as consent
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Prompt on the controlling terminal, falling back to plain line reads when
/// stdin is piped.
pub struct TerminalPrompt {
    interactive: bool,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self {
            interactive: io::stdin().is_terminal() && console::Term::stderr().is_term(),
        }
    }

    fn read_interactive(prompt: &str) -> Result<Option<String>> {
        match dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
        {
            Ok(line) => Ok(Some(line)),
            Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::Interrupted => {
                Err(Interrupted.into())
            }
            Err(e) => Err(e).context("Failed to read input"),
        }
    }

    fn read_piped(prompt: &str) -> Result<Option<String>> {
        print!("{prompt}: ");
        io::stdout().flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .context("Failed to read input")?;
        interrupt::check()?;

        if read == 0 {
            println!();
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompt for TerminalPrompt {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        if self.interactive {
            Self::read_interactive(prompt)
        } else {
            Self::read_piped(prompt)
        }
    }
}
