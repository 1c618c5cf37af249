//! Numbered step menu
//!
//! Two states only: showing the list and waiting for a selection. Bad input
//! reprompts without redrawing; a completed step redraws the list.

use anyhow::Result;
use colored::Colorize;

use crate::interrupt;
use crate::session::Session;
use crate::ui;

/// A provisioning step: what it does, and how
pub type Action = fn(&mut Session<'_>) -> Result<()>;

#[derive(Clone, Copy)]
pub struct Step {
    pub label: &'static str,
    pub action: Action,
}

impl Step {
    pub const fn new(label: &'static str, action: Action) -> Self {
        Self { label, action }
    }
}

/// What a line typed at the menu asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Quit,
    /// Zero-based index into the step list
    Run(usize),
    Invalid(String),
}

/// Accepts `q`/`Q` or a 1-based index in `[1, count]`
pub fn parse_selection(input: &str, count: usize) -> Selection {
    let input = input.trim();
    if input.eq_ignore_ascii_case("q") {
        return Selection::Quit;
    }

    match input.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Selection::Run(n - 1),
        _ => Selection::Invalid(format!("invalid selection: {input}")),
    }
}

pub struct Menu {
    steps: Vec<Step>,
}

impl Menu {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// `1. Upgrade system` style listing
    pub fn listing(&self) -> Vec<String> {
        self.steps
            .iter()
            .enumerate()
            .map(|(i, step)| format!("{}. {}", i + 1, step.label))
            .collect()
    }

    fn show(&self) {
        println!();
        println!("{}", "Please select an option (q to exit):".yellow());
        for line in self.listing() {
            println!("{line}");
        }
    }

    /// Loop until the operator quits or input runs out. Step failures are
    /// reported and the menu comes back; only Ctrl+C escapes as an error.
    pub fn run(&self, session: &mut Session<'_>) -> Result<()> {
        loop {
            self.show();

            let step = loop {
                let Some(line) = session.prompt.read_line("selection")? else {
                    ui::info("exiting...");
                    return Ok(());
                };

                match parse_selection(&line, self.steps.len()) {
                    Selection::Quit => {
                        ui::info("exiting...");
                        return Ok(());
                    }
                    Selection::Invalid(reason) => ui::error(&format!("error: {reason}")),
                    Selection::Run(index) => break &self.steps[index],
                }
            };

            log::info!("running step: {}", step.label);
            if let Err(err) = (step.action)(session) {
                if interrupt::is_interrupt(&err) {
                    return Err(err);
                }
                ui::error(&format!("error: {err:#}"));
            }
        }
    }
}
