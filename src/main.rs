mod cli;
mod commands;
mod config;
mod interrupt;
mod menu;
mod prompt;
mod runner;
mod session;
mod steps;
mod templates;
#[cfg(test)]
mod testing;
mod ui;
mod validate;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command};
use std::io;

/// Global context for the application
pub struct Context {
    pub quiet: bool,
    pub dry_run: bool,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    // Every way out of a session is a normal exit; failures are reported, not signalled.
    if let Err(err) = run(cli) {
        if interrupt::is_interrupt(&err) {
            println!();
            ui::warn("ctrl+c: exiting...");
        } else {
            ui::error(&format!("error: {err:#}."));
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let ctx = Context {
        quiet: cli.quiet,
        dry_run: cli.dry_run,
    };

    match cli.command {
        None => commands::setup::run(&ctx, cli.config.as_deref()),
        Some(Command::Config(cmd)) => commands::config::run(&ctx, cli.config.as_deref(), cmd),
        Some(Command::Completions { shell }) => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "vpsetup", &mut io::stdout());
            Ok(())
        }
    }
}
