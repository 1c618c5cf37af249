//! The interactive provisioning menu

use anyhow::Result;
use std::path::Path;

use crate::Context;
use crate::config::Config;
use crate::interrupt;
use crate::menu::Menu;
use crate::prompt::TerminalPrompt;
use crate::runner::{self, SystemHost};
use crate::session::Session;
use crate::steps;
use crate::ui;

pub fn run(ctx: &Context, explicit: Option<&Path>) -> Result<()> {
    interrupt::install()?;

    let loaded = Config::load(explicit)?;
    let config = &loaded.config;

    for problem in config.problems(Path::is_dir) {
        ui::warn(&format!("warning: {problem}"));
    }

    let packages = config
        .package_preference()
        .and_then(|preference| pkgkit::resolve(preference, runner::command_exists));

    if !ctx.quiet {
        let source = loaded
            .source
            .as_ref()
            .map_or_else(|| "built-in defaults".to_string(), |p| p.display().to_string());
        let manager = match &packages {
            Ok(backend) => backend.kind().to_string(),
            Err(_) => "none".to_string(),
        };
        let mut rows = vec![("Config", source), ("Package manager", manager)];
        if ctx.dry_run {
            rows.push(("Dry run", "commands are printed, not executed".to_string()));
        }
        ui::summary("vpsetup", &rows);
        println!();
    }

    if let Err(e) = &packages {
        log::warn!("package manager unavailable: {e}");
        ui::warn(&format!("warning: {e}"));
    }

    let mut host = SystemHost::new(ctx.dry_run);
    let mut prompt = TerminalPrompt::new();
    let mut session = Session::new(config, &mut host, &mut prompt, packages);

    Menu::new(steps::all()).run(&mut session)
}
