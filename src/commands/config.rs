use anyhow::Result;
use std::path::Path;

use crate::Context;
use crate::cli::ConfigCommand;
use crate::config::{Config, default_config_path};
use crate::ui;

pub fn run(_ctx: &Context, explicit: Option<&Path>, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => show(explicit),
        ConfigCommand::Path => path(explicit),
    }
}

fn show(explicit: Option<&Path>) -> Result<()> {
    let loaded = Config::load(explicit)?;
    if loaded.source.is_none() {
        ui::note("# no config file found, showing built-in defaults");
    }
    print!("{}", loaded.config.to_toml()?);
    Ok(())
}

fn path(explicit: Option<&Path>) -> Result<()> {
    let loaded = Config::load(explicit)?;
    match loaded.source {
        Some(source) => println!("{}", source.display()),
        None => {
            println!("{}", default_config_path()?.display());
            ui::note("(not present, built-in defaults are used)");
        }
    }
    Ok(())
}
