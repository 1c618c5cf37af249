use anyhow::Result;

use crate::session::Session;
use crate::ui;

pub const TIMEZONE: &str = "UTC";

pub fn upgrade_system(session: &mut Session<'_>) -> Result<()> {
    ui::action("upgrading system");
    let refresh = session.packages()?.refresh();
    let upgrade = session.packages()?.upgrade();
    session.run(refresh)?;
    session.run(upgrade)
}

pub fn install_base_packages(session: &mut Session<'_>) -> Result<()> {
    ui::action("installing base packages");
    if session.config.base_packages.is_empty() {
        ui::note("no base packages configured");
        return Ok(());
    }
    let install = session.packages()?.install(&session.config.base_packages);
    session.run(install)
}

/// Install a single package through the detected manager
pub fn install_package(session: &mut Session<'_>, package: &str) -> Result<()> {
    let install = session.packages()?.install(&[package.to_string()]);
    session.run(install)
}

pub fn set_timezone(session: &mut Session<'_>) -> Result<()> {
    ui::action(&format!("setting system timezone to {TIMEZONE}"));
    session.sudo("timedatectl", ["set-timezone", TIMEZONE])
}
