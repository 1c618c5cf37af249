use anyhow::Result;

use super::system::install_package;
use crate::session::Session;
use crate::ui;

pub fn setup_firewall(session: &mut Session<'_>) -> Result<()> {
    ui::action("installing firewall");
    install_package(session, "ufw")?;

    ui::action(" - closing all incoming connections");
    session.sudo("ufw", ["default", "deny", "incoming"])?;

    ui::action(" - closing all outgoing connections");
    session.sudo("ufw", ["default", "deny", "outgoing"])?;

    ui::action(" - opening specific ports");
    for rule in session.config.open_ports.clone() {
        session.sudo("ufw", [rule.policy.to_string(), rule.port.to_string()])?;
    }

    ui::action(" - enabling firewall");
    session.sudo("ufw", ["enable"])
}
