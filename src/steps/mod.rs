//! Provisioning steps, in menu order

pub mod files;
pub mod firewall;
pub mod nginx;
pub mod system;
pub mod systemd;

use crate::menu::Step;

pub fn all() -> Vec<Step> {
    vec![
        Step::new("Upgrade system", system::upgrade_system),
        Step::new("Install base packages", system::install_base_packages),
        Step::new("Set timezone (UTC)", system::set_timezone),
        Step::new("Setup Nginx", nginx::setup_nginx),
        Step::new("Reload Nginx", nginx::reload_nginx),
        Step::new("Setup firewall", firewall::setup_firewall),
        Step::new("Setup SystemD Service", systemd::setup_service),
        Step::new("Reload SystemD", systemd::reload_systemd),
    ]
}
