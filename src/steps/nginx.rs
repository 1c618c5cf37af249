//! Reverse proxy: nginx in front of the local application

use anyhow::{Result, bail};
use std::path::Path;

use super::files::{self, Replace};
use super::system::install_package;
use crate::session::Session;
use crate::templates::ProxyConfig;
use crate::ui;
use crate::validate::{self, ValidationError};

/// Site shipped by the distro package, removed so ours answers on port 80
pub const DEFAULT_SITE: &str = "default";

pub fn setup_nginx(session: &mut Session<'_>) -> Result<()> {
    ui::action("installing nginx");
    install_package(session, "nginx")?;
    session.sudo("systemctl", ["enable", "nginx"])?;
    session.sudo("systemctl", ["start", "nginx"])?;

    let available = session.config.nginx.sites_available.clone();
    let enabled = session.config.nginx.sites_enabled.clone();

    files::ensure_dir(session, &available)?;
    files::ensure_dir(session, &enabled)?;
    remove_default_site(session, &available, &enabled)?;

    let proxy = resolve_proxy(session)?;
    let site_path = available.join(proxy.hostname());
    let link_path = enabled.join(proxy.hostname());

    ui::action(&format!("creating site entry at {}", site_path.display()));
    let site = proxy.render();
    if files::offer_replace(session, &site_path, &site, "site available entry")?.should_write() {
        files::write(session, &site_path, &site)?;
    }

    if link_site(session, &site_path, &link_path)? {
        ui::action(&format!("linking config to {}", site_path.display()));
        session.sudo(
            "ln",
            [
                "-s".to_string(),
                files::path_arg(&site_path),
                files::path_arg(&link_path),
            ],
        )?;
    }

    reload_nginx(session)
}

pub fn reload_nginx(session: &mut Session<'_>) -> Result<()> {
    ui::action("reloading Nginx configs");
    session.sudo("nginx", ["-s", "reload"])
}

fn remove_default_site(session: &mut Session<'_>, available: &Path, enabled: &Path) -> Result<()> {
    for (dir, kind) in [(available, "available"), (enabled, "enabled")] {
        let default = dir.join(DEFAULT_SITE);
        if session.exists(&default) {
            ui::action(&format!("removing default Nginx site {kind} config"));
            files::remove(session, &default)?;
        }
    }
    Ok(())
}

/// Whether the `ln -s` still has to happen
fn link_site(session: &mut Session<'_>, site_path: &Path, link_path: &Path) -> Result<bool> {
    if !session.exists(link_path) {
        return Ok(true);
    }
    if session.host.read_link(link_path).as_deref() == Some(site_path) {
        ui::success("sites enabled entry is already linked");
        return Ok(false);
    }

    ui::warn("sites enabled entry already exists");
    let outcome = files::offer_removal(session, link_path, "sites enabled entry")?;
    Ok(outcome == Replace::Removed)
}

/// Take hostname and port from the config, asking the operator for
/// replacements until each one validates.
fn resolve_proxy(session: &mut Session<'_>) -> Result<ProxyConfig> {
    let hostname = match validate::hostname(&session.config.hostname) {
        Ok(hostname) => hostname,
        Err(e) => {
            ui::error(&e.to_string());
            ask_until_valid(session, "hostname", validate::hostname)?
        }
    };

    let port = match validate::app_port(session.config.app_port) {
        Ok(port) => port,
        Err(e) => {
            ui::error(&e.to_string());
            ask_until_valid(session, "app port", validate::parse_app_port)?
        }
    };

    Ok(ProxyConfig::new(&hostname, port)?)
}

fn ask_until_valid<T>(
    session: &mut Session<'_>,
    label: &str,
    parse: fn(&str) -> Result<T, ValidationError>,
) -> Result<T> {
    loop {
        let Some(line) = session.prompt.read_line(label)? else {
            bail!("no {label} given");
        };
        match parse(&line) {
            Ok(value) => return Ok(value),
            Err(e) => ui::error(&e.to_string()),
        }
    }
}
