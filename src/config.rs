use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::validate::{self, ValidationError};

/// Get the config directory path
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("vpsetup"))
}

/// Default location of the config file
pub fn default_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Expand `~` in a configured path
fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).as_ref())
}

// ============================================================================
// Firewall rules
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortPolicy {
    Allow,
    /// Allow, but rate-limit repeated connection attempts
    Limit,
}

impl PortPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Limit => "limit",
        }
    }
}

impl fmt::Display for PortPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenPortRule {
    pub policy: PortPolicy,
    pub port: u16,
}

impl OpenPortRule {
    pub const fn allow(port: u16) -> Self {
        Self {
            policy: PortPolicy::Allow,
            port,
        }
    }

    pub const fn limit(port: u16) -> Self {
        Self {
            policy: PortPolicy::Limit,
            port,
        }
    }
}

/// http, https, and ssh rate-limited against brute force
pub const DEFAULT_OPEN_PORTS: [OpenPortRule; 3] = [
    OpenPortRule::allow(80),
    OpenPortRule::allow(443),
    OpenPortRule::limit(22),
];

pub const DEFAULT_BASE_PACKAGES: [&str; 4] = ["rsync", "kakoune", "docker.io", "docker-compose"];

// ============================================================================
// Config
// ============================================================================

/// Everything a provisioning run can be tuned with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Public hostname nginx serves
    pub hostname: String,
    /// Local port the application listens on
    pub app_port: u16,
    pub app_dir: PathBuf,
    pub app_start_cmd: String,
    /// systemd unit name, without `.service`
    pub app_service_name: String,
    pub base_packages: Vec<String>,
    /// `auto`, `apt-get` or `dnf`
    pub package_manager: String,
    pub systemd_dir: PathBuf,
    // tables last so the TOML serializer can emit them
    pub nginx: NginxPaths,
    pub open_ports: Vec<OpenPortRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NginxPaths {
    pub sites_available: PathBuf,
    pub sites_enabled: PathBuf,
}

impl Default for NginxPaths {
    fn default() -> Self {
        Self {
            sites_available: PathBuf::from("/etc/nginx/sites-available"),
            sites_enabled: PathBuf::from("/etc/nginx/sites-enabled"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hostname: "mysite.com".to_string(),
            app_port: 3000,
            app_dir: PathBuf::from("/home/admin/app"),
            app_start_cmd: "npm run start".to_string(),
            app_service_name: "MySite".to_string(),
            base_packages: DEFAULT_BASE_PACKAGES.map(String::from).to_vec(),
            package_manager: "auto".to_string(),
            systemd_dir: PathBuf::from("/etc/systemd/system"),
            nginx: NginxPaths::default(),
            open_ports: DEFAULT_OPEN_PORTS.to_vec(),
        }
    }
}

/// A config together with the file it came from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    /// `None` when running on built-in defaults
    pub source: Option<PathBuf>,
}

impl Config {
    /// Load from an explicit path (must exist) or the default location
    /// (optional, defaults when absent).
    pub fn load(explicit: Option<&Path>) -> Result<LoadedConfig> {
        let (path, required) = match explicit {
            Some(path) => (expand(path), true),
            None => (default_config_path()?, false),
        };

        if !required && !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(LoadedConfig {
                config: Self::default(),
                source: None,
            });
        }

        log::debug!("Loading config from {}", path.display());
        let config = Self::load_file(&path)?;
        Ok(LoadedConfig {
            config,
            source: Some(path),
        })
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).context("Invalid TOML format")?;
        config.expand_paths();
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    fn expand_paths(&mut self) {
        self.app_dir = expand(&self.app_dir);
        self.systemd_dir = expand(&self.systemd_dir);
        self.nginx.sites_available = expand(&self.nginx.sites_available);
        self.nginx.sites_enabled = expand(&self.nginx.sites_enabled);
    }

    /// Which package manager to use
    pub fn package_preference(&self) -> pkgkit::Result<pkgkit::Preference> {
        self.package_manager.parse()
    }

    /// Values that will make a step refuse to run. Reported at startup but
    /// not fatal: the operator may only want the steps that don't need them.
    pub fn problems<F>(&self, is_dir: F) -> Vec<ValidationError>
    where
        F: Fn(&Path) -> bool,
    {
        let mut problems = Vec::new();

        if let Err(e) = validate::hostname(&self.hostname) {
            problems.push(e);
        }
        if let Err(e) = validate::app_port(self.app_port) {
            problems.push(e);
        }
        if let Err(e) = validate::working_dir(&self.app_dir, is_dir) {
            problems.push(e);
        }
        if let Err(e) = validate::start_command(&self.app_start_cmd) {
            problems.push(e);
        }
        if let Err(e) = validate::service_name(&self.app_service_name) {
            problems.push(e);
        }

        problems
    }
}
