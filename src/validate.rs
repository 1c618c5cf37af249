//! Validators for operator-supplied values
//!
//! Each validator returns the cleaned value or a [`ValidationError`] saying
//! why it was refused, so callers decide whether to reprompt or give up.

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

/// Ports the application may not claim: ssh, http, https
pub const RESERVED_PORTS: [u16; 3] = [22, 80, 443];

static HOSTNAME_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?$").expect("valid hostname regex")
});

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("hostname cannot be empty")]
    EmptyHostname,

    #[error("invalid hostname (i.e. {0}): expected a domain such as example.com")]
    HostnameMissingDot(String),

    #[error("invalid hostname (i.e. {hostname}): bad label '{label}'")]
    InvalidHostnameLabel { hostname: String, label: String },

    #[error("invalid app port (i.e. {0}): not a number")]
    NotANumber(String),

    #[error("invalid app port (i.e. {0}): must be between 1 and 65535")]
    PortOutOfRange(i64),

    #[error("invalid app port (i.e. {0}): reserved for ssh/http/https")]
    ReservedPort(u16),

    #[error("service name cannot be empty")]
    EmptyServiceName,

    #[error("invalid service name (i.e. {0}): must not contain '/' or whitespace")]
    InvalidServiceName(String),

    #[error("app dir (i.e. {0}) must be an absolute path")]
    RelativeWorkingDir(PathBuf),

    #[error("app dir (i.e. {0}) is not an existing directory")]
    MissingWorkingDir(PathBuf),

    #[error("{field} must be a single line without control characters")]
    ControlCharacters { field: &'static str },

    #[error("app start command cannot be empty")]
    EmptyStartCommand,
}

pub type Result<T> = std::result::Result<T, ValidationError>;

/// A public hostname: non-empty, dotted, DNS-safe labels
pub fn hostname(input: &str) -> Result<String> {
    let hostname = input.trim();
    if hostname.is_empty() {
        return Err(ValidationError::EmptyHostname);
    }
    if !hostname.contains('.') {
        return Err(ValidationError::HostnameMissingDot(hostname.to_string()));
    }

    if let Some(label) = hostname.split('.').find(|l| !HOSTNAME_LABEL.is_match(l)) {
        return Err(ValidationError::InvalidHostnameLabel {
            hostname: hostname.to_string(),
            label: label.to_string(),
        });
    }

    Ok(hostname.to_lowercase())
}

/// The local port nginx forwards to
pub fn app_port(port: u16) -> Result<u16> {
    if port == 0 {
        return Err(ValidationError::PortOutOfRange(0));
    }
    if RESERVED_PORTS.contains(&port) {
        return Err(ValidationError::ReservedPort(port));
    }
    Ok(port)
}

/// Parse then validate a typed port
pub fn parse_app_port(input: &str) -> Result<u16> {
    let trimmed = input.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| ValidationError::NotANumber(trimmed.to_string()))?;
    let port = u16::try_from(value).map_err(|_| ValidationError::PortOutOfRange(value))?;
    app_port(port)
}

/// Used as the unit file name, so it must be a single path component
pub fn service_name(input: &str) -> Result<String> {
    let name = input.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyServiceName);
    }
    if name.contains('/') || name.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidServiceName(name.to_string()));
    }
    Ok(name.to_string())
}

/// systemd only accepts absolute working directories
pub fn working_dir<F>(path: &Path, is_dir: F) -> Result<PathBuf>
where
    F: Fn(&Path) -> bool,
{
    if has_control_chars(&path.to_string_lossy()) {
        return Err(ValidationError::ControlCharacters { field: "app dir" });
    }
    if !path.is_absolute() {
        return Err(ValidationError::RelativeWorkingDir(path.to_path_buf()));
    }
    if !is_dir(path) {
        return Err(ValidationError::MissingWorkingDir(path.to_path_buf()));
    }
    Ok(path.to_path_buf())
}

pub fn start_command(input: &str) -> Result<String> {
    let command = input.trim();
    if command.is_empty() {
        return Err(ValidationError::EmptyStartCommand);
    }
    if has_control_chars(command) {
        return Err(ValidationError::ControlCharacters {
            field: "app start command",
        });
    }
    Ok(command.to_string())
}

/// A line break would start a new directive in the rendered unit file
fn has_control_chars(value: &str) -> bool {
    value.chars().any(char::is_control)
}
