//! nginx site block and systemd unit rendering
//!
//! Both configs can only be built through validating constructors, so a
//! rendered file never carries an unchecked hostname, port or path.

use std::path::{Path, PathBuf};

use crate::validate::{self, ValidationError};

/// MIME types nginx compresses on the fly
pub const GZIP_TYPES: &[&str] = &[
    "text/css",
    "application/javascript",
    "image/png",
    "image/jpeg",
    "image/webp",
];

/// Where the proxied application listens
pub const UPSTREAM_HOST: &str = "127.0.0.1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    hostname: String,
    port: u16,
}

impl ProxyConfig {
    pub fn new(hostname: &str, port: u16) -> Result<Self, ValidationError> {
        Ok(Self {
            hostname: validate::hostname(hostname)?,
            port: validate::app_port(port)?,
        })
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Site block proxying `hostname` to the local app, websockets included
    pub fn render(&self) -> String {
        format!(
            r#"server {{
    server_name {hostname};
    location / {{
        proxy_set_header X-Forwarded-For $proxy_add_x_forwarded_for;
        proxy_set_header Host $host;
        proxy_pass http://{upstream}:{port};
        proxy_http_version 1.1;
        proxy_set_header Upgrade $http_upgrade;
        proxy_set_header Connection "upgrade";
    }}

    gzip on;
    gzip_types {gzip_types};
    gzip_proxied any;
}}
"#,
            hostname = self.hostname,
            upstream = UPSTREAM_HOST,
            port = self.port,
            gzip_types = GZIP_TYPES.join(" "),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    name: String,
    working_dir: PathBuf,
    start_command: String,
}

impl ServiceConfig {
    /// `is_dir` decides whether the working directory is a directory on the host
    pub fn new<F>(
        name: &str,
        working_dir: &Path,
        start_command: &str,
        is_dir: F,
    ) -> Result<Self, ValidationError>
    where
        F: Fn(&Path) -> bool,
    {
        Ok(Self {
            name: validate::service_name(name)?,
            working_dir: validate::working_dir(working_dir, is_dir)?,
            start_command: validate::start_command(start_command)?,
        })
    }

    /// File name of the unit, e.g. `MySite.service`
    pub fn unit_file_name(&self) -> String {
        format!("{}.service", self.name)
    }

    pub fn render(&self) -> String {
        format!(
            "[Unit]
Description={name}
After=network.target

[Service]
ExecStart={start}
WorkingDirectory={dir}
Type=simple
Restart=always

[Install]
WantedBy=default.target
",
            name = self.name,
            start = self.start_command,
            dir = self.working_dir.display(),
        )
    }
}
