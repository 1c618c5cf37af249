//! Fedora/RHEL `dnf` backend.

use crate::backend::Backend;
use crate::types::{CommandLine, ManagerKind};

/// Backend that builds `dnf` commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct DnfBackend;

impl Backend for DnfBackend {
    fn kind(&self) -> ManagerKind {
        ManagerKind::Dnf
    }

    // `dnf update` is an alias of upgrade; makecache only refreshes metadata
    fn refresh(&self) -> CommandLine {
        CommandLine::privileged("dnf", ["makecache", "-y"])
    }

    fn upgrade(&self) -> CommandLine {
        CommandLine::privileged("dnf", ["upgrade", "-y"])
    }

    fn install(&self, packages: &[String]) -> CommandLine {
        let mut args = vec!["install".to_string(), "-y".to_string()];
        args.extend(packages.iter().cloned());
        CommandLine::privileged("dnf", args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dnf_commands() {
        let dnf = DnfBackend;
        assert_eq!(dnf.refresh().to_string(), "sudo dnf makecache -y");
        assert_eq!(dnf.upgrade().to_string(), "sudo dnf upgrade -y");
        assert_eq!(
            dnf.install(&["ufw".to_string()]).to_string(),
            "sudo dnf install -y ufw"
        );
    }
}
