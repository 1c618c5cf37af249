//! Debian/Ubuntu `apt-get` backend.

use crate::backend::Backend;
use crate::types::{CommandLine, ManagerKind};

/// Backend that builds `apt-get` commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct AptBackend;

impl Backend for AptBackend {
    fn kind(&self) -> ManagerKind {
        ManagerKind::Apt
    }

    fn refresh(&self) -> CommandLine {
        CommandLine::privileged("apt-get", ["update", "-y"])
    }

    fn upgrade(&self) -> CommandLine {
        CommandLine::privileged("apt-get", ["upgrade", "-y"])
    }

    fn install(&self, packages: &[String]) -> CommandLine {
        let mut args = vec!["install".to_string(), "-y".to_string()];
        args.extend(packages.iter().cloned());
        CommandLine::privileged("apt-get", args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apt_commands() {
        let apt = AptBackend;
        assert_eq!(apt.refresh().to_string(), "sudo apt-get update -y");
        assert_eq!(apt.upgrade().to_string(), "sudo apt-get upgrade -y");
        assert_eq!(
            apt.install(&["docker.io".to_string(), "docker-compose".to_string()])
                .to_string(),
            "sudo apt-get install -y docker.io docker-compose"
        );
    }
}
