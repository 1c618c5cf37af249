//! Backend abstraction for package-manager operations.
//!
//! The [`Backend`] trait describes the three operations a provisioning run
//! needs. Implementations only build command lines; running them is the
//! caller's job.

pub mod apt;
pub mod dnf;

use crate::error::{Error, Result};
use crate::types::{CommandLine, ManagerKind, Preference};

/// Managers probed by [`detect`], in order of preference.
pub const DETECTION_ORDER: [ManagerKind; 2] = [ManagerKind::Apt, ManagerKind::Dnf];

/// Backend trait for system package managers.
pub trait Backend: Send + Sync {
    /// Which manager this backend drives.
    fn kind(&self) -> ManagerKind;

    /// Refresh the package index.
    fn refresh(&self) -> CommandLine;

    /// Upgrade every installed package.
    fn upgrade(&self) -> CommandLine;

    /// Install the given packages non-interactively.
    fn install(&self, packages: &[String]) -> CommandLine;
}

/// Get the backend for a specific manager.
pub fn backend_for(kind: ManagerKind) -> Box<dyn Backend> {
    match kind {
        ManagerKind::Apt => Box::new(apt::AptBackend),
        ManagerKind::Dnf => Box::new(dnf::DnfBackend),
    }
}

/// Pick the first manager in [`DETECTION_ORDER`] for which `is_available`
/// returns true.
pub fn detect<F>(is_available: F) -> Result<Box<dyn Backend>>
where
    F: Fn(&str) -> bool,
{
    DETECTION_ORDER
        .iter()
        .find(|kind| is_available(kind.binary()))
        .map(|kind| backend_for(*kind))
        .ok_or_else(|| Error::NoPackageManager {
            looked_for: DETECTION_ORDER
                .iter()
                .map(ManagerKind::binary)
                .collect::<Vec<_>>()
                .join(", "),
        })
}

/// Resolve a [`Preference`] into a backend, probing only for `Auto`.
pub fn resolve<F>(preference: Preference, is_available: F) -> Result<Box<dyn Backend>>
where
    F: Fn(&str) -> bool,
{
    match preference {
        Preference::Auto => detect(is_available),
        Preference::Fixed(kind) => Ok(backend_for(kind)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_prefers_apt() {
        let backend = detect(|_| true).unwrap();
        assert_eq!(backend.kind(), ManagerKind::Apt);
    }

    #[test]
    fn test_detect_falls_back_to_dnf() {
        let backend = detect(|bin| bin == "dnf").unwrap();
        assert_eq!(backend.kind(), ManagerKind::Dnf);
    }

    #[test]
    fn test_detect_none_available() {
        let err = detect(|_| false).err().unwrap();
        assert_eq!(
            err,
            Error::NoPackageManager {
                looked_for: "apt-get, dnf".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_fixed_skips_probe() {
        let backend = resolve(Preference::Fixed(ManagerKind::Dnf), |_| {
            panic!("fixed preference must not probe")
        })
        .unwrap();
        assert_eq!(backend.kind(), ManagerKind::Dnf);
    }
}
