//! Error types for package-manager selection.

use thiserror::Error;

/// Errors that can occur while choosing a package manager.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// None of the supported package managers was found on the host
    #[error("no supported package manager found (looked for: {looked_for})")]
    NoPackageManager {
        /// Comma-separated list of the binaries that were probed
        looked_for: String,
    },

    /// A configured package manager name is not one pkgkit knows about
    #[error("unknown package manager: {0} (expected auto, apt-get or dnf)")]
    UnknownPackageManager(String),
}

/// Result type alias for pkgkit operations.
pub type Result<T> = std::result::Result<T, Error>;
