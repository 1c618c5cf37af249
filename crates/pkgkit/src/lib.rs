//! # pkgkit
//!
//! Command builders for Linux system package managers.
//!
//! pkgkit does not run anything itself. Each [`Backend`] turns a package
//! operation (refresh the index, upgrade everything, install a list) into a
//! [`CommandLine`] that the caller executes however it likes: inheriting
//! stdio, in a dry run, or recorded by a test harness.
//!
//! ## Example
//!
//! ```
//! use pkgkit::{ManagerKind, backend_for};
//!
//! let apt = backend_for(ManagerKind::Apt);
//! let cmd = apt.install(&["rsync".to_string(), "ufw".to_string()]);
//! assert_eq!(cmd.to_string(), "sudo apt-get install -y rsync ufw");
//! ```
//!
//! ## Detection
//!
//! [`detect`] walks [`DETECTION_ORDER`] and picks the first manager whose
//! binary the probe reports as available. The probe is injected so callers
//! decide how to look (`which`, a fixed answer in tests, ...).

pub mod backend;
pub mod error;
pub mod types;

pub use backend::{Backend, DETECTION_ORDER, backend_for, detect, resolve};
pub use error::{Error, Result};
pub use types::{CommandLine, ManagerKind, Preference};
