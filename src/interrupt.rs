//! Ctrl+C handling
//!
//! SIGINT is delivered to the whole foreground process group, so a running
//! child dies with it while vpsetup records the signal and keeps going just
//! long enough to unwind back to `main` with an [`Interrupted`] error.

use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// The user pressed Ctrl+C. Treated as a clean exit.
#[derive(Debug, Error)]
#[error("interrupted")]
pub struct Interrupted;

/// Check whether an error chain ends the session because of Ctrl+C
pub fn is_interrupt(err: &anyhow::Error) -> bool {
    err.downcast_ref::<Interrupted>().is_some()
}

#[cfg(unix)]
extern "C" fn on_sigint(_signal: libc::c_int) {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

/// Install the SIGINT handler. Exec resets it to the default in children.
#[cfg(unix)]
pub fn install() -> Result<()> {
    use anyhow::Context;
    use std::mem::MaybeUninit;

    // SAFETY: the handler only touches an atomic, and the sigaction struct is
    // fully initialised (zeroed, then mask emptied) before being passed in.
    #[allow(unsafe_code)]
    unsafe {
        let mut action: libc::sigaction = MaybeUninit::zeroed().assume_init();
        action.sa_sigaction = on_sigint as extern "C" fn(libc::c_int) as libc::sighandler_t;
        action.sa_flags = 0;
        libc::sigemptyset(&raw mut action.sa_mask);

        if libc::sigaction(libc::SIGINT, &raw const action, std::ptr::null_mut()) != 0 {
            return Err(std::io::Error::last_os_error())
                .context("Failed to install Ctrl+C handler");
        }
    }

    Ok(())
}

#[cfg(not(unix))]
pub fn install() -> Result<()> {
    Ok(())
}

/// Consume a pending interrupt, if any
pub fn take() -> bool {
    INTERRUPTED.swap(false, Ordering::SeqCst)
}

/// Return `Err(Interrupted)` if Ctrl+C arrived since the last check
pub fn check() -> Result<()> {
    if take() {
        return Err(Interrupted.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_interrupt() {
        let err: anyhow::Error = Interrupted.into();
        assert!(is_interrupt(&err));
        assert!(is_interrupt(&err.context("while running step")));

        let other = anyhow::anyhow!("something else");
        assert!(!is_interrupt(&other));
    }
}
