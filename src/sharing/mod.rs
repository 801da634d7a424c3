//! Sharing capability
//!
//! Hands a recorded file off to the host OS. The controller only sees the
//! [`ShareTarget`] trait; `SystemShare` is the desktop implementation.

use crate::{Result, SoundbiteError};
use std::path::Path;
use std::process::Command;
use tracing::info;

/// Options passed along with a share request.
#[derive(Debug, Clone)]
pub struct ShareOptions {
    /// Title shown on the host's share dialog, where supported.
    pub dialog_title: String,
}

/// The sharing capability.
pub trait ShareTarget {
    /// Whether sharing is supported on this host.
    fn is_available(&self) -> bool;

    /// Hand the file at `uri` to the host share surface.
    fn share(&mut self, uri: &Path, options: &ShareOptions) -> Result<()>;
}

/// Desktop share: opens the recording with the platform handler so the
/// user can forward it from there. Spawned detached; the handler owns the
/// interaction from that point on.
pub struct SystemShare;

impl SystemShare {
    #[cfg(target_os = "macos")]
    const OPENER: &'static str = "open";
    #[cfg(target_os = "windows")]
    const OPENER: &'static str = "explorer";
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    const OPENER: &'static str = "xdg-open";

    fn opener_exists() -> bool {
        if cfg!(target_os = "windows") {
            return true;
        }
        std::env::var_os("PATH")
            .map(|paths| {
                std::env::split_paths(&paths).any(|dir| dir.join(Self::OPENER).is_file())
            })
            .unwrap_or(false)
    }
}

impl ShareTarget for SystemShare {
    fn is_available(&self) -> bool {
        Self::opener_exists()
    }

    fn share(&mut self, uri: &Path, options: &ShareOptions) -> Result<()> {
        info!("{}: handing {} to {}", options.dialog_title, uri.display(), Self::OPENER);

        Command::new(Self::OPENER)
            .arg(uri)
            .spawn()
            .map_err(|e| SoundbiteError::ShareError(format!("Failed to spawn opener: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opener_availability_is_consistent() {
        let share = SystemShare;
        // Repeated probes must agree; the PATH does not change under us.
        assert_eq!(share.is_available(), share.is_available());
    }
}
