// Netprofile - Privilege Check
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Elevated-rights detection, queried once at startup.

use tracing::debug;

/// Whether the process can change interface configuration.
#[cfg(windows)]
pub fn is_elevated() -> bool {
    // `net session` is refused for non-elevated processes
    let elevated = std::process::Command::new("net")
        .arg("session")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false);
    debug!("Elevated: {}", elevated);
    elevated
}

/// Whether the process can change interface configuration.
#[cfg(unix)]
pub fn is_elevated() -> bool {
    let elevated = nix::unistd::Uid::effective().is_root();
    debug!("Effective uid root: {}", elevated);
    elevated
}

/// Whether the process can change interface configuration.
#[cfg(not(any(windows, unix)))]
pub fn is_elevated() -> bool {
    debug!("No privilege check on this platform");
    false
}
