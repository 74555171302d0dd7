// Netprofile - Application Configuration
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Application configuration model.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration, read from `settings.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Profiles document location (None = next to the settings file).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profiles_file: Option<PathBuf>,

    /// Timeout for a single configuration command, in seconds.
    #[serde(default = "default_command_timeout")]
    pub command_timeout_secs: u64,

    /// Metric passed along with a static gateway.
    #[serde(default = "default_gateway_metric")]
    pub gateway_metric: u32,

    /// Program used to query and change interface settings.
    #[serde(default = "default_netsh_program")]
    pub netsh_program: String,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Save profiles right after a profile was rebound to another adapter.
    #[serde(default = "default_true")]
    pub save_on_rebind: bool,
}

fn default_command_timeout() -> u64 {
    30
}

fn default_gateway_metric() -> u32 {
    1
}

fn default_netsh_program() -> String {
    "netsh".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            profiles_file: None,
            command_timeout_secs: default_command_timeout(),
            gateway_metric: default_gateway_metric(),
            netsh_program: default_netsh_program(),
            log_level: default_log_level(),
            save_on_rebind: true,
        }
    }
}

impl AppConfig {
    /// Per-command timeout.
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs.max(1))
    }

    /// Load configuration from TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self, super::Error> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| super::Error::ConfigReadFailed(format!("{}: {}", path.display(), e)))?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to TOML file with restrictive permissions (0600).
    pub fn save_to_file(&self, path: &Path) -> Result<(), super::Error> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600));
        }
        Ok(())
    }
}
