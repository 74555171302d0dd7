// Netprofile - Configuration Backend
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! The external network configuration capability.
//!
//! Everything the engine does to the system goes through
//! [`NetworkConfigProvider`]. Calls are blocking and must not be issued
//! concurrently against the same adapter.

pub mod netsh;

#[cfg(test)]
pub mod testing;

use std::time::Duration;
use thiserror::Error;

use crate::models::AdapterInfo;

pub use netsh::NetshProvider;

/// Where an adapter gets its DNS servers from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DnsSource {
    /// Obtained from DHCP; also clears any static list.
    Dhcp,
}

/// Failure of a single call into the configuration tool.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The tool is not installed or not on PATH.
    #[error("command not found: {0}")]
    CommandNotFound(String),

    /// The tool ran and exited unsuccessfully.
    #[error("{command} failed ({}): {diagnostic}", exit_label(code))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        diagnostic: String,
    },

    /// The tool did not finish in time and was killed.
    #[error("{command} timed out after {}s", after.as_secs())]
    Timeout { command: String, after: Duration },

    /// Spawning or waiting on the tool failed.
    #[error("I/O error running command: {0}")]
    Io(String),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated".to_string(),
    }
}

pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Operations the engine needs from the operating system.
pub trait NetworkConfigProvider {
    /// List the adapters currently known to the system.
    fn list_adapters(&self) -> ProviderResult<Vec<AdapterInfo>>;

    /// Assign a static address, mask and optional gateway.
    fn set_static_address(
        &self,
        adapter: &str,
        ip: &str,
        subnet: &str,
        gateway: Option<&str>,
    ) -> ProviderResult<()>;

    /// Switch addressing to DHCP.
    fn set_dhcp_address(&self, adapter: &str) -> ProviderResult<()>;

    /// Select where DNS servers come from.
    fn set_dns_source(&self, adapter: &str, source: DnsSource) -> ProviderResult<()>;

    /// Replace the DNS list with a single primary server.
    fn set_primary_dns(&self, adapter: &str, dns: &str) -> ProviderResult<()>;

    /// Add a DNS server at `index` (1-based).
    fn add_secondary_dns(&self, adapter: &str, dns: &str, index: u32) -> ProviderResult<()>;
}
