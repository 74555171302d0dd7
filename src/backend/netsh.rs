// Netprofile - netsh Backend
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Interface configuration through `netsh interface ipv4`.
//!
//! Each call spawns one `netsh` process and waits for it, bounded by the
//! configured timeout. Adapters are discovered by parsing the table printed
//! by `netsh interface show interface`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::io::ErrorKind;
use std::time::Duration;
use tracing::{debug, warn};

use super::{DnsSource, NetworkConfigProvider, ProviderError, ProviderResult};
use crate::models::{AdapterInfo, AdapterType, AppConfig, Error, Result};

/// One data row: admin state, state, type, then the name (may contain spaces).
static INTERFACE_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\S+)\s+(\S+)\s+(\S+)\s+(\S.*?)\s*$").expect("interface row pattern is valid")
});

/// Provider backed by the `netsh` command.
pub struct NetshProvider {
    program: String,
    timeout: Duration,
    gateway_metric: u32,
    runtime: tokio::runtime::Runtime,
}

impl NetshProvider {
    /// Create a provider from the application configuration.
    pub fn new(config: &AppConfig) -> Result<Self> {
        Self::with_program(
            config.netsh_program.clone(),
            config.command_timeout(),
            config.gateway_metric,
        )
    }

    /// Create a provider running `program` with the given timeout.
    pub fn with_program(
        program: impl Into<String>,
        timeout: Duration,
        gateway_metric: u32,
    ) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create process runtime: {}", e)))?;
        Ok(Self {
            program: program.into(),
            timeout,
            gateway_metric,
            runtime,
        })
    }

    /// Run the tool with `args`, returning stdout on success.
    fn run(&self, args: &[String]) -> ProviderResult<String> {
        let command_line = format!("{} {}", self.program, args.join(" "));
        debug!("Running: {}", command_line);

        let mut command = tokio::process::Command::new(&self.program);
        command.args(args).kill_on_drop(true);

        let output = self
            .runtime
            .block_on(async { tokio::time::timeout(self.timeout, command.output()).await });

        match output {
            Err(_) => {
                warn!(
                    "Command timed out after {:?}: {}",
                    self.timeout, command_line
                );
                Err(ProviderError::Timeout {
                    command: command_line,
                    after: self.timeout,
                })
            }
            Ok(Err(e)) if e.kind() == ErrorKind::NotFound => {
                Err(ProviderError::CommandNotFound(self.program.clone()))
            }
            Ok(Err(e)) => Err(ProviderError::Io(e.to_string())),
            Ok(Ok(output)) => {
                let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
                if output.status.success() {
                    return Ok(stdout);
                }
                // netsh prints most errors on stdout
                let stderr = String::from_utf8_lossy(&output.stderr);
                let diagnostic = [stderr.trim(), stdout.trim()]
                    .into_iter()
                    .find(|s| !s.is_empty())
                    .unwrap_or("no diagnostic output")
                    .to_string();
                warn!(
                    "Command failed ({:?}): {} - {}",
                    output.status.code(),
                    command_line,
                    diagnostic
                );
                Err(ProviderError::CommandFailed {
                    command: command_line,
                    code: output.status.code(),
                    diagnostic,
                })
            }
        }
    }
}

impl NetworkConfigProvider for NetshProvider {
    fn list_adapters(&self) -> ProviderResult<Vec<AdapterInfo>> {
        let output = self.run(&interface_table_args())?;
        Ok(parse_interface_table(&output))
    }

    fn set_static_address(
        &self,
        adapter: &str,
        ip: &str,
        subnet: &str,
        gateway: Option<&str>,
    ) -> ProviderResult<()> {
        let metric = self.gateway_metric;
        self.run(&static_address_args(adapter, ip, subnet, gateway, metric)).map(drop)
    }

    fn set_dhcp_address(&self, adapter: &str) -> ProviderResult<()> {
        self.run(&dhcp_address_args(adapter)).map(drop)
    }

    fn set_dns_source(&self, adapter: &str, source: DnsSource) -> ProviderResult<()> {
        self.run(&dns_source_args(adapter, source)).map(drop)
    }

    fn set_primary_dns(&self, adapter: &str, dns: &str) -> ProviderResult<()> {
        self.run(&primary_dns_args(adapter, dns)).map(drop)
    }

    fn add_secondary_dns(&self, adapter: &str, dns: &str, index: u32) -> ProviderResult<()> {
        self.run(&secondary_dns_args(adapter, dns, index)).map(drop)
    }
}

fn args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

fn name_arg(adapter: &str) -> String {
    format!("name={}", adapter)
}

pub(crate) fn interface_table_args() -> Vec<String> {
    args(&["interface", "show", "interface"])
}

pub(crate) fn static_address_args(
    adapter: &str,
    ip: &str,
    subnet: &str,
    gateway: Option<&str>,
    metric: u32,
) -> Vec<String> {
    let mut out = args(&["interface", "ipv4", "set", "address"]);
    out.push(name_arg(adapter));
    out.extend(args(&["static", ip, subnet]));
    if let Some(gateway) = gateway.filter(|g| !g.is_empty()) {
        out.push(gateway.to_string());
        out.push(metric.to_string());
    }
    out
}

pub(crate) fn dhcp_address_args(adapter: &str) -> Vec<String> {
    let mut out = args(&["interface", "ipv4", "set", "address"]);
    out.push(name_arg(adapter));
    out.push("source=dhcp".to_string());
    out
}

pub(crate) fn dns_source_args(adapter: &str, source: DnsSource) -> Vec<String> {
    let mut out = args(&["interface", "ipv4", "set", "dnsserver"]);
    out.push(name_arg(adapter));
    match source {
        DnsSource::Dhcp => out.push("source=dhcp".to_string()),
    }
    out
}

pub(crate) fn primary_dns_args(adapter: &str, dns: &str) -> Vec<String> {
    let mut out = args(&["interface", "ipv4", "set", "dnsserver"]);
    out.push(name_arg(adapter));
    out.extend(args(&["static", dns, "primary"]));
    out
}

pub(crate) fn secondary_dns_args(adapter: &str, dns: &str, index: u32) -> Vec<String> {
    let mut out = args(&["interface", "ipv4", "add", "dnsserver"]);
    out.push(name_arg(adapter));
    out.push(dns.to_string());
    out.push(format!("index={}", index));
    out
}

/// Parse the output of `netsh interface show interface`.
///
/// Header words are localized, so rows are located by the dashed separator
/// line rather than by column titles. Unrecognized output yields an empty
/// list and a warning.
pub fn parse_interface_table(output: &str) -> Vec<AdapterInfo> {
    let lines: Vec<&str> = output.lines().collect();
    let separator = lines.iter().position(|line| {
        let line = line.trim();
        !line.is_empty() && line.chars().all(|c| c == '-' || c.is_whitespace())
    });

    let Some(separator) = separator else {
        if !output.trim().is_empty() {
            warn!("Unrecognized interface table output, treating as no adapters");
        }
        return Vec::new();
    };

    let mut adapters = Vec::new();
    for line in &lines[separator + 1..] {
        if line.trim().is_empty() {
            continue;
        }
        match INTERFACE_ROW.captures(line) {
            Some(caps) => {
                let mut info = AdapterInfo::new(&caps[4], AdapterType::from_column(&caps[3]));
                info.admin_state = caps[1].to_string();
                info.state = caps[2].to_string();
                adapters.push(info);
            }
            None => warn!("Skipping unparseable interface row: {:?}", line),
        }
    }

    if adapters.is_empty() {
        warn!("Interface table contained no adapter rows");
    }
    adapters
}
