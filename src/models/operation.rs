// Netprofile - Configuration Operations
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Atomic configuration operations.
//!
//! An `Operation` describes one change to make on one adapter. Operations are
//! plain values: building a plan has no side effects, only executing it does.

use serde::{Deserialize, Serialize};

/// A single configuration step against one adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum Operation {
    /// Put a fixed address, mask and gateway on the adapter.
    SetStaticAddress {
        adapter: String,
        ip: String,
        subnet: String,
        /// Empty when the profile has no gateway.
        gateway: String,
    },

    /// Obtain the address from DHCP.
    SetDhcpAddress { adapter: String },

    /// Reset DNS to DHCP before writing a new static list.
    ClearDnsToDhcp { adapter: String },

    /// Replace the DNS list with a single static primary server.
    SetPrimaryDns { adapter: String, dns: String },

    /// Append a DNS server at the given position (2 and up).
    AddSecondaryDns {
        adapter: String,
        dns: String,
        index: u32,
    },

    /// Obtain DNS servers from DHCP.
    SetDnsDhcp { adapter: String },
}

impl Operation {
    /// Adapter this operation targets.
    pub fn adapter(&self) -> &str {
        match self {
            Self::SetStaticAddress { adapter, .. }
            | Self::SetDhcpAddress { adapter }
            | Self::ClearDnsToDhcp { adapter }
            | Self::SetPrimaryDns { adapter, .. }
            | Self::AddSecondaryDns { adapter, .. }
            | Self::SetDnsDhcp { adapter } => adapter,
        }
    }

    /// Whether this operation changes interface addressing (as opposed to DNS).
    pub fn is_address_stage(&self) -> bool {
        matches!(
            self,
            Self::SetStaticAddress { .. } | Self::SetDhcpAddress { .. }
        )
    }

    /// Get a short name for the operation.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetStaticAddress { .. } => "Set Static Address",
            Self::SetDhcpAddress { .. } => "Set DHCP Address",
            Self::ClearDnsToDhcp { .. } => "Clear DNS",
            Self::SetPrimaryDns { .. } => "Set Primary DNS",
            Self::AddSecondaryDns { .. } => "Add Secondary DNS",
            Self::SetDnsDhcp { .. } => "Set DNS to DHCP",
        }
    }

    /// Get a human-readable description.
    pub fn description(&self) -> String {
        match self {
            Self::SetStaticAddress {
                adapter,
                ip,
                subnet,
                gateway,
            } => {
                if gateway.is_empty() {
                    format!("IPv4 {}/{} on {}", ip, subnet, adapter)
                } else {
                    format!("IPv4 {}/{} via {} on {}", ip, subnet, gateway, adapter)
                }
            }
            Self::SetDhcpAddress { adapter } => format!("IPv4 via DHCP on {}", adapter),
            Self::ClearDnsToDhcp { adapter } => format!("Reset DNS on {}", adapter),
            Self::SetPrimaryDns { adapter, dns } => format!("Primary DNS {} on {}", dns, adapter),
            Self::AddSecondaryDns {
                adapter,
                dns,
                index,
            } => format!("DNS #{} {} on {}", index, dns, adapter),
            Self::SetDnsDhcp { adapter } => format!("DNS via DHCP on {}", adapter),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name(), self.description())
    }
}
