// Netprofile - Profile Data Model
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Profile data model and its persisted record shape.
//!
//! A Profile names an adapter and the IPv4 configuration to put on it:
//! - Static: address, subnet mask, optional gateway, ordered DNS servers
//! - DHCP: address and DNS both obtained automatically
//!
//! On disk a profile is stored as a [`ProfileRecord`] under its name, so the
//! name itself lives in the key of the document, not in the record.

use serde::{Deserialize, Serialize};

use super::DEFAULT_SUBNET_MASK;

/// How the adapter obtains its IPv4 address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AddressMode {
    /// Fixed address, mask, gateway and DNS.
    #[default]
    Static,
    /// Everything obtained from a DHCP server.
    Dhcp,
}

impl AddressMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Static => "Static",
            Self::Dhcp => "DHCP",
        }
    }
}

/// A named interface configuration profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Unique profile name (store key).
    pub name: String,
    /// Adapter the profile is applied to.
    pub adapter: String,
    /// Addressing mode.
    pub mode: AddressMode,
    /// IPv4 address (Static only).
    pub ip: String,
    /// Subnet mask (Static only).
    pub subnet: String,
    /// Default gateway (Static only).
    pub gateway: Option<String>,
    /// DNS servers in priority order (Static only).
    pub dns: Vec<String>,
}

impl Profile {
    /// Create a static profile. A missing or blank subnet becomes
    /// [`DEFAULT_SUBNET_MASK`]; a blank gateway becomes `None`.
    pub fn new_static(
        name: impl Into<String>,
        adapter: impl Into<String>,
        ip: impl Into<String>,
        subnet: Option<&str>,
        gateway: Option<&str>,
        dns: Vec<String>,
    ) -> Self {
        let subnet = subnet
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SUBNET_MASK);
        Self {
            name: name.into(),
            adapter: adapter.into(),
            mode: AddressMode::Static,
            ip: ip.into(),
            subnet: subnet.to_string(),
            gateway: gateway
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .map(str::to_string),
            dns: dns
                .into_iter()
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty())
                .collect(),
        }
    }

    /// Create a DHCP profile.
    pub fn new_dhcp(name: impl Into<String>, adapter: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            adapter: adapter.into(),
            mode: AddressMode::Dhcp,
            ip: String::new(),
            subnet: String::new(),
            gateway: None,
            dns: Vec::new(),
        }
    }

    /// Point the profile at a different adapter.
    pub fn rebind(&mut self, adapter: impl Into<String>) {
        self.adapter = adapter.into();
    }

    /// Build the persisted record for this profile.
    pub fn to_record(&self) -> ProfileRecord {
        ProfileRecord {
            adapter: self.adapter.clone(),
            mode: self.mode,
            ip: self.ip.clone(),
            subnet: self.subnet.clone(),
            gateway: self.gateway.clone().unwrap_or_default(),
            dns: if self.dns.is_empty() {
                None
            } else {
                Some(self.dns.clone())
            },
        }
    }

    /// Rebuild a profile from its persisted record.
    pub fn from_record(name: impl Into<String>, record: ProfileRecord) -> Self {
        let gateway = Some(record.gateway.trim().to_string()).filter(|g| !g.is_empty());
        Self {
            name: name.into(),
            adapter: record.adapter,
            mode: record.mode,
            ip: record.ip,
            subnet: record.subnet,
            gateway,
            dns: record.dns.unwrap_or_default(),
        }
    }

    /// One-line summary for listings.
    pub fn summary(&self) -> String {
        match self.mode {
            AddressMode::Dhcp => format!("{} on {} (DHCP)", self.name, self.adapter),
            AddressMode::Static => format!(
                "{} on {} ({}/{})",
                self.name, self.adapter, self.ip, self.subnet
            ),
        }
    }
}

/// Persisted shape of a profile, keyed by name in the profiles document.
///
/// Fields missing from older documents fall back to defaults here and are
/// judged later by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Adapter name.
    pub adapter: String,
    /// Addressing mode (absent = static).
    #[serde(default)]
    pub mode: AddressMode,
    /// IPv4 address.
    #[serde(default)]
    pub ip: String,
    /// Subnet mask.
    #[serde(default)]
    pub subnet: String,
    /// Gateway, empty when unset.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub gateway: String,
    /// DNS servers, null when unset.
    #[serde(default)]
    pub dns: Option<Vec<String>>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
