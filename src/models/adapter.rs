// Netprofile - Adapter Information
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Network adapter information as reported by the configuration tool.
//!
//! Adapters are never cached: every lookup re-queries the system, so an
//! `AdapterInfo` only describes the adapter at the moment it was listed.

use serde::{Deserialize, Serialize};

/// Adapter kind, from the "Type" column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdapterType {
    /// Physical (dedicated) adapter.
    Dedicated,
    /// Loopback interface.
    Loopback,
    /// Internal/virtual adapter.
    Internal,
    /// Unknown, including localized type names.
    Other,
}

impl AdapterType {
    /// Map the "Type" column of the interface table.
    pub fn from_column(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "dedicated" => Self::Dedicated,
            "loopback" => Self::Loopback,
            "internal" => Self::Internal,
            _ => Self::Other,
        }
    }

    /// Label shown in adapter listings.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Dedicated => "Dedicated",
            Self::Loopback => "Loopback",
            Self::Internal => "Internal",
            Self::Other => "Network",
        }
    }
}

/// One adapter row from the interface table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterInfo {
    /// Interface name (e.g., "Ethernet", "Wi-Fi 2").
    pub name: String,
    /// Kind of adapter.
    pub adapter_type: AdapterType,
    /// Administrative state column, verbatim.
    pub admin_state: String,
    /// Connection state column, verbatim.
    pub state: String,
}

impl AdapterInfo {
    pub fn new(name: impl Into<String>, adapter_type: AdapterType) -> Self {
        Self {
            name: name.into(),
            adapter_type,
            admin_state: String::new(),
            state: String::new(),
        }
    }

    /// Name plus connection state, for menus.
    pub fn display_label(&self) -> String {
        if self.state.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.state)
        }
    }
}
