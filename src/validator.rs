// Netprofile - Profile Validator
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Profile validation against the current adapter list.
//!
//! Validation has two tiers. Broken data (empty name, missing or malformed
//! address fields) makes a profile structurally invalid. A profile whose
//! adapter is simply not present right now is still usable: it only needs
//! to be rebound to another adapter.

use crate::models::validation::{validate_dns_server, validate_ipv4, validate_subnet_mask};
use crate::models::{AddressMode, Profile};

/// Result of validating a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// Ready to plan against its adapter.
    Valid,
    /// Well-formed, but its adapter is not currently listed.
    AdapterMissing,
    /// Broken data; must be fixed by the operator.
    StructurallyInvalid(String),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Stateless profile validator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProfileValidator;

impl ProfileValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate `profile` against `adapters`, structural rules first.
    pub fn validate(&self, profile: &Profile, adapters: &[String]) -> ValidationOutcome {
        if let Err(reason) = self.check_structure(profile) {
            return ValidationOutcome::StructurallyInvalid(reason);
        }
        if !adapters.iter().any(|a| a == &profile.adapter) {
            return ValidationOutcome::AdapterMissing;
        }
        ValidationOutcome::Valid
    }

    /// Structural rules only; no adapter lookup.
    pub fn check_structure(&self, profile: &Profile) -> Result<(), String> {
        if profile.name.trim().is_empty() {
            return Err("profile name is empty".to_string());
        }
        if profile.mode == AddressMode::Dhcp {
            return Ok(());
        }

        if profile.ip.trim().is_empty() {
            return Err(format!("profile '{}' has no IP address", profile.name));
        }
        if profile.subnet.trim().is_empty() {
            return Err(format!("profile '{}' has no subnet mask", profile.name));
        }
        validate_ipv4(&profile.ip).map_err(|e| e.to_string())?;
        validate_subnet_mask(&profile.subnet).map_err(|e| e.to_string())?;
        if let Some(gateway) = &profile.gateway {
            validate_ipv4(gateway).map_err(|e| format!("gateway: {}", e))?;
        }
        for dns in &profile.dns {
            validate_dns_server(dns).map_err(|e| e.to_string())?;
        }
        Ok(())
    }
}
