// Netprofile - Validation Utilities
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Input validation utilities for profile fields.

use std::net::Ipv4Addr;
use std::str::FromStr;

use super::error::{Error, Result};

/// Parse a dotted-quad IPv4 address.
pub fn validate_ipv4(s: &str) -> Result<Ipv4Addr> {
    Ipv4Addr::from_str(s.trim()).map_err(|_| Error::InvalidIpAddress(s.to_string()))
}

/// Validate a dotted subnet mask: IPv4 syntax with contiguous leading ones.
pub fn validate_subnet_mask(s: &str) -> Result<Ipv4Addr> {
    let mask = Ipv4Addr::from_str(s.trim()).map_err(|_| Error::InvalidSubnetMask(s.to_string()))?;
    let bits = u32::from(mask);
    // Contiguous iff the inverted mask is 2^k - 1
    let inverted = !bits;
    if inverted & inverted.wrapping_add(1) != 0 {
        return Err(Error::InvalidSubnetMask(format!(
            "{} (mask bits are not contiguous)",
            s
        )));
    }
    Ok(mask)
}

/// Prefix length of a validated subnet mask.
pub fn prefix_length(mask: Ipv4Addr) -> u32 {
    u32::from(mask).count_ones()
}

/// Parse a DNS server entry (IPv4 only).
pub fn validate_dns_server(s: &str) -> Result<Ipv4Addr> {
    validate_ipv4(s).map_err(|_| Error::InvalidDnsServer(s.to_string()))
}

/// Trim and check a profile name (non-empty, at most 100 bytes).
pub fn validate_profile_name(s: &str) -> Result<String> {
    let s = s.trim();
    if s.is_empty() {
        return Err(Error::ValidationFailed(
            "Profile name cannot be empty".to_string(),
        ));
    }
    if s.len() > 100 {
        return Err(Error::ValidationFailed(
            "Profile name must be 100 characters or less".to_string(),
        ));
    }
    Ok(s.to_string())
}

/// Split a comma-separated DNS list, dropping blanks.
pub fn parse_dns_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect()
}
