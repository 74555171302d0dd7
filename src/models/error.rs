// Netprofile - Error Types
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Shared error types for the profile switcher.

use thiserror::Error;

/// Result type alias for netprofile operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for netprofile operations.
#[derive(Debug, Error)]
pub enum Error {
    // ========================================
    // Profile Errors
    // ========================================
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Adapter '{adapter}' referenced by profile '{profile}' is not available")]
    AdapterMissing { profile: String, adapter: String },

    #[error("Adapter not found: {0}")]
    AdapterNotFound(String),

    #[error("No replacement adapter selected for profile '{0}'")]
    RebindCancelled(String),

    // ========================================
    // Backend Errors
    // ========================================
    #[error("Adapter directory unavailable: {0}")]
    DirectoryUnavailable(String),

    #[error("Network configuration tool not available: {0}")]
    ProviderUnavailable(String),

    #[error("Operation failed on '{adapter}': {operation} - {reason}")]
    OperationFailed {
        operation: String,
        adapter: String,
        reason: String,
    },

    #[error("Administrator privileges are required to change network settings")]
    PrivilegeRequired,

    // ========================================
    // Validation Errors
    // ========================================
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid subnet mask: {0}")]
    InvalidSubnetMask(String),

    #[error("Invalid DNS server: {0}")]
    InvalidDnsServer(String),

    // ========================================
    // Storage Errors
    // ========================================
    #[error("Failed to persist profiles: {0}")]
    PersistenceFailed(String),

    #[error("Failed to read configuration: {0}")]
    ConfigReadFailed(String),

    #[error("Failed to write configuration: {0}")]
    ConfigWriteFailed(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParseFailed(String),

    // ========================================
    // System Errors
    // ========================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new operation failed error.
    pub fn operation_failed(
        operation: impl Into<String>,
        adapter: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::OperationFailed {
            operation: operation.into(),
            adapter: adapter.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error must end the whole session.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::PrivilegeRequired | Self::ProviderUnavailable(_))
    }
}

// Convert from toml parse errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigParseFailed(err.to_string())
    }
}

// Convert from toml serialize errors
impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::ConfigWriteFailed(err.to_string())
    }
}

// Profile documents are JSON; a broken one is a persistence problem
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::PersistenceFailed(err.to_string())
    }
}
