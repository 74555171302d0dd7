// Netprofile - Data Model
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! # Netprofile Data Model
//!
//! Shared types used across the profile engine:
//!
//! - **Profile**: A named IPv4 configuration bound to an adapter
//! - **Operation**: One atomic configuration step
//! - **Adapter**: An adapter as listed by the configuration tool
//! - **Result**: Per-step outcomes of applying a plan
//! - **Error**: Shared error types
//!
//! ## Design Principles
//!
//! 1. **Idempotent**: Plans can be applied repeatedly with the same end state
//! 2. **Ordered**: Addressing is changed before DNS, primary DNS before secondaries
//! 3. **Serializable**: Profiles persist as a name-keyed JSON document

pub mod adapter;
pub mod config;
pub mod error;
pub mod operation;
pub mod profile;
pub mod result;
pub mod validation;

pub use adapter::{AdapterInfo, AdapterType};
pub use config::AppConfig;
pub use error::{Error, Result};
pub use operation::Operation;
pub use profile::{AddressMode, Profile, ProfileRecord};
pub use result::{ApplicationResult, FailureReason, OperationOutcome};

/// Subnet mask used when none is given at profile creation.
pub const DEFAULT_SUBNET_MASK: &str = "255.255.255.0";

/// Configuration directory name (under the platform config dir).
pub const CONFIG_DIR_NAME: &str = "netprofile";

/// Settings file name inside the configuration directory.
pub const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Default profiles document name inside the configuration directory.
pub const PROFILES_FILE_NAME: &str = "profiles.json";

/// Suffix of the copy kept when an unreadable profiles document is replaced.
pub const BACKUP_SUFFIX: &str = ".bak";

/// First DNS index used for secondary servers; index 1 is the primary slot.
pub const FIRST_SECONDARY_DNS_INDEX: u32 = 2;
