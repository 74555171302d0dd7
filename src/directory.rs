// Netprofile - Adapter Directory
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Adapter discovery.
//!
//! Every call queries the provider again; nothing is cached, so the result
//! always reflects the adapters present right now.

use tracing::{debug, error};

use crate::backend::{NetworkConfigProvider, ProviderError};
use crate::models::{AdapterInfo, Error, Result};

/// Read-only view of the adapters known to the system.
pub struct AdapterDirectory<'a, P: NetworkConfigProvider + ?Sized> {
    provider: &'a P,
}

impl<'a, P: NetworkConfigProvider + ?Sized> AdapterDirectory<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// List adapters with their state columns.
    ///
    /// A missing tool is reported as [`Error::ProviderUnavailable`]; any other
    /// listing failure as [`Error::DirectoryUnavailable`].
    pub fn describe_adapters(&self) -> Result<Vec<AdapterInfo>> {
        match self.provider.list_adapters() {
            Ok(adapters) => {
                debug!("Found {} adapter(s)", adapters.len());
                Ok(adapters)
            }
            Err(ProviderError::CommandNotFound(program)) => {
                error!("Configuration tool not found: {}", program);
                Err(Error::ProviderUnavailable(program))
            }
            Err(e) => {
                error!("Failed to list adapters: {}", e);
                Err(Error::DirectoryUnavailable(e.to_string()))
            }
        }
    }

    /// List adapter names, possibly empty.
    pub fn list_adapters(&self) -> Result<Vec<String>> {
        Ok(self
            .describe_adapters()?
            .into_iter()
            .map(|a| a.name)
            .collect())
    }

    /// List adapters for a choice the operator must make.
    ///
    /// An empty list is an error here: nothing can be selected.
    pub fn require_adapters(&self) -> Result<Vec<AdapterInfo>> {
        let adapters = self.describe_adapters()?;
        if adapters.is_empty() {
            return Err(Error::DirectoryUnavailable(
                "no network adapters found".to_string(),
            ));
        }
        Ok(adapters)
    }
}
