// Netprofile - Test Provider
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! In-memory provider that records calls and fails on request.

use std::cell::RefCell;
use std::collections::HashMap;

use super::{DnsSource, NetworkConfigProvider, ProviderError, ProviderResult};
use crate::models::{AdapterInfo, AdapterType};

/// Records every call as a short string, e.g. `"primary_dns Ethernet 8.8.8.8"`.
pub struct FakeProvider {
    adapters: RefCell<ProviderResult<Vec<AdapterInfo>>>,
    failures: RefCell<HashMap<usize, ProviderError>>,
    calls: RefCell<Vec<String>>,
}

impl FakeProvider {
    pub fn with_adapters(names: &[&str]) -> Self {
        let adapters = names
            .iter()
            .map(|n| {
                let mut info = AdapterInfo::new(*n, AdapterType::Dedicated);
                info.admin_state = "Enabled".into();
                info.state = "Connected".into();
                info
            })
            .collect();
        Self {
            adapters: RefCell::new(Ok(adapters)),
            failures: RefCell::new(HashMap::new()),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Make adapter listing fail.
    pub fn failing_listing(error: ProviderError) -> Self {
        let fake = Self::with_adapters(&[]);
        *fake.adapters.borrow_mut() = Err(error);
        fake
    }

    /// Make the configuration call with this 0-based position fail.
    /// Listing calls are not counted.
    pub fn fail_call(&self, position: usize, error: ProviderError) {
        self.failures.borrow_mut().insert(position, error);
    }

    pub fn rejected(diagnostic: &str) -> ProviderError {
        ProviderError::CommandFailed {
            command: "netsh".into(),
            code: Some(1),
            diagnostic: diagnostic.into(),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) -> ProviderResult<()> {
        let position = self.calls.borrow().len();
        self.calls.borrow_mut().push(call);
        match self.failures.borrow_mut().remove(&position) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl NetworkConfigProvider for FakeProvider {
    fn list_adapters(&self) -> ProviderResult<Vec<AdapterInfo>> {
        self.adapters.borrow().clone()
    }

    fn set_static_address(
        &self,
        adapter: &str,
        ip: &str,
        subnet: &str,
        gateway: Option<&str>,
    ) -> ProviderResult<()> {
        self.record(format!(
            "static_address {} {} {} {}",
            adapter,
            ip,
            subnet,
            gateway.unwrap_or("-")
        ))
    }

    fn set_dhcp_address(&self, adapter: &str) -> ProviderResult<()> {
        self.record(format!("dhcp_address {}", adapter))
    }

    fn set_dns_source(&self, adapter: &str, source: DnsSource) -> ProviderResult<()> {
        match source {
            DnsSource::Dhcp => self.record(format!("dns_dhcp {}", adapter)),
        }
    }

    fn set_primary_dns(&self, adapter: &str, dns: &str) -> ProviderResult<()> {
        self.record(format!("primary_dns {} {}", adapter, dns))
    }

    fn add_secondary_dns(&self, adapter: &str, dns: &str, index: u32) -> ProviderResult<()> {
        self.record(format!("secondary_dns {} {} {}", adapter, dns, index))
    }
}
