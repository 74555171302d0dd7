// Netprofile - Application Planner
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Turns a validated profile into an ordered list of operations.
//!
//! Static plans set the address first, then DNS. A non-empty DNS list is
//! always preceded by a reset to DHCP so that servers from an earlier static
//! list cannot survive as stray secondary entries. DHCP plans release the
//! address before resetting DNS.

use crate::models::{AddressMode, Operation, Profile, FIRST_SECONDARY_DNS_INDEX};

/// Stateless plan builder.
#[derive(Debug, Default, Clone, Copy)]
pub struct ApplicationPlanner;

impl ApplicationPlanner {
    pub fn new() -> Self {
        Self
    }

    /// Plan `profile` against `adapter`. The profile's own adapter is ignored
    /// so that a rebound adapter can be planned before it is stored.
    pub fn plan(&self, profile: &Profile, adapter: &str) -> Vec<Operation> {
        match profile.mode {
            AddressMode::Dhcp => self.plan_dhcp(adapter),
            AddressMode::Static => self.plan_static(profile, adapter),
        }
    }

    /// Plan a switch of `adapter` to DHCP for both address and DNS.
    pub fn plan_dhcp(&self, adapter: &str) -> Vec<Operation> {
        vec![
            Operation::SetDhcpAddress {
                adapter: adapter.to_string(),
            },
            Operation::SetDnsDhcp {
                adapter: adapter.to_string(),
            },
        ]
    }

    fn plan_static(&self, profile: &Profile, adapter: &str) -> Vec<Operation> {
        let adapter = adapter.to_string();
        let mut plan = Vec::with_capacity(profile.dns.len() + 2);

        plan.push(Operation::SetStaticAddress {
            adapter: adapter.clone(),
            ip: profile.ip.clone(),
            subnet: profile.subnet.clone(),
            gateway: profile.gateway.clone().unwrap_or_default(),
        });

        let Some((primary, secondaries)) = profile.dns.split_first() else {
            plan.push(Operation::SetDnsDhcp { adapter });
            return plan;
        };

        plan.push(Operation::ClearDnsToDhcp {
            adapter: adapter.clone(),
        });
        plan.push(Operation::SetPrimaryDns {
            adapter: adapter.clone(),
            dns: primary.clone(),
        });
        for (index, dns) in (FIRST_SECONDARY_DNS_INDEX..).zip(secondaries) {
            plan.push(Operation::AddSecondaryDns {
                adapter: adapter.clone(),
                dns: dns.clone(),
                index,
            });
        }
        plan
    }
}
