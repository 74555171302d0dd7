// Netprofile - Profile Application Engine
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! The apply flow: validate, rebind if needed, plan, execute.
//!
//! When a stored profile names an adapter that is no longer listed, the
//! operator is asked for a replacement from the current adapters. The stored
//! profile is only changed once a replacement has actually been chosen.

use tracing::{info, warn};

use crate::backend::NetworkConfigProvider;
use crate::directory::AdapterDirectory;
use crate::executor::ApplicationExecutor;
use crate::models::{AdapterInfo, ApplicationResult, Error, Profile, Result};
use crate::planner::ApplicationPlanner;
use crate::store::ProfileStore;
use crate::validator::{ProfileValidator, ValidationOutcome};

/// Source of operator decisions during rebinding.
pub trait AdapterSelector {
    /// Choose a replacement for the missing adapter of `profile` from
    /// `adapters`. `None` cancels the application.
    fn select_replacement(
        &mut self,
        profile: &Profile,
        adapters: &[AdapterInfo],
    ) -> Option<String>;
}

/// A selector that always answers with the same adapter.
#[derive(Debug, Clone, Default)]
pub struct FixedSelector(pub Option<String>);

impl AdapterSelector for FixedSelector {
    fn select_replacement(
        &mut self,
        _profile: &Profile,
        _adapters: &[AdapterInfo],
    ) -> Option<String> {
        self.0.clone()
    }
}

/// Outcome of applying a stored profile.
#[derive(Debug, Clone)]
pub struct AppliedProfile {
    pub adapter: String,
    /// Adapter the profile pointed at before it was rebound.
    pub rebound_from: Option<String>,
    pub result: ApplicationResult,
}

/// Applies profiles through a configuration provider.
pub struct ApplicationEngine<'a, P: NetworkConfigProvider + ?Sized> {
    provider: &'a P,
    validator: ProfileValidator,
    planner: ApplicationPlanner,
}

impl<'a, P: NetworkConfigProvider + ?Sized> ApplicationEngine<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self {
            provider,
            validator: ProfileValidator::new(),
            planner: ApplicationPlanner::new(),
        }
    }

    /// Apply the stored profile `name`.
    pub fn apply_profile(
        &self,
        store: &mut ProfileStore,
        name: &str,
        selector: &mut dyn AdapterSelector,
    ) -> Result<AppliedProfile> {
        let profile = store.get(name)?.clone();
        let adapters = AdapterDirectory::new(self.provider).describe_adapters()?;
        let names: Vec<String> = adapters.iter().map(|a| a.name.clone()).collect();

        let mut rebound_from = None;
        let adapter = match self.validator.validate(&profile, &names) {
            ValidationOutcome::Valid => profile.adapter.clone(),
            ValidationOutcome::StructurallyInvalid(reason) => {
                return Err(Error::InvalidProfile(reason));
            }
            ValidationOutcome::AdapterMissing => {
                warn!(
                    "Adapter '{}' of profile '{}' not found",
                    profile.adapter, profile.name
                );
                if adapters.is_empty() {
                    return Err(Error::DirectoryUnavailable(
                        "no network adapters found".to_string(),
                    ));
                }
                let replacement = selector
                    .select_replacement(&profile, &adapters)
                    .ok_or_else(|| Error::RebindCancelled(profile.name.clone()))?;
                if !names.contains(&replacement) {
                    return Err(Error::AdapterMissing {
                        profile: profile.name.clone(),
                        adapter: replacement,
                    });
                }
                store.rebind(name, &replacement)?;
                info!(
                    "Profile '{}' rebound from '{}' to '{}'",
                    profile.name, profile.adapter, replacement
                );
                rebound_from = Some(profile.adapter.clone());
                replacement
            }
        };

        let plan = self.planner.plan(&profile, &adapter);
        info!(
            "Applying profile '{}' to '{}' ({} operations)",
            profile.name,
            adapter,
            plan.len()
        );
        let mut result = ApplicationExecutor::new(self.provider).execute(&plan)?;
        result.profile = Some(profile.name);

        Ok(AppliedProfile {
            adapter,
            rebound_from,
            result,
        })
    }

    /// Switch `adapter` to DHCP for address and DNS, without a profile.
    pub fn apply_dhcp(&self, adapter: &str) -> Result<ApplicationResult> {
        let names = AdapterDirectory::new(self.provider).list_adapters()?;
        if !names.iter().any(|n| n == adapter) {
            return Err(Error::AdapterNotFound(adapter.to_string()));
        }
        info!("Switching '{}' to DHCP", adapter);
        let plan = self.planner.plan_dhcp(adapter);
        ApplicationExecutor::new(self.provider).execute(&plan)
    }
}
