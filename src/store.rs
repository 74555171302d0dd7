// Netprofile - Profile Store
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! In-memory profile collection keyed by name.
//!
//! Profiles are only ever added or replaced as a whole; there is no partial
//! update. Listing order is insertion order, and overwriting a profile keeps
//! its original position.

use indexmap::IndexMap;
use tracing::debug;

use crate::models::validation::validate_profile_name;
use crate::models::{Error, Profile, Result};

/// Name-keyed profile collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileStore {
    profiles: IndexMap<String, Profile>,
    dirty: bool,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a loaded mapping. The result is clean.
    pub fn from_profiles(profiles: IndexMap<String, Profile>) -> Self {
        Self {
            profiles,
            dirty: false,
        }
    }

    /// Get a profile by name.
    pub fn get(&self, name: &str) -> Result<&Profile> {
        self.profiles
            .get(name)
            .ok_or_else(|| Error::ProfileNotFound(name.to_string()))
    }

    /// Insert or replace the profile stored under `name`.
    ///
    /// The profile's own name is set to `name`. Returns the replaced profile.
    pub fn upsert(&mut self, name: &str, mut profile: Profile) -> Result<Option<Profile>> {
        let name = validate_profile_name(name)?;
        profile.name = name.clone();
        let previous = self.profiles.insert(name.clone(), profile);
        self.dirty = true;
        let action = if previous.is_some() {
            "Replaced"
        } else {
            "Added"
        };
        debug!("{} profile '{}'", action, name);
        Ok(previous)
    }

    /// Point a stored profile at another adapter.
    pub fn rebind(&mut self, name: &str, adapter: &str) -> Result<()> {
        let profile = self
            .profiles
            .get_mut(name)
            .ok_or_else(|| Error::ProfileNotFound(name.to_string()))?;
        profile.rebind(adapter);
        self.dirty = true;
        Ok(())
    }

    /// All profiles in listing order.
    pub fn all(&self) -> &IndexMap<String, Profile> {
        &self.profiles
    }

    /// Profile names in listing order.
    pub fn names(&self) -> Vec<String> {
        self.profiles.keys().cloned().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Whether the store changed since it was loaded or last saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AddressMode;

    fn office() -> Profile {
        Profile::new_static(
            "office",
            "Ethernet",
            "192.168.1.50",
            None,
            Some("192.168.1.1"),
            vec![],
        )
    }

    #[test]
    fn test_get_missing() {
        let store = ProfileStore::new();
        assert!(matches!(store.get("office"), Err(Error::ProfileNotFound(_))));
    }

    #[test]
    fn test_upsert_rejects_empty_name() {
        let mut store = ProfileStore::new();
        assert!(store.upsert("  ", office()).is_err());
        assert!(store.is_empty());
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_upsert_overwrites_in_place() {
        let mut store = ProfileStore::new();
        store.upsert("office", office()).expect("insert");
        store
            .upsert("home", Profile::new_dhcp("home", "Wi-Fi"))
            .expect("insert");
        let previous = store
            .upsert("office", Profile::new_dhcp("ignored", "Ethernet 2"))
            .expect("overwrite");

        assert_eq!(previous, Some(office()));
        assert_eq!(store.names(), vec!["office", "home"]);
        let replaced = store.get("office").expect("present");
        assert_eq!(replaced.name, "office");
        assert_eq!(replaced.mode, AddressMode::Dhcp);
    }

    #[test]
    fn test_rebind_marks_dirty() {
        let profiles = IndexMap::from([("office".to_string(), office())]);
        let mut store = ProfileStore::from_profiles(profiles);
        assert!(!store.is_dirty());
        store.rebind("office", "Ethernet 3").expect("rebind");
        assert_eq!(store.get("office").expect("present").adapter, "Ethernet 3");
        assert!(store.is_dirty());
        store.mark_saved();
        assert!(!store.is_dirty());
    }
}
