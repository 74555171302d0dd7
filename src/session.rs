// Netprofile - Session Context
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Operator session state.
//!
//! A session owns everything that would otherwise be process-wide: the
//! settings, the configuration provider, the profile repository and the
//! in-memory profile store. It is built once at startup and handed to the
//! command or menu that drives it.

use tracing::{error, info, warn};

use crate::backend::NetworkConfigProvider;
use crate::directory::AdapterDirectory;
use crate::engine::{AdapterSelector, AppliedProfile, ApplicationEngine};
use crate::models::{AdapterInfo, AppConfig, ApplicationResult, Error, Profile, Result};
use crate::storage::{ProfileRepository, RejectedEntry};
use crate::store::ProfileStore;
use crate::validator::ProfileValidator;

/// Result of applying a stored profile within a session.
#[derive(Debug)]
pub struct SessionApply {
    pub applied: AppliedProfile,
    /// Set when the profile was rebound but saving the change failed.
    pub save_error: Option<Error>,
}

/// One operator session.
pub struct Session<P: NetworkConfigProvider> {
    config: AppConfig,
    provider: P,
    repository: Box<dyn ProfileRepository>,
    store: ProfileStore,
    rejected: Vec<RejectedEntry>,
    load_error: Option<String>,
    /// The stored document could not be read and must be copied aside
    /// before the first save replaces it.
    backup_pending: bool,
}

impl<P: NetworkConfigProvider> Session<P> {
    /// Open a session, loading profiles from `repository`.
    ///
    /// A failed load is reported through [`Session::load_error`] and the
    /// session starts with an empty store. The unreadable document is backed
    /// up by the first save.
    pub fn open(config: AppConfig, provider: P, repository: Box<dyn ProfileRepository>) -> Self {
        let (store, rejected, load_error) = match repository.load() {
            Ok(report) => (
                ProfileStore::from_profiles(report.profiles),
                report.rejected,
                None,
            ),
            Err(e) => {
                error!("Failed to load profiles: {}", e);
                (ProfileStore::new(), Vec::new(), Some(e.to_string()))
            }
        };
        let backup_pending = load_error.is_some();
        Self {
            config,
            provider,
            repository,
            store,
            rejected,
            load_error,
            backup_pending,
        }
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    /// Entries skipped while loading.
    pub fn rejected(&self) -> &[RejectedEntry] {
        &self.rejected
    }

    /// Why loading failed, if it did.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Current adapters with their state.
    pub fn adapters(&self) -> Result<Vec<AdapterInfo>> {
        AdapterDirectory::new(&self.provider).describe_adapters()
    }

    /// Current adapters, failing when there is nothing to choose from.
    pub fn selectable_adapters(&self) -> Result<Vec<AdapterInfo>> {
        AdapterDirectory::new(&self.provider).require_adapters()
    }

    /// Add or replace a profile after checking its structure.
    pub fn add_profile(&mut self, profile: Profile) -> Result<Option<Profile>> {
        ProfileValidator::new()
            .check_structure(&profile)
            .map_err(Error::InvalidProfile)?;
        let name = profile.name.clone();
        self.store.upsert(&name, profile)
    }

    /// Write the store to the repository. The store is kept either way.
    ///
    /// After a failed load the unreadable document is backed up first; if
    /// that fails nothing is written.
    pub fn save(&mut self) -> Result<()> {
        if self.backup_pending {
            let copy = self.repository.backup().map_err(|e| {
                error!("Not replacing unreadable profiles: {}", e);
                e
            })?;
            if let Some(path) = copy {
                warn!("Unreadable profiles document kept as {:?}", path);
            }
            self.backup_pending = false;
        }
        match self.repository.save(self.store.all()) {
            Ok(()) => {
                self.store.mark_saved();
                Ok(())
            }
            Err(e) => {
                error!("Failed to save profiles: {}", e);
                Err(e)
            }
        }
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.store.is_dirty()
    }

    /// Apply the stored profile `name`, rebinding through `selector` if needed.
    pub fn apply(
        &mut self,
        name: &str,
        selector: &mut dyn AdapterSelector,
    ) -> Result<SessionApply> {
        let engine = ApplicationEngine::new(&self.provider);
        let applied = engine.apply_profile(&mut self.store, name, selector)?;

        let mut save_error = None;
        if applied.rebound_from.is_some() && self.config.save_on_rebind {
            if let Err(e) = self.save() {
                warn!("Rebinding of '{}' kept in memory only", name);
                save_error = Some(e);
            }
        }
        info!("{}: {}", name, applied.result.message);
        Ok(SessionApply {
            applied,
            save_error,
        })
    }

    /// Switch `adapter` to DHCP without a profile.
    pub fn apply_dhcp(&self, adapter: &str) -> Result<ApplicationResult> {
        ApplicationEngine::new(&self.provider).apply_dhcp(adapter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::testing::FakeProvider;
    use crate::engine::FixedSelector;
    use crate::storage::{backup_file_for, JsonProfileRepository, LoadReport};
    use indexmap::IndexMap;
    use std::fs;
    use std::path::PathBuf;

    struct BrokenRepository;

    impl ProfileRepository for BrokenRepository {
        fn load(&self) -> Result<LoadReport> {
            Err(Error::PersistenceFailed("disk unplugged".into()))
        }

        fn save(&self, _profiles: &IndexMap<String, Profile>) -> Result<()> {
            Err(Error::PersistenceFailed("disk unplugged".into()))
        }

        fn backup(&self) -> Result<Option<PathBuf>> {
            Err(Error::PersistenceFailed("disk unplugged".into()))
        }
    }

    const BROKEN_DOCUMENT: &str = r#"{"home": {"adapter": "Wi-Fi", "mode": "dhcp"},}"#;

    fn office(adapter: &str) -> Profile {
        Profile::new_static("office", adapter, "192.168.1.50", None, None, vec![])
    }

    #[test]
    fn test_add_and_save() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("profiles.json");
        let provider = FakeProvider::with_adapters(&["Ethernet"]);
        let mut session = Session::open(
            AppConfig::default(),
            provider,
            Box::new(JsonProfileRepository::new(&path)),
        );

        let replaced = session.add_profile(office("Ethernet")).expect("add");
        assert!(replaced.is_none());
        assert!(session.has_unsaved_changes());
        session.save().expect("save");
        assert!(!session.has_unsaved_changes());

        let reopened = Session::open(
            AppConfig::default(),
            FakeProvider::with_adapters(&[]),
            Box::new(JsonProfileRepository::new(&path)),
        );
        assert_eq!(
            reopened.store().get("office").expect("present"),
            &office("Ethernet")
        );
    }

    #[test]
    fn test_add_rejects_invalid_profile() {
        let mut session = Session::open(
            AppConfig::default(),
            FakeProvider::with_adapters(&["Ethernet"]),
            Box::new(BrokenRepository),
        );
        let mut profile = office("Ethernet");
        profile.ip = "not an address".into();
        assert!(matches!(
            session.add_profile(profile),
            Err(Error::InvalidProfile(_))
        ));
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_load_failure_keeps_session_usable() {
        let mut session = Session::open(
            AppConfig::default(),
            FakeProvider::with_adapters(&["Ethernet"]),
            Box::new(BrokenRepository),
        );
        assert!(session.load_error().is_some());
        session.add_profile(office("Ethernet")).expect("add");

        assert!(matches!(session.save(), Err(Error::PersistenceFailed(_))));
        assert!(session.has_unsaved_changes());
        assert!(session.store().contains("office"));
    }

    #[test]
    fn test_unreadable_document_is_backed_up_before_save() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("profiles.json");
        fs::write(&path, BROKEN_DOCUMENT).expect("write document");

        let mut session = Session::open(
            AppConfig::default(),
            FakeProvider::with_adapters(&["Wi-Fi"]),
            Box::new(JsonProfileRepository::new(&path)),
        );
        assert!(session.load_error().is_some());
        assert!(session.store().is_empty());

        session
            .add_profile(Profile::new_dhcp("cafe", "Wi-Fi"))
            .expect("add");
        session.save().expect("save");

        let backup = backup_file_for(&path);
        let kept = fs::read_to_string(&backup).expect("backup");
        assert_eq!(kept, BROKEN_DOCUMENT);
        let saved = JsonProfileRepository::new(&path).load().expect("load");
        assert_eq!(saved.profiles.keys().collect::<Vec<_>>(), vec!["cafe"]);

        // Later saves replace the new document, not the backup
        session
            .add_profile(Profile::new_dhcp("library", "Wi-Fi"))
            .expect("add");
        session.save().expect("save");
        let kept = fs::read_to_string(&backup).expect("backup");
        assert_eq!(kept, BROKEN_DOCUMENT);
    }

    #[test]
    fn test_failed_backup_keeps_document() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("profiles.json");
        fs::write(&path, BROKEN_DOCUMENT).expect("write document");
        // A directory in the way makes the copy fail
        fs::create_dir(backup_file_for(&path)).expect("block backup");

        let mut session = Session::open(
            AppConfig::default(),
            FakeProvider::with_adapters(&["Wi-Fi"]),
            Box::new(JsonProfileRepository::new(&path)),
        );
        session
            .add_profile(Profile::new_dhcp("cafe", "Wi-Fi"))
            .expect("add");

        assert!(matches!(session.save(), Err(Error::PersistenceFailed(_))));
        let document = fs::read_to_string(&path).expect("document");
        assert_eq!(document, BROKEN_DOCUMENT);
        assert!(session.has_unsaved_changes());
    }

    #[test]
    fn test_rebind_is_saved() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("profiles.json");
        let repo = JsonProfileRepository::new(&path);
        let mut seed = IndexMap::new();
        seed.insert("office".to_string(), office("Ethernet"));
        repo.save(&seed).expect("seed");

        let mut session = Session::open(
            AppConfig::default(),
            FakeProvider::with_adapters(&["Ethernet 2"]),
            Box::new(JsonProfileRepository::new(&path)),
        );
        let outcome = session
            .apply("office", &mut FixedSelector(Some("Ethernet 2".into())))
            .expect("apply");

        assert!(outcome.save_error.is_none());
        assert!(!session.has_unsaved_changes());
        let reloaded = repo.load().expect("reload");
        assert_eq!(reloaded.profiles["office"].adapter, "Ethernet 2");
    }

    #[test]
    fn test_rebind_save_failure_is_reported() {
        let mut session = Session::open(
            AppConfig::default(),
            FakeProvider::with_adapters(&["Ethernet 2"]),
            Box::new(BrokenRepository),
        );
        session.add_profile(office("Ethernet")).expect("add");

        let outcome = session
            .apply("office", &mut FixedSelector(Some("Ethernet 2".into())))
            .expect("apply");
        assert!(outcome.applied.result.is_success());
        assert!(matches!(
            outcome.save_error,
            Some(Error::PersistenceFailed(_))
        ));
        let office = session.store().get("office").expect("present");
        assert_eq!(office.adapter, "Ethernet 2");
    }

    #[test]
    fn test_rebind_without_autosave() {
        let config = AppConfig {
            save_on_rebind: false,
            ..AppConfig::default()
        };
        let mut session = Session::open(
            config,
            FakeProvider::with_adapters(&["Ethernet 2"]),
            Box::new(BrokenRepository),
        );
        session.add_profile(office("Ethernet")).expect("add");
        let outcome = session
            .apply("office", &mut FixedSelector(Some("Ethernet 2".into())))
            .expect("apply");
        assert!(outcome.save_error.is_none());
        assert!(session.has_unsaved_changes());
    }
}
