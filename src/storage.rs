// Netprofile - Local Storage
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Local data storage.
//!
//! Handles:
//! - Locating the configuration directory and settings file
//! - Loading application settings
//! - Loading and saving the profiles document
//!
//! The profiles document is a JSON object keyed by profile name. Entries
//! that fail to parse are reported individually and skipped; they never
//! abort the load.

use indexmap::IndexMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::models::{
    AppConfig, Error, Profile, ProfileRecord, Result, BACKUP_SUFFIX, CONFIG_DIR_NAME,
    PROFILES_FILE_NAME, SETTINGS_FILE_NAME,
};

/// Default configuration directory (`<platform config dir>/netprofile`).
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// Default settings file location.
pub fn default_settings_file() -> PathBuf {
    default_config_dir().join(SETTINGS_FILE_NAME)
}

/// Resolve the profiles document location for a configuration.
pub fn profiles_file_for(config: &AppConfig, settings_file: &Path) -> PathBuf {
    match &config.profiles_file {
        Some(path) => path.clone(),
        None => settings_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(default_config_dir)
            .join(PROFILES_FILE_NAME),
    }
}

/// Where an unreadable profiles document is copied before it is replaced.
pub fn backup_file_for(profiles_file: &Path) -> PathBuf {
    let mut name = profiles_file.as_os_str().to_owned();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Load settings, falling back to defaults when the file is missing or broken.
///
/// A missing file is created with the defaults so it can be edited.
pub fn load_settings(path: &Path) -> AppConfig {
    if !path.exists() {
        info!("No settings file at {:?}, writing defaults", path);
        let config = AppConfig::default();
        if let Err(e) = config.save_to_file(path) {
            warn!("Could not write default settings: {}", e);
        }
        return config;
    }
    match AppConfig::load_from_file(path) {
        Ok(config) => {
            info!("Loaded settings from {:?}", path);
            config
        }
        Err(e) => {
            warn!("Ignoring unreadable settings file: {}", e);
            AppConfig::default()
        }
    }
}

/// A profile entry that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedEntry {
    pub name: String,
    pub reason: String,
}

/// Outcome of loading the profiles document.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub profiles: IndexMap<String, Profile>,
    pub rejected: Vec<RejectedEntry>,
}

/// Persistence for the profile mapping.
pub trait ProfileRepository {
    /// Load every profile. A missing document is an empty mapping.
    fn load(&self) -> Result<LoadReport>;

    /// Replace the stored document with `profiles`.
    fn save(&self, profiles: &IndexMap<String, Profile>) -> Result<()>;

    /// Copy the stored document aside, returning where the copy went.
    /// `None` when there is nothing stored.
    fn backup(&self) -> Result<Option<PathBuf>>;
}

/// Profiles stored as a pretty-printed JSON document.
#[derive(Debug, Clone)]
pub struct JsonProfileRepository {
    path: PathBuf,
}

impl JsonProfileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn persistence_error(&self, action: &str, e: impl std::fmt::Display) -> Error {
        Error::PersistenceFailed(format!("{} {:?}: {}", action, self.path, e))
    }
}

impl ProfileRepository for JsonProfileRepository {
    fn load(&self) -> Result<LoadReport> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No profiles file at {:?}, starting empty", self.path);
                return Ok(LoadReport::default());
            }
            Err(e) => return Err(self.persistence_error("Failed to open", e)),
        };

        let document: IndexMap<String, serde_json::Value> =
            serde_json::from_reader(BufReader::new(file))
                .map_err(|e| self.persistence_error("Failed to parse", e))?;

        let mut report = LoadReport::default();
        for (name, value) in document {
            if name.trim().is_empty() {
                warn!("Skipping profile with empty name");
                report.rejected.push(RejectedEntry {
                    name,
                    reason: "empty profile name".to_string(),
                });
                continue;
            }
            match serde_json::from_value::<ProfileRecord>(value) {
                Ok(record) => {
                    let profile = Profile::from_record(name.clone(), record);
                    report.profiles.insert(name, profile);
                }
                Err(e) => {
                    warn!("Skipping malformed profile '{}': {}", name, e);
                    report.rejected.push(RejectedEntry {
                        name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Loaded {} profile(s) from {:?} ({} rejected)",
            report.profiles.len(),
            self.path,
            report.rejected.len()
        );
        Ok(report)
    }

    fn save(&self, profiles: &IndexMap<String, Profile>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| self.persistence_error("Failed to create directory for", e))?;
        }

        let document: IndexMap<&str, ProfileRecord> = profiles
            .iter()
            .map(|(name, profile)| (name.as_str(), profile.to_record()))
            .collect();

        let file = File::create(&self.path).map_err(|e| {
            error!("Failed to create profiles file: {}", e);
            self.persistence_error("Failed to create", e)
        })?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600));
        }

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &document)
            .map_err(|e| self.persistence_error("Failed to write", e))?;
        writer
            .flush()
            .map_err(|e| self.persistence_error("Failed to write", e))?;

        info!("Saved {} profile(s) to {:?}", profiles.len(), self.path);
        Ok(())
    }

    fn backup(&self) -> Result<Option<PathBuf>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let target = backup_file_for(&self.path);
        fs::copy(&self.path, &target).map_err(|e| self.persistence_error("Failed to back up", e))?;
        info!("Copied {:?} to {:?}", self.path, target);
        Ok(Some(target))
    }
}
