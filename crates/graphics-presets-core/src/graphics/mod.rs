//! Graphics presets: catalog, profile sync, and backup/restore
//!
//! [`GraphicsService`] is the surface the command layer talks to. It owns no
//! state of its own beyond the launcher paths and its two collaborators; the
//! catalog and backup state are read from disk on every call.
//!
//! Concurrent calls to the mutating operations are not guarded against;
//! callers serialize user-triggered preset changes.

mod backup;
mod catalog;
mod filter;
mod sync;

pub use backup::{BackupEngine, BackupOutcome, BackupState};
pub use catalog::{CatalogResolver, PresetEntry};
pub use filter::{extract_relevant_files, is_graphics_file, GRAPHICS_FILES};
pub use sync::SyncSummary;

use crate::config::{LauncherPaths, PreferenceKey, PreferenceStore};
use crate::error::Result;
use crate::profile::ProfileSource;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Result of a restore
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreSummary {
    /// Files copied from the snapshot into the live preset tree
    pub restored_files: usize,
    /// Preset that was re-applied to the profiles
    pub preset: String,
    /// Outcome of re-applying the preset
    pub sync: SyncSummary,
}

/// Graphics preset operations for one launcher installation
pub struct GraphicsService<S, P> {
    paths: LauncherPaths,
    preferences: S,
    profiles: P,
    catalog: CatalogResolver,
    backup: BackupEngine,
}

impl<S, P> GraphicsService<S, P>
where
    S: PreferenceStore,
    P: ProfileSource,
{
    pub fn new(paths: LauncherPaths, preferences: S, profiles: P) -> Self {
        let catalog = CatalogResolver::new(&paths);
        let backup = BackupEngine::new(&paths);
        Self {
            paths,
            preferences,
            profiles,
            catalog,
            backup,
        }
    }

    pub fn paths(&self) -> &LauncherPaths {
        &self.paths
    }

    pub fn preferences(&self) -> &S {
        &self.preferences
    }

    pub fn graphics_directory(&self) -> PathBuf {
        self.paths.graphics_directory()
    }

    // -------------------------------------------------------------------------
    // Catalog
    // -------------------------------------------------------------------------

    pub async fn list_mapped_presets(&self) -> Result<Vec<PresetEntry>> {
        self.catalog.list_mapped_presets().await
    }

    pub async fn list_unmapped_presets(&self, mapped: &[PresetEntry]) -> Result<Vec<PresetEntry>> {
        self.catalog.list_unmapped_presets(mapped).await
    }

    /// All presets, mapped first
    pub async fn catalog(&self) -> Result<Vec<PresetEntry>> {
        self.catalog.catalog().await
    }

    pub async fn is_valid_preset(&self, name: &str) -> Result<bool> {
        self.catalog.is_valid_preset(name).await
    }

    /// `real` name of the first catalog entry
    pub async fn default_preset(&self) -> Result<String> {
        self.catalog.default_preset().await
    }

    /// Whether the preset directory exists at all
    pub async fn graphics_exist(&self) -> Result<bool> {
        Ok(tokio::fs::try_exists(self.paths.graphics_directory()).await?)
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// The stored preset name, if any
    pub fn graphics_preference(&self) -> Result<Option<String>> {
        self.preferences.get_preference(PreferenceKey::Graphics)
    }

    pub fn set_graphics_preference(&self, name: &str) -> Result<()> {
        self.preferences.set_preference(PreferenceKey::Graphics, name)
    }

    /// The stored preset if it is still in the catalog, otherwise the default
    pub async fn resolve_preference(&self) -> Result<String> {
        if let Some(stored) = self.graphics_preference()? {
            if self.is_valid_preset(&stored).await? {
                return Ok(stored);
            }
            warn!("Stored graphics preset '{}' is no longer available", stored);
        }
        self.default_preset().await
    }

    /// Persist `name` as the active preset, then apply it to every profile.
    ///
    /// `name` is not checked against the catalog. An unknown name is still
    /// persisted before the sync fails with [`crate::Error::PresetNotFound`].
    pub async fn select_preset(&self, name: &str) -> Result<SyncSummary> {
        info!("Setting graphics to {}", name);
        self.set_graphics_preference(name)?;
        self.sync_preset_to_profiles(name).await
    }

    // -------------------------------------------------------------------------
    // Profile sync
    // -------------------------------------------------------------------------

    /// Full paths of the files in a preset directory
    pub async fn files_for_preset(&self, name: &str) -> Result<Vec<PathBuf>> {
        sync::files_in_preset(name, &self.paths.preset_directory(name)).await
    }

    /// Copy a preset's files into every active profile
    pub async fn sync_preset_to_profiles(&self, name: &str) -> Result<SyncSummary> {
        debug!("Updating profiles with graphics settings");
        let files = self.files_for_preset(name).await?;
        let profiles = self.profiles.active_profile_directories().await?;
        let summary = sync::copy_files_to_profiles(&files, &profiles).await?;
        debug!(
            "Copied {} files of '{}' into {} profiles",
            summary.files, name, summary.profiles
        );
        Ok(summary)
    }

    // -------------------------------------------------------------------------
    // Backup / restore
    // -------------------------------------------------------------------------

    pub fn backup_directory(&self) -> &Path {
        self.backup.backup_directory()
    }

    pub async fn backup_state(&self) -> Result<BackupState> {
        self.backup.state().await
    }

    pub async fn has_backup(&self) -> Result<bool> {
        Ok(self.backup_state().await? == BackupState::Backed)
    }

    /// Snapshot the preset tree the first time this is called; later calls
    /// leave the existing snapshot untouched.
    pub async fn backup_original_graphics(&self) -> Result<BackupOutcome> {
        self.backup.backup_original().await
    }

    /// Restore the preset tree from the snapshot and re-apply the selected
    /// preset to every profile.
    ///
    /// When no preset has been selected yet, the default preset is applied.
    pub async fn restore_graphics(&self) -> Result<RestoreSummary> {
        info!("Restoring graphics settings");
        let restored_files = self.backup.restore_tree().await?;

        let preset = match self.graphics_preference()? {
            Some(preset) => preset,
            None => self.default_preset().await?,
        };
        let sync = self.sync_preset_to_profiles(&preset).await?;

        info!("Graphics restored");
        Ok(RestoreSummary {
            restored_files,
            preset,
            sync,
        })
    }
}

impl<S, P> std::fmt::Debug for GraphicsService<S, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphicsService")
            .field("paths", &self.paths)
            .finish_non_exhaustive()
    }
}
