//! Preset catalog resolution.
//!
//! The catalog is a projection of two sources, recomputed on every query:
//! the curated `namesGraphics.json` mapping and the preset directories that
//! actually exist on disk. Mapped entries always come first, in file order,
//! followed by any directory that has no mapping.

use crate::config::LauncherPaths;
use crate::error::{Error, Result};
use crate::utils::is_junk;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// A graphics preset as shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PresetEntry {
    /// On-disk directory name, the preset's identity
    pub real: String,
    /// Display label
    pub friendly: String,
}

impl PresetEntry {
    pub fn new(real: impl Into<String>, friendly: impl Into<String>) -> Self {
        Self {
            real: real.into(),
            friendly: friendly.into(),
        }
    }

    /// Entry for a directory with no curated label
    pub fn unmapped(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            friendly: name.clone(),
            real: name,
        }
    }
}

/// Reads the preset catalog from the launcher directory
#[derive(Debug, Clone)]
pub struct CatalogResolver {
    graphics_dir: PathBuf,
    mapping_path: PathBuf,
}

impl CatalogResolver {
    pub fn new(paths: &LauncherPaths) -> Self {
        Self {
            graphics_dir: paths.graphics_directory(),
            mapping_path: paths.graphics_mapping_path(),
        }
    }

    /// Entries from the curated mapping file, in file order.
    ///
    /// A missing or malformed mapping file is an error, never an empty list.
    pub async fn list_mapped_presets(&self) -> Result<Vec<PresetEntry>> {
        let content = tokio::fs::read_to_string(&self.mapping_path)
            .await
            .map_err(|e| Error::config_read(&self.mapping_path, e))?;
        serde_json::from_str(&content).map_err(|e| Error::config_read(&self.mapping_path, e))
    }

    /// Preset directories that have no entry in `mapped`, sorted by name.
    pub async fn list_unmapped_presets(&self, mapped: &[PresetEntry]) -> Result<Vec<PresetEntry>> {
        let known: HashSet<&str> = mapped.iter().map(|entry| entry.real.as_str()).collect();

        let mut entries = tokio::fs::read_dir(&self.graphics_dir).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            let Ok(name) = entry.file_name().into_string() else {
                tracing::warn!(
                    "Skipping preset directory with non UTF-8 name: {}",
                    entry.path().display()
                );
                continue;
            };
            if is_junk(&name) {
                continue;
            }
            names.push(name);
        }
        names.sort();

        Ok(names
            .into_iter()
            .filter(|name| !known.contains(name.as_str()))
            .map(PresetEntry::unmapped)
            .collect())
    }

    /// Full catalog: mapped entries followed by unmapped ones
    pub async fn catalog(&self) -> Result<Vec<PresetEntry>> {
        let mut catalog = self.list_mapped_presets().await?;
        let unmapped = self.list_unmapped_presets(&catalog).await?;
        tracing::debug!(
            "Resolved {} mapped and {} unmapped graphics presets",
            catalog.len(),
            unmapped.len()
        );
        catalog.extend(unmapped);
        Ok(catalog)
    }

    /// Whether `name` is the `real` name of a catalog entry
    pub async fn is_valid_preset(&self, name: &str) -> Result<bool> {
        Ok(self.catalog().await?.iter().any(|entry| entry.real == name))
    }

    /// The first catalog entry's `real` name
    pub async fn default_preset(&self) -> Result<String> {
        self.catalog()
            .await?
            .into_iter()
            .next()
            .map(|entry| entry.real)
            .ok_or(Error::EmptyCatalog)
    }
}
