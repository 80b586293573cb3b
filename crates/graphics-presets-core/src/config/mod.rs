//! Launcher configuration: root paths and user preferences

mod preferences;

pub use preferences::*;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory holding one subdirectory per graphics preset
pub const GRAPHICS_DIRECTORY_NAME: &str = "Graphics Presets";
/// Curated `{real, friendly}` mapping for presets
pub const GRAPHICS_MAPPING_FILE: &str = "namesGraphics.json";
/// Name of the graphics snapshot under the backup root
pub const GRAPHICS_BACKUP_NAME: &str = "graphics";
/// Directory under the modpack root holding one directory per profile
pub const PROFILES_DIRECTORY_NAME: &str = "profiles";

/// Root paths the preset subsystem works against.
///
/// This is a plain value handed to each component at construction; nothing
/// reads it from global state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LauncherPaths {
    /// Launcher installation directory (contains the presets and mapping file)
    pub launcher_root: PathBuf,
    /// Root under which one-time backups are stored
    pub backup_root: PathBuf,
    /// Root of the installed modpack (contains the profiles)
    pub modpack_root: PathBuf,
}

impl LauncherPaths {
    pub fn new(
        launcher_root: impl Into<PathBuf>,
        backup_root: impl Into<PathBuf>,
        modpack_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            launcher_root: launcher_root.into(),
            backup_root: backup_root.into(),
            modpack_root: modpack_root.into(),
        }
    }

    /// `<launcherRoot>/Graphics Presets`
    pub fn graphics_directory(&self) -> PathBuf {
        self.launcher_root.join(GRAPHICS_DIRECTORY_NAME)
    }

    /// `<launcherRoot>/namesGraphics.json`
    pub fn graphics_mapping_path(&self) -> PathBuf {
        self.launcher_root.join(GRAPHICS_MAPPING_FILE)
    }

    /// `<backupRoot>/graphics`
    pub fn graphics_backup_directory(&self) -> PathBuf {
        self.backup_root.join(GRAPHICS_BACKUP_NAME)
    }

    /// `<modpackRoot>/profiles`
    pub fn profiles_directory(&self) -> PathBuf {
        self.modpack_root.join(PROFILES_DIRECTORY_NAME)
    }

    /// Directory of a single preset
    pub fn preset_directory(&self, name: &str) -> PathBuf {
        self.graphics_directory().join(name)
    }

    /// Load paths from a JSON config file
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| crate::Error::config_read(path, e))
    }

    /// Save paths to a JSON config file, creating parent directories
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, content)
    }
}
