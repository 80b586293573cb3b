//! One-time snapshot of the preset tree and restore from it.
//!
//! The existence of `<backupRoot>/graphics` is the only record that a backup
//! was taken. A backup is written once and then only ever read.

use crate::error::{Error, Result};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Staging directory a new snapshot is written to before it is renamed into place
const STAGING_PREFIX: &str = ".partial-";

/// Whether a snapshot of the preset tree exists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupState {
    Unbacked,
    Backed,
}

impl fmt::Display for BackupState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackupState::Unbacked => write!(f, "No backup"),
            BackupState::Backed => write!(f, "Backed up"),
        }
    }
}

/// Outcome of a backup request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupOutcome {
    /// A new snapshot was written with this many files
    Created { files: usize },
    /// A snapshot already existed and was left untouched
    AlreadyExists,
}

/// Snapshot and restore of the live preset directory
#[derive(Debug, Clone)]
pub struct BackupEngine {
    graphics_dir: PathBuf,
    backup_root: PathBuf,
    backup_dir: PathBuf,
}

impl BackupEngine {
    pub fn new(paths: &crate::config::LauncherPaths) -> Self {
        Self {
            graphics_dir: paths.graphics_directory(),
            backup_root: paths.backup_root.clone(),
            backup_dir: paths.graphics_backup_directory(),
        }
    }

    pub fn backup_directory(&self) -> &Path {
        &self.backup_dir
    }

    pub async fn state(&self) -> Result<BackupState> {
        if tokio::fs::try_exists(&self.backup_dir).await? {
            Ok(BackupState::Backed)
        } else {
            Ok(BackupState::Unbacked)
        }
    }

    /// Snapshot the preset tree unless a snapshot already exists.
    ///
    /// The copy is staged next to the final location and renamed into place,
    /// so an interrupted backup never leaves a half-written snapshot behind.
    pub async fn backup_original(&self) -> Result<BackupOutcome> {
        let state = self.state().await?;
        debug!("Backup for graphics exists: {}", state == BackupState::Backed);

        if state == BackupState::Backed {
            return Ok(BackupOutcome::AlreadyExists);
        }

        info!("No graphics backup exists. Backing up...");
        tokio::fs::create_dir_all(&self.backup_root).await?;

        let staging = self.staging_directory();
        if tokio::fs::try_exists(&staging).await? {
            tokio::fs::remove_dir_all(&staging).await?;
        }

        let files = copy_tree(self.graphics_dir.clone(), staging.clone()).await?;
        tokio::fs::rename(&staging, &self.backup_dir).await?;

        info!(
            "Backed up {} graphics files to {}",
            files,
            self.backup_dir.display()
        );
        Ok(BackupOutcome::Created { files })
    }

    /// Copy the snapshot over the live preset tree.
    ///
    /// Files in the snapshot replace live files; live files with no
    /// counterpart in the snapshot are left alone.
    pub async fn restore_tree(&self) -> Result<usize> {
        if self.state().await? == BackupState::Unbacked {
            return Err(Error::NoBackup(self.backup_dir.clone()));
        }

        debug!(
            "Copying {} to {}",
            self.backup_dir.display(),
            self.graphics_dir.display()
        );
        copy_tree(self.backup_dir.clone(), self.graphics_dir.clone()).await
    }

    fn staging_directory(&self) -> PathBuf {
        let name = self
            .backup_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.backup_root.join(format!("{STAGING_PREFIX}{name}"))
    }
}

/// Recursively copy `src` into `dst`, overwriting files. Returns the number of
/// files copied.
pub(crate) async fn copy_tree(src: PathBuf, dst: PathBuf) -> Result<usize> {
    tokio::task::spawn_blocking(move || copy_tree_blocking(&src, &dst)).await?
}

fn copy_tree_blocking(src: &Path, dst: &Path) -> Result<usize> {
    // Check before touching `dst`, so a missing source creates nothing.
    if !src.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Source directory does not exist: {}", src.display()),
        )
        .into());
    }

    fs::create_dir_all(dst)?;
    let mut copied = 0usize;

    // Linked preset directories and files are copied as their targets.
    for entry in WalkDir::new(src).min_depth(1).follow_links(true) {
        let entry = entry.map_err(io::Error::from)?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LauncherPaths;
    use tempfile::TempDir;

    fn paths(temp: &TempDir) -> LauncherPaths {
        LauncherPaths::new(
            temp.path().join("launcher"),
            temp.path().join("backup").join("directory"),
            temp.path().join("modpack"),
        )
    }

    #[tokio::test]
    async fn test_copy_tree_nested() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(src.join("low").join("extra")).unwrap();
        fs::write(src.join("low").join("Skyrim.ini"), "low").unwrap();
        fs::write(src.join("low").join("extra").join("enb.ini"), "enb").unwrap();
        fs::create_dir_all(src.join("empty")).unwrap();

        let dst = temp.path().join("dst");
        let copied = copy_tree(src, dst.clone()).await.unwrap();

        assert_eq!(copied, 2);
        assert_eq!(
            fs::read_to_string(dst.join("low").join("extra").join("enb.ini")).unwrap(),
            "enb"
        );
        assert!(dst.join("empty").is_dir());
    }

    #[tokio::test]
    async fn test_copy_tree_missing_source_creates_nothing() {
        let temp = TempDir::new().unwrap();
        let dst = temp.path().join("dst");

        assert!(copy_tree(temp.path().join("missing"), dst.clone())
            .await
            .is_err());
        assert!(!dst.exists());
    }

    #[tokio::test]
    async fn test_backup_creates_parents_and_snapshot() {
        let temp = TempDir::new().unwrap();
        let paths = paths(&temp);
        fs::create_dir_all(paths.preset_directory("low")).unwrap();
        fs::write(paths.preset_directory("low").join("Skyrim.ini"), "x").unwrap();

        let engine = BackupEngine::new(&paths);
        assert_eq!(engine.state().await.unwrap(), BackupState::Unbacked);

        let outcome = engine.backup_original().await.unwrap();

        assert_eq!(outcome, BackupOutcome::Created { files: 1 });
        assert_eq!(engine.state().await.unwrap(), BackupState::Backed);
        assert!(paths
            .graphics_backup_directory()
            .join("low")
            .join("Skyrim.ini")
            .is_file());
        assert!(!engine.staging_directory().exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_backup_copies_symlinked_preset_directory() {
        let temp = TempDir::new().unwrap();
        let paths = paths(&temp);
        let shared = temp.path().join("shared-ultra");
        fs::create_dir_all(&shared).unwrap();
        fs::write(shared.join("SkyrimPrefs.ini"), "ultra").unwrap();
        fs::create_dir_all(paths.graphics_directory()).unwrap();
        std::os::unix::fs::symlink(&shared, paths.preset_directory("ultra")).unwrap();

        let engine = BackupEngine::new(&paths);
        let outcome = engine.backup_original().await.unwrap();

        assert_eq!(outcome, BackupOutcome::Created { files: 1 });
        assert_eq!(engine.state().await.unwrap(), BackupState::Backed);
        let backed_up = paths.graphics_backup_directory().join("ultra");
        assert!(!fs::symlink_metadata(&backed_up).unwrap().file_type().is_symlink());
        assert_eq!(
            fs::read_to_string(backed_up.join("SkyrimPrefs.ini")).unwrap(),
            "ultra"
        );
    }

    #[tokio::test]
    async fn test_backup_without_presets_stays_unbacked() {
        let temp = TempDir::new().unwrap();
        let engine = BackupEngine::new(&paths(&temp));

        assert!(engine.backup_original().await.is_err());
        assert_eq!(engine.state().await.unwrap(), BackupState::Unbacked);
    }

    #[tokio::test]
    async fn test_backup_discards_stale_staging() {
        let temp = TempDir::new().unwrap();
        let paths = paths(&temp);
        fs::create_dir_all(paths.preset_directory("low")).unwrap();

        let engine = BackupEngine::new(&paths);
        let staging = engine.staging_directory();
        fs::create_dir_all(staging.join("leftover")).unwrap();

        engine.backup_original().await.unwrap();

        assert!(!paths.graphics_backup_directory().join("leftover").exists());
        assert!(paths.graphics_backup_directory().join("low").is_dir());
    }

    #[tokio::test]
    async fn test_restore_without_backup() {
        let temp = TempDir::new().unwrap();
        let engine = BackupEngine::new(&paths(&temp));

        assert!(matches!(
            engine.restore_tree().await,
            Err(Error::NoBackup(_))
        ));
    }

    #[tokio::test]
    async fn test_restore_is_additive() {
        let temp = TempDir::new().unwrap();
        let paths = paths(&temp);
        let backup_low = paths.graphics_backup_directory().join("low");
        fs::create_dir_all(&backup_low).unwrap();
        fs::write(backup_low.join("Skyrim.ini"), "original").unwrap();

        let live_low = paths.preset_directory("low");
        fs::create_dir_all(&live_low).unwrap();
        fs::write(live_low.join("Skyrim.ini"), "edited").unwrap();
        fs::write(live_low.join("user-added.ini"), "mine").unwrap();

        let restored = BackupEngine::new(&paths).restore_tree().await.unwrap();

        assert_eq!(restored, 1);
        assert_eq!(
            fs::read_to_string(live_low.join("Skyrim.ini")).unwrap(),
            "original"
        );
        assert_eq!(
            fs::read_to_string(live_low.join("user-added.ini")).unwrap(),
            "mine"
        );
    }
}
