//! Copying preset files into profile directories.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Outcome of a preset sync
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSummary {
    /// Number of profiles that received the preset
    pub profiles: usize,
    /// Number of files in the preset
    pub files: usize,
    /// Total file copies performed
    pub copied: usize,
}

/// Full paths of every regular file directly inside `preset_dir`, sorted.
pub(crate) async fn files_in_preset(name: &str, preset_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = match tokio::fs::read_dir(preset_dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::PresetNotFound {
                name: name.to_string(),
                path: preset_dir.to_path_buf(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        // Follows symlinks, so a linked config file still counts as a file.
        if matches!(tokio::fs::metadata(&path).await, Ok(meta) if meta.is_file()) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Copy every file into every profile, overwriting same-named files.
///
/// All copies are dispatched at once and awaited together. Every copy runs to
/// completion even when another fails; the first failure observed is returned.
/// Completed copies are left in place.
pub(crate) async fn copy_files_to_profiles(
    files: &[PathBuf],
    profiles: &[PathBuf],
) -> Result<SyncSummary> {
    let mut tasks = JoinSet::new();

    for profile in profiles {
        for file in files {
            let Some(file_name) = file.file_name() else {
                continue;
            };
            let target = profile.join(file_name);
            let file = file.clone();
            let profile = profile.clone();

            tasks.spawn(async move {
                debug!("Copying {} to {}", file.display(), profile.display());
                match tokio::fs::copy(&file, &target).await {
                    Ok(_) => Ok(()),
                    Err(source) => Err(Error::Sync {
                        file,
                        profile,
                        source,
                    }),
                }
            });
        }
    }

    let mut summary = SyncSummary {
        profiles: profiles.len(),
        files: files.len(),
        copied: 0,
    };
    let mut first_error: Option<Error> = None;

    while let Some(joined) = tasks.join_next().await {
        let outcome = joined.map_err(Error::from).and_then(|copy| copy);
        match outcome {
            Ok(()) => summary.copied += 1,
            Err(e) => {
                warn!("{}", e);
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(summary),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_files_in_preset_lists_only_files() {
        let temp = TempDir::new().unwrap();
        let preset = temp.path().join("ultra");
        fs::create_dir_all(preset.join("nested")).unwrap();
        fs::write(preset.join("b.ini"), "b").unwrap();
        fs::write(preset.join("a.ini"), "a").unwrap();

        let files = files_in_preset("ultra", &preset).await.unwrap();

        assert_eq!(files, vec![preset.join("a.ini"), preset.join("b.ini")]);
    }

    #[tokio::test]
    async fn test_files_in_missing_preset() {
        let temp = TempDir::new().unwrap();

        let err = files_in_preset("ghost", &temp.path().join("ghost"))
            .await
            .unwrap_err();

        match err {
            Error::PresetNotFound { name, .. } => assert_eq!(name, "ghost"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_copy_overwrites_existing_files() {
        let temp = TempDir::new().unwrap();
        let preset = temp.path().join("preset");
        let profile = temp.path().join("profile");
        fs::create_dir_all(&preset).unwrap();
        fs::create_dir_all(&profile).unwrap();
        fs::write(preset.join("SkyrimPrefs.ini"), "new").unwrap();
        fs::write(profile.join("SkyrimPrefs.ini"), "old").unwrap();
        fs::write(profile.join("plugins.txt"), "untouched").unwrap();

        let summary = copy_files_to_profiles(&[preset.join("SkyrimPrefs.ini")], &[profile.clone()])
            .await
            .unwrap();

        assert_eq!(summary.copied, 1);
        assert_eq!(
            fs::read_to_string(profile.join("SkyrimPrefs.ini")).unwrap(),
            "new"
        );
        assert_eq!(
            fs::read_to_string(profile.join("plugins.txt")).unwrap(),
            "untouched"
        );
    }

    #[tokio::test]
    async fn test_copy_failure_reports_file_and_profile() {
        let temp = TempDir::new().unwrap();
        let preset = temp.path().join("preset");
        let good = temp.path().join("good");
        let missing = temp.path().join("missing");
        fs::create_dir_all(&preset).unwrap();
        fs::create_dir_all(&good).unwrap();
        fs::write(preset.join("Skyrim.ini"), "content").unwrap();

        let err = copy_files_to_profiles(
            &[preset.join("Skyrim.ini")],
            &[good.clone(), missing.clone()],
        )
        .await
        .unwrap_err();

        match err {
            Error::Sync { file, profile, .. } => {
                assert_eq!(file, preset.join("Skyrim.ini"));
                assert_eq!(profile, missing);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // The copy into the healthy profile still completed
        assert_eq!(
            fs::read_to_string(good.join("Skyrim.ini")).unwrap(),
            "content"
        );
    }

    #[tokio::test]
    async fn test_copy_with_no_profiles() {
        let summary = copy_files_to_profiles(&[PathBuf::from("/nowhere/Skyrim.ini")], &[])
            .await
            .unwrap();
        assert_eq!(summary.copied, 0);
        assert_eq!(summary.profiles, 0);
    }
}
