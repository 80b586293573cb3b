//! Game profiles that receive copies of the selected preset.

use crate::config::LauncherPaths;
use crate::error::Result;
use crate::utils::is_junk;
use std::future::Future;
use std::path::PathBuf;

/// Supplies the directories of the currently active game profiles
pub trait ProfileSource: Send + Sync {
    fn active_profile_directories(&self) -> impl Future<Output = Result<Vec<PathBuf>>> + Send;
}

/// Profiles discovered as the subdirectories of `<modpackRoot>/profiles`.
#[derive(Debug, Clone)]
pub struct ModpackProfiles {
    profiles_dir: PathBuf,
}

impl ModpackProfiles {
    pub fn new(profiles_dir: impl Into<PathBuf>) -> Self {
        Self {
            profiles_dir: profiles_dir.into(),
        }
    }

    pub fn from_paths(paths: &LauncherPaths) -> Self {
        Self::new(paths.profiles_directory())
    }
}

impl ProfileSource for ModpackProfiles {
    async fn active_profile_directories(&self) -> Result<Vec<PathBuf>> {
        if !tokio::fs::try_exists(&self.profiles_dir).await? {
            tracing::debug!(
                "Profiles directory {} does not exist",
                self.profiles_dir.display()
            );
            return Ok(Vec::new());
        }

        let mut entries = tokio::fs::read_dir(&self.profiles_dir).await?;
        let mut profiles = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            let name = entry.file_name();
            if is_junk(&name.to_string_lossy()) {
                continue;
            }
            profiles.push(entry.path());
        }
        profiles.sort();
        Ok(profiles)
    }
}

/// A fixed list of profile directories
#[derive(Debug, Clone, Default)]
pub struct StaticProfiles(pub Vec<PathBuf>);

impl ProfileSource for StaticProfiles {
    async fn active_profile_directories(&self) -> Result<Vec<PathBuf>> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_modpack_profiles_lists_directories() {
        let temp = TempDir::new().unwrap();
        let profiles = temp.path().join("profiles");
        fs::create_dir_all(profiles.join("profile-2")).unwrap();
        fs::create_dir_all(profiles.join("profile-1")).unwrap();
        fs::create_dir_all(profiles.join("__MACOSX")).unwrap();
        fs::write(profiles.join("notes.txt"), "not a profile").unwrap();

        let found = ModpackProfiles::new(&profiles)
            .active_profile_directories()
            .await
            .unwrap();

        assert_eq!(
            found,
            vec![profiles.join("profile-1"), profiles.join("profile-2")]
        );
    }

    #[tokio::test]
    async fn test_modpack_profiles_missing_directory() {
        let temp = TempDir::new().unwrap();
        let found = ModpackProfiles::new(temp.path().join("missing"))
            .active_profile_directories()
            .await
            .unwrap();
        assert!(found.is_empty());
    }
}
