//! # graphics-presets-core
//!
//! Core library for managing a modpack launcher's graphics presets.
//!
//! This crate provides the foundational functionality for:
//! - Resolving the preset catalog from a curated mapping and the preset directories on disk
//! - Applying the selected preset's files to every active game profile
//! - Taking a one-time backup of the original presets and restoring from it
//!
//! ## Modules
//!
//! - [`config`] - Launcher paths and preference persistence
//! - [`error`] - Error types and Result alias
//! - [`graphics`] - Catalog, profile sync and backup/restore
//! - [`profile`] - Profile directory discovery
//! - [`utils`] - Junk file detection
//!
//! ## Example
//!
//! ```no_run
//! use graphics_presets_core::{
//!     GraphicsService, JsonPreferenceStore, LauncherPaths, ModpackProfiles,
//! };
//!
//! # async fn run() -> graphics_presets_core::Result<()> {
//! let paths = LauncherPaths::new("/launcher", "/launcher/backup", "/modpack");
//! let service = GraphicsService::new(
//!     paths.clone(),
//!     JsonPreferenceStore::new("/launcher/preferences.json"),
//!     ModpackProfiles::from_paths(&paths),
//! );
//!
//! service.backup_original_graphics().await?;
//! let preset = service.default_preset().await?;
//! service.select_preset(&preset).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod graphics;
pub mod profile;
pub mod utils;

// Error types
pub use error::{ConfigReadError, Error, Result};

// Configuration
pub use config::{
    JsonPreferenceStore, LauncherPaths, MemoryPreferenceStore, PreferenceKey, PreferenceStore,
};

// Profiles
pub use profile::{ModpackProfiles, ProfileSource, StaticProfiles};

// Graphics presets
pub use graphics::{
    extract_relevant_files, is_graphics_file, BackupOutcome, BackupState, GraphicsService,
    PresetEntry, RestoreSummary, SyncSummary, GRAPHICS_FILES,
};
