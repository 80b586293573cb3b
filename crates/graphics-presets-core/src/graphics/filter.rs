//! Picking graphics configuration files out of arbitrary file lists.

use std::path::Path;

/// Base names of the game's graphics configuration files
pub const GRAPHICS_FILES: [&str; 3] = ["Skyrim.ini", "SkyrimCustom.ini", "SkyrimPrefs.ini"];

/// Returns `true` if the base name of `path` is a graphics configuration file
pub fn is_graphics_file(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| GRAPHICS_FILES.contains(&name))
}

/// Keep only the graphics configuration files, preserving input order.
pub fn extract_relevant_files<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) -> Vec<P> {
    paths.into_iter().filter(|p| is_graphics_file(p)).collect()
}
