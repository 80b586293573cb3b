//! Utility functions shared across modules.

/// OS and tool artifacts matched by exact (case-insensitive) name.
const JUNK_NAMES: &[&str] = &[
    ".ds_store",
    ".appledouble",
    ".lsoverride",
    ".spotlight-v100",
    ".trashes",
    "__macosx",
    "thumbs.db",
    "ehthumbs.db",
    "desktop.ini",
    "npm-debug.log",
    "icon\r",
];

/// Returns `true` if a directory entry name is an OS or editor artifact
/// rather than real content.
///
/// # Examples
///
/// ```
/// use graphics_presets_core::utils::is_junk;
///
/// assert!(is_junk(".DS_Store"));
/// assert!(is_junk("desktop.ini"));
/// assert!(is_junk("._Ultra"));
/// assert!(!is_junk("Ultra"));
/// ```
pub fn is_junk(name: &str) -> bool {
    let lower = name.to_lowercase();

    if JUNK_NAMES.contains(&lower.as_str()) {
        return true;
    }

    // AppleDouble resource forks
    if name.starts_with("._") {
        return true;
    }

    // Office lock files
    if name.starts_with("~$") {
        return true;
    }

    // Vim swap files
    if name.starts_with('.') && lower.ends_with(".swp") {
        return true;
    }

    // Editor backups and Synology thumbnail dirs
    name.ends_with('~') || name.ends_with("@eaDir")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_junk() {
        // OS artifacts
        assert!(is_junk(".DS_Store"));
        assert!(is_junk("Thumbs.db"));
        assert!(is_junk("Desktop.ini"));
        assert!(is_junk("desktop.ini"));
        assert!(is_junk("__MACOSX"));
        assert!(is_junk(".Spotlight-V100"));
        assert!(is_junk("@eaDir"));

        // Prefixed and suffixed artifacts
        assert!(is_junk("._Low"));
        assert!(is_junk(".preset.swp"));
        assert!(is_junk("Ultra~"));
        assert!(is_junk("~$SkyrimPrefs.ini"));

        // Real preset names
        assert!(!is_junk("Ultra"));
        assert!(!is_junk("low-real-name"));
        assert!(!is_junk("Performance (Low)"));
        assert!(!is_junk(".hidden-but-real"));
        assert!(!is_junk("$ultra"));
    }
}
