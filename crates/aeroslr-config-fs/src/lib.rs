// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Filesystem-backed `ConfigStore` for the editor (uses platform config dir).

use aeroslr_app_core::config::{validate_key, ConfigError, ConfigStore};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Store configs as JSON files under one base directory.
pub struct FsConfigStore {
    base: PathBuf,
}

impl FsConfigStore {
    /// Create a store rooted at the user config directory (e.g., `~/.config/AeroSLR`).
    ///
    /// The directory is created lazily on first save, so a read-only home
    /// still lets the editor start with defaults.
    pub fn new() -> Result<Self, ConfigError> {
        let proj = ProjectDirs::from("dev", "aeroslr", "AeroSLR")
            .ok_or_else(|| ConfigError::Other("could not resolve config dir".into()))?;
        Ok(Self::with_base(proj.config_dir()))
    }

    /// Create a store rooted at an explicit directory.
    pub fn with_base(base: impl AsRef<Path>) -> Self {
        Self {
            base: base.as_ref().to_path_buf(),
        }
    }

    /// Directory holding the config files.
    pub fn base(&self) -> &Path {
        &self.base
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, ConfigError> {
        validate_key(key)?;
        Ok(self.base.join(format!("{key}.json")))
    }
}

impl ConfigStore for FsConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        let path = self.path_for(key)?;
        match fs::read(path) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(ConfigError::NotFound),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.base)?;
        // Write-then-rename so a crash mid-write never leaves a torn file.
        let tmp = self.base.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsConfigStore::with_base(dir.path());
        assert!(matches!(store.load_raw("editor_prefs"), Err(ConfigError::NotFound)));
    }

    #[test]
    fn save_creates_base_and_round_trips_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsConfigStore::with_base(dir.path().join("nested").join("AeroSLR"));
        store.save_raw("editor_prefs", b"{\"a\":1}").unwrap();
        assert!(store.base().join("editor_prefs.json").is_file());
        assert!(!store.base().join(".editor_prefs.json.tmp").exists());
        assert_eq!(store.load_raw("editor_prefs").unwrap(), b"{\"a\":1}");
    }

    #[test]
    fn overwrite_replaces_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsConfigStore::with_base(dir.path());
        store.save_raw("k", b"first").unwrap();
        store.save_raw("k", b"second").unwrap();
        assert_eq!(store.load_raw("k").unwrap(), b"second");
    }

    #[test]
    fn traversal_keys_never_touch_the_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsConfigStore::with_base(dir.path().join("cfg"));
        assert!(matches!(
            store.save_raw("../evil", b"x"),
            Err(ConfigError::InvalidKey(_))
        ));
        assert!(!dir.path().join("cfg").exists());
        assert!(!dir.path().join("evil.json").exists());
    }
}
