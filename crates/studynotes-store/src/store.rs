//! A directory of JSON documents addressed by string keys.
//!
//! Each key maps to `<dir>/<key>.json`. Reads never fail: a missing or
//! malformed document reads as absent so callers fall back to defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Key holding the edited catalog.
pub const TOPICS_KEY: &str = "topics";
/// Key holding favorited topic ids.
pub const FAVORITES_KEY: &str = "favorites";
/// Key holding the view history entries.
pub const HISTORY_KEY: &str = "viewHistory";
/// Key holding the last selected subject id.
pub const SELECTED_SUBJECT_KEY: &str = "selectedSubject";

/// File-backed key-value store.
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    /// Open a store rooted at `dir`. The directory is created on first write.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Read and decode the value under `key`.
    ///
    /// Returns `None` when the key is absent or its document does not parse.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.path_for(key);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("ignoring unreadable {}: {}", path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("ignoring malformed {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Encode and write `value` under `key`.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create store directory: {}", self.dir.display()))?;
        let json = serde_json::to_string_pretty(value)
            .with_context(|| format!("failed to serialize {key}"))?;
        let path = self.path_for(key);
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    /// Delete the value under `key`. Removing an absent key is not an error.
    pub fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("failed to remove {}", path.display())),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.path_for(key).is_file()
    }
}
