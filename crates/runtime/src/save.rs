//! Save-file repository for the game-data snapshot.
//!
//! Saves are JSON: self-describing, so a snapshot written by an older build
//! with fewer fields still loads (missing keys fill from defaults at the
//! deserialization boundary). Writes go through a temp file and an atomic
//! rename.

use std::fs;
use std::path::{Path, PathBuf};

use thornvale_core::GameData;

/// Errors from reading or writing save files.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("save I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("save serialization failed: {0}")]
    Serialization(String),
}

/// File-based snapshot store, one JSON file per slot.
pub struct SaveRepository {
    base_dir: PathBuf,
}

impl SaveRepository {
    /// Create a repository rooted at `base_dir`, creating it if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self, SaveError> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Platform-conventional save directory, when one can be determined.
    pub fn default_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "thornvale")
            .map(|dirs| dirs.data_dir().to_path_buf())
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.base_dir.join(format!("{slot}.json"))
    }

    pub fn save(&self, slot: &str, data: &GameData) -> Result<(), SaveError> {
        let path = self.slot_path(slot);
        let temp_path = path.with_extension("json.tmp");

        let text = serde_json::to_string_pretty(data)
            .map_err(|e| SaveError::Serialization(e.to_string()))?;

        fs::write(&temp_path, text)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved slot `{}` to {}", slot, path.display());
        Ok(())
    }

    /// Loads a slot; `None` when it was never saved.
    pub fn load(&self, slot: &str) -> Result<Option<GameData>, SaveError> {
        let path = self.slot_path(slot);
        if !path.exists() {
            return Ok(None);
        }

        let text = fs::read_to_string(&path)?;
        let data: GameData = serde_json::from_str(&text)
            .map_err(|e| SaveError::Serialization(e.to_string()))?;

        tracing::debug!("Loaded slot `{}` from {}", slot, path.display());
        Ok(Some(data))
    }

    pub fn exists(&self, slot: &str) -> bool {
        self.slot_path(slot).exists()
    }

    pub fn delete(&self, slot: &str) -> Result<(), SaveError> {
        let path = self.slot_path(slot);
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Deleted slot `{}`", slot);
        }
        Ok(())
    }
}
