//! Runtime settings loader.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Tunables read at startup from TOML. Every field has a default so a
/// missing or partial file still boots the game.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeSettings {
    /// Map the overworld scene loads first.
    pub starting_map: String,
    /// Fixed seed for combat rolls; unset means seed from entropy.
    pub rng_seed: Option<u64>,
    /// File stem of the save slot.
    pub save_slot: String,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            starting_map: "town.tmx".into(),
            rng_seed: None,
            save_slot: "save".into(),
        }
    }
}

/// Loader for runtime settings from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings from a TOML file; a missing file yields defaults.
    pub fn load(path: &Path) -> LoadResult<RuntimeSettings> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(RuntimeSettings::default());
        }
        let content = read_file(path)?;
        let settings: RuntimeSettings = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse settings TOML: {}", e))?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_fills_defaults() {
        let settings: RuntimeSettings = toml::from_str("rng_seed = 7").expect("parse");
        assert_eq!(settings.rng_seed, Some(7));
        assert_eq!(settings.starting_map, "town.tmx");
    }
}
