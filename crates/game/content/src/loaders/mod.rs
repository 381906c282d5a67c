//! Catalog and configuration loaders.
//!
//! RON for game data (enemy archetypes, item tables), TOML for runtime
//! settings.

mod config;
mod enemies;
mod items;

pub use config::{ConfigLoader, RuntimeSettings};
pub use enemies::{EnemyArchetype, EnemyCatalog};
pub use items::{ConsumableDef, GearDef, ItemCatalog, SpellDef};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
