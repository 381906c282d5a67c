//! Enemy archetype catalog.
//!
//! Loads base enemy numbers from a RON file; battles request units scaled to
//! a map region's difficulty tier.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thornvale_core::UnitSpec;

use crate::loaders::{LoadResult, read_file};

/// Base numbers for one enemy kind, before tier scaling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyArchetype {
    pub kind: String,
    pub name: String,
    pub health: u32,
    pub power: u32,
    pub experience: u32,
    pub gold: u32,
}

/// All enemy archetypes known to the game.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnemyCatalog {
    archetypes: Vec<EnemyArchetype>,
}

impl EnemyCatalog {
    /// Load the catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Self> {
        let content = read_file(path)?;
        let catalog: EnemyCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy RON: {}", e))?;
        tracing::debug!(archetypes = catalog.archetypes.len(), "loaded enemy catalog");
        Ok(catalog)
    }

    pub fn get(&self, kind: &str) -> Option<&EnemyArchetype> {
        self.archetypes.iter().find(|archetype| archetype.kind == kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.archetypes.iter().map(|archetype| archetype.kind.as_str())
    }

    /// A unit spec for `kind` scaled to the given difficulty tier.
    pub fn spawn(&self, kind: &str, tier: u32) -> Option<UnitSpec> {
        let archetype = self.get(kind)?;
        Some(UnitSpec::scaled(
            &archetype.kind,
            &archetype.name,
            archetype.health,
            archetype.power,
            archetype.experience,
            archetype.gold,
            tier,
        ))
    }
}
