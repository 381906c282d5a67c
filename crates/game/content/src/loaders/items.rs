//! Item, equipment, and spell catalog.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thornvale_core::battle::{ETHER_POTION, HEALING_POTION};
use thornvale_core::{Armor, Loadout, SpellSpec, Weapon};

use crate::loaders::{LoadResult, read_file};

/// A weapon or armor line: shop value plus the power it contributes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GearDef {
    pub power: u32,
    pub value: u32,
}

/// A consumable line: shop value plus how much it restores.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConsumableDef {
    pub value: u32,
    pub restore: u32,
}

/// A castable spell: magic cost and power.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpellDef {
    pub cost: u32,
    pub power: u32,
}

/// Every purchasable or castable thing, keyed by display name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemCatalog {
    weapons: BTreeMap<String, GearDef>,
    armor: BTreeMap<String, GearDef>,
    consumables: BTreeMap<String, ConsumableDef>,
    spells: BTreeMap<String, SpellDef>,
}

impl ItemCatalog {
    /// Load the catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Self> {
        let content = read_file(path)?;
        let catalog: ItemCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item RON: {}", e))?;
        Ok(catalog)
    }

    /// Resolves an equipped weapon name to its typed form. Unknown names
    /// resolve to `None` (bare hands) rather than failing: an old save may
    /// reference gear a newer catalog dropped.
    pub fn weapon(&self, name: &str) -> Option<Weapon> {
        self.weapons.get(name).map(|def| Weapon {
            name: name.to_owned(),
            power: def.power,
        })
    }

    pub fn armor_piece(&self, name: &str) -> Option<Armor> {
        self.armor.get(name).map(|def| Armor {
            name: name.to_owned(),
            power: def.power,
        })
    }

    pub fn consumable(&self, name: &str) -> Option<ConsumableDef> {
        self.consumables.get(name).copied()
    }

    pub fn spell(&self, name: &str) -> Option<SpellDef> {
        self.spells.get(name).copied()
    }

    /// The player's battle numbers, with defaults for anything the catalog
    /// does not define.
    pub fn loadout(&self) -> Loadout {
        let defaults = Loadout::default();
        let spell = |name: &str, fallback: SpellSpec| {
            self.spell(name).map_or(fallback, |def| SpellSpec {
                cost: def.cost,
                power: def.power,
            })
        };
        Loadout {
            cure: spell("Cure", defaults.cure),
            fire: spell("Fire Blast", defaults.fire),
            healing_restore: self
                .consumable(HEALING_POTION)
                .map_or(defaults.healing_restore, |def| def.restore),
            ether_restore: self
                .consumable(ETHER_POTION)
                .map_or(defaults.ether_restore, |def| def.restore),
        }
    }
}
