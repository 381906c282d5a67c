//! The persisted game-data snapshot.
//!
//! One mutable [`GameData`] record travels through the program: the scene
//! controller owns it and lends it exclusively to whichever scene is active.
//! Scenes flush their results back before a transition completes, so the
//! next scene always observes current data. Serialization is self-describing
//! and every field carries a default, which is how old saves from before a
//! field existed keep loading (missing keys fill in rather than failing).

use std::collections::{BTreeMap, BTreeSet};

use crate::actor::Direction;
use crate::config::GameConfig;
use crate::stats::Meter;

/// One inventory line: how many the player carries and what the shop thinks
/// it is worth. `power` is present for weapons/armor, absent for
/// consumables.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ItemEntry {
    pub quantity: u32,
    pub value: u32,
    pub power: Option<u32>,
}

/// Persisted player statistics.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerRecord {
    pub health: Meter,
    pub magic: Meter,
    pub level: u32,
    pub experience_to_next: u32,
    pub attack_points: u32,
    pub defense_points: u32,
    pub equipped_weapon: Option<String>,
    pub equipped_armor: Vec<String>,
}

impl Default for PlayerRecord {
    fn default() -> Self {
        Self {
            health: Meter::full(50),
            magic: Meter::full(50),
            level: 1,
            experience_to_next: GameConfig::experience_threshold(1),
            attack_points: 10,
            defense_points: 10,
            equipped_weapon: None,
            equipped_armor: Vec::new(),
        }
    }
}

/// The complete persisted snapshot: inventory, player stats, quest flags,
/// and where the player last stood.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameData {
    pub inventory: BTreeMap<String, ItemEntry>,
    pub player: PlayerRecord,
    pub gold: u32,
    pub quest_flags: BTreeSet<String>,
    pub last_location: String,
    pub last_direction: Direction,
    pub last_state: String,
}

impl GameData {
    /// A fresh game: starter weapon equipped, a couple of potions, pocket
    /// change.
    pub fn new_game() -> Self {
        let mut data = Self {
            gold: 100,
            last_location: "town".into(),
            last_state: "world".into(),
            ..Self::default()
        };
        data.add_item(
            "Rusty Sword",
            ItemEntry {
                quantity: 1,
                value: 50,
                power: Some(9),
            },
        );
        data.add_item(
            "Healing Potion",
            ItemEntry {
                quantity: 2,
                value: 15,
                power: None,
            },
        );
        data.player.equipped_weapon = Some("Rusty Sword".into());
        data
    }

    /// How many of `name` the player carries.
    pub fn item_quantity(&self, name: &str) -> u32 {
        self.inventory.get(name).map_or(0, |entry| entry.quantity)
    }

    /// Adds items, merging quantities with any existing entry.
    pub fn add_item(&mut self, name: &str, entry: ItemEntry) {
        match self.inventory.get_mut(name) {
            Some(existing) => existing.quantity += entry.quantity,
            None => {
                self.inventory.insert(name.to_owned(), entry);
            }
        }
    }

    /// Consumes `count` of an item. Returns false (and changes nothing) if
    /// the player does not carry that many. An entry whose quantity reaches
    /// zero is removed outright, never kept as a zero line.
    pub fn consume_item(&mut self, name: &str, count: u32) -> bool {
        let Some(entry) = self.inventory.get_mut(name) else {
            return false;
        };
        if entry.quantity < count {
            return false;
        }
        entry.quantity -= count;
        if entry.quantity == 0 {
            self.inventory.remove(name);
        }
        true
    }

    pub fn add_gold(&mut self, amount: u32) {
        self.gold += amount;
    }

    /// Spends gold if the purse covers it.
    pub fn spend_gold(&mut self, amount: u32) -> bool {
        if self.gold < amount {
            return false;
        }
        self.gold -= amount;
        true
    }

    /// Serializes the snapshot to an opaque byte string.
    #[cfg(feature = "serde")]
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Reconstructs a snapshot previously produced by [`Self::to_bytes`].
    #[cfg(feature = "serde")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}
