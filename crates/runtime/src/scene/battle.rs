//! Battle scene: adapts the battle engine to the scene contract.

use std::time::Duration;

use thornvale_core::battle::{ETHER_POTION, HEALING_POTION};
use thornvale_core::{
    BattleEngine, BattleOutcome, BattleSpec, CombatRng, GameData, InputSnapshot,
};

use super::{EncounterSpec, GameContent, Scene, SceneContext, SceneOutcome, SceneRequest};
use crate::error::RuntimeError;
use crate::events::GameEvent;

/// Drives one encounter and fans its events out to the bus.
pub struct BattleScene {
    engine: BattleEngine,
}

impl BattleScene {
    /// Resolves the encounter against the catalogs and the persisted player
    /// record, then constructs the engine.
    pub fn new(
        data: &GameData,
        content: &GameContent,
        encounter: &EncounterSpec,
        rng: Box<dyn CombatRng>,
    ) -> Result<Self, RuntimeError> {
        let enemies = encounter
            .kinds
            .iter()
            .filter_map(|kind| {
                let spawned = content.enemies.spawn(kind, encounter.tier);
                if spawned.is_none() {
                    tracing::warn!(kind, "encounter references unknown enemy kind");
                }
                spawned
            })
            .collect();

        let weapon = data
            .player
            .equipped_weapon
            .as_deref()
            .and_then(|name| content.items.weapon(name));
        let armor = data
            .player
            .equipped_armor
            .iter()
            .filter_map(|name| content.items.armor_piece(name))
            .collect();

        let spec = BattleSpec {
            enemies,
            loadout: content.items.loadout(),
            weapon,
            armor,
            healing_potions: data.item_quantity(HEALING_POTION),
            ether_potions: data.item_quantity(ETHER_POTION),
        };
        let engine = BattleEngine::new(spec, &data.player, rng)?;
        Ok(Self { engine })
    }

    pub fn engine(&self) -> &BattleEngine {
        &self.engine
    }
}

impl Scene for BattleScene {
    fn name(&self) -> &'static str {
        "battle"
    }

    fn update(
        &mut self,
        ctx: &mut SceneContext<'_>,
        input: &InputSnapshot,
        dt: Duration,
    ) -> SceneOutcome {
        for event in self.engine.update(input, dt) {
            ctx.bus.publish(&GameEvent::Battle(event));
        }

        if !self.engine.is_finished() {
            return SceneOutcome::Continue;
        }
        match self.engine.outcome() {
            Some(BattleOutcome::Defeat) => SceneOutcome::Transition(SceneRequest::GameOver),
            _ => SceneOutcome::Transition(SceneRequest::World),
        }
    }

    fn on_exit(&mut self, ctx: &mut SceneContext<'_>) {
        // Write-on-exit: vitals, leveling, consumed potions, and won gold
        // land in the snapshot before the next scene can read it.
        self.engine.flush_into(ctx.data);
    }
}
