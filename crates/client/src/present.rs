//! Narration listener: the stand-in presentation collaborator.
//!
//! Real audio and GUI layers subscribe to the same bus; this listener
//! narrates the battle through tracing so a headless run is followable.

use thornvale_core::{BattleEvent, HitOutcome, SoundCue};
use thornvale_runtime::{EventListener, GameEvent};

pub struct NarrationListener {
    _private: (),
}

impl NarrationListener {
    pub fn new() -> Self {
        Self { _private: () }
    }

    fn narrate_battle(&self, event: &BattleEvent) {
        match event {
            BattleEvent::BattleStarted { enemies } => {
                tracing::info!(enemies, "battle begins");
            }
            BattleEvent::ActionRejected { reason } => {
                tracing::info!(?reason, "action refused");
            }
            BattleEvent::EnemyDamaged { unit, hit } => match hit {
                HitOutcome::Miss => tracing::info!(%unit, "the swing goes wide"),
                HitOutcome::Hit(amount) => tracing::info!(%unit, amount, "enemy takes damage"),
            },
            BattleEvent::EnemyDefeated { name, .. } => {
                tracing::info!(name, "enemy defeated");
            }
            BattleEvent::PlayerDamaged { attacker, hit } => match hit {
                HitOutcome::Miss => tracing::info!(%attacker, "attack glances off the armor"),
                HitOutcome::Hit(amount) => tracing::info!(%attacker, amount, "player takes damage"),
            },
            BattleEvent::PlayerCured { amount } => tracing::info!(amount, "cure restores health"),
            BattleEvent::PotionDrunk { item, restored } => {
                tracing::info!(item, restored, "potion drunk");
            }
            BattleEvent::RanAway => tracing::info!("got away safely"),
            BattleEvent::BattleWon => tracing::info!("victory!"),
            BattleEvent::GoldAwarded { amount } => tracing::info!(amount, "gold won"),
            BattleEvent::ExperienceAwarded { amount } => {
                tracing::info!(amount, "experience gained");
            }
            BattleEvent::LeveledUp { level } => tracing::info!(level, "level up"),
            BattleEvent::TwoActionsUnlocked => {
                tracing::info!("two actions per turn unlocked");
            }
            BattleEvent::PlayerDied => tracing::info!("the player falls"),
            BattleEvent::BattleEnded { outcome } => tracing::info!(%outcome, "battle over"),
            BattleEvent::Sound(cue) => self.play(*cue),
            BattleEvent::PlayerFinishedAttack { .. }
            | BattleEvent::SpellEffectSpawned { .. }
            | BattleEvent::EnemyStartedAttack { .. } => {}
        }
    }

    /// Audio is out of scope; log the cue where a mixer would play it.
    fn play(&self, cue: SoundCue) {
        tracing::debug!(%cue, "sound cue");
    }
}

impl Default for NarrationListener {
    fn default() -> Self {
        Self::new()
    }
}

impl EventListener for NarrationListener {
    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Battle(battle_event) => self.narrate_battle(battle_event),
            GameEvent::SceneChanged { from, to } => tracing::info!(from, to, "scene change"),
            GameEvent::EncounterTriggered { tier } => tracing::info!(tier, "enemies approach"),
            GameEvent::GameSaved => tracing::info!("game saved"),
        }
    }
}
