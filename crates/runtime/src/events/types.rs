//! Event types for different topics.

use serde::{Deserialize, Serialize};
use thornvale_core::BattleEvent;

/// Topics for event routing.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Battle beats (damage, rewards, sound cues).
    Battle,
    /// Scene lifecycle (transitions, saves).
    Scene,
}

/// Event wrapper that carries the topic and typed payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Battle(BattleEvent),

    /// The controller swapped the active scene.
    SceneChanged { from: String, to: String },

    /// An overworld trigger started an encounter at this difficulty tier.
    EncounterTriggered { tier: u32 },

    /// The snapshot was written to disk.
    GameSaved,
}

impl GameEvent {
    pub fn topic(&self) -> Topic {
        match self {
            GameEvent::Battle(_) => Topic::Battle,
            GameEvent::SceneChanged { .. }
            | GameEvent::EncounterTriggered { .. }
            | GameEvent::GameSaved => Topic::Scene,
        }
    }
}
