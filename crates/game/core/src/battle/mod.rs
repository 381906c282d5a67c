//! The battle encounter engine.
//!
//! One [`BattleEngine`] drives a single encounter from fade-in to fade-out
//! through an explicit phase state machine ([`BattlePhase`]). Every wait is
//! either a fixed delay compared against the engine clock or an animation
//! completion signal; nothing blocks, and the caller ticks the engine at the
//! fixed timestep with a frame-local input snapshot.

mod engine;
mod phase;
mod queue;

pub use engine::{BattleEngine, BattleSpec, Loadout, MenuChoice, SpellSpec};
pub use phase::{BattleOutcome, BattlePhase};
pub use queue::{ActionQueue, BattleAction, RejectReason};

/// Inventory name of the health-restoring consumable.
pub const HEALING_POTION: &str = "Healing Potion";
/// Inventory name of the magic-restoring consumable.
pub const ETHER_POTION: &str = "Ether Potion";
