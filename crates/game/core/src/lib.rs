//! Deterministic game rules shared across the runtime and offline tools.
//!
//! `thornvale-core` defines the canonical battle rules (phases, combat rolls,
//! leveling), the actor movement/animation state machine, and the persisted
//! game-data snapshot. All battle state mutation flows through
//! [`battle::BattleEngine`]; supporting crates depend on the types
//! re-exported here.
//!
//! The crate is time- and I/O-free: wall-clock time enters only as
//! caller-supplied elapsed durations, and randomness only through the
//! [`combat::CombatRng`] trait.

pub mod actor;
pub mod battle;
pub mod combat;
pub mod config;
pub mod data;
pub mod error;
pub mod event;
pub mod input;
pub mod roster;
pub mod stats;
pub mod unit;

pub use actor::{ActorMode, ActorSprite, AnimationSignal, Direction, PixelPoint};
pub use battle::{
    BattleAction, BattleEngine, BattleOutcome, BattlePhase, BattleSpec, Loadout, MenuChoice,
    RejectReason, SpellSpec,
};
pub use combat::{CombatRng, HitOutcome, roll_enemy_hit, roll_fire_blast, roll_player_hit};
pub use config::GameConfig;
pub use data::{GameData, ItemEntry, PlayerRecord};
pub use error::CoreError;
pub use event::{BattleEvent, SoundCue};
pub use input::{InputSnapshot, LogicalKey};
pub use roster::Roster;
pub use stats::{LevelUp, Meter, apply_experience};
pub use unit::{Armor, CombatUnit, UnitId, UnitKind, UnitSpec, Weapon};
