//! Orchestration for Thornvale: scenes, events, the tick loop, and saves.
//!
//! The runtime owns the pieces that connect the deterministic core to the
//! outside world. A [`scene::SceneController`] drives a fixed-timestep
//! cooperative loop, lending the one mutable [`thornvale_core::GameData`]
//! snapshot to the active scene; the [`events::EventBus`] fans engine
//! notifications out to presentation listeners synchronously, in
//! registration order; the [`save::SaveRepository`] persists the snapshot
//! across runs.

pub mod clock;
pub mod error;
pub mod events;
pub mod rng;
pub mod save;
pub mod scene;

pub use clock::FrameClock;
pub use error::RuntimeError;
pub use events::{EventBus, EventListener, GameEvent, Topic};
pub use rng::SeededCombatRng;
pub use save::SaveRepository;
pub use scene::{
    BattleScene, EncounterSpec, GameContent, GameOverScene, InputSource, Scene, SceneContext,
    SceneController, SceneOutcome, SceneRequest, WorldScene,
};
