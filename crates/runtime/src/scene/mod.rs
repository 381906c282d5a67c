//! Scenes and the controller that schedules them.
//!
//! Exactly one scene is active at a time, and it holds the only mutable
//! handle to the persisted [`GameData`] for the duration of its updates.
//! Before any transition completes the outgoing scene's `on_exit` flushes
//! its results back into the snapshot, so the next scene never observes
//! stale data.

mod battle;
mod game_over;
mod world;

pub use battle::BattleScene;
pub use game_over::GameOverScene;
pub use world::WorldScene;

use std::sync::Arc;
use std::time::Duration;

use thornvale_core::{GameConfig, GameData, InputSnapshot};
use thornvale_content::{EnemyCatalog, ItemCatalog, RuntimeSettings, TileMapDocument};

use crate::clock::FrameClock;
use crate::error::RuntimeError;
use crate::events::{EventBus, GameEvent};
use crate::rng::SeededCombatRng;
use crate::save::SaveRepository;

/// Everything loaded once at startup and shared read-only by scenes.
pub struct GameContent {
    pub map: TileMapDocument,
    pub enemies: EnemyCatalog,
    pub items: ItemCatalog,
}

/// One encounter request: which enemies, at what difficulty tier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncounterSpec {
    pub tier: u32,
    pub kinds: Vec<String>,
}

/// What a scene asks the controller to do after a tick.
pub enum SceneOutcome {
    Continue,
    Transition(SceneRequest),
    Quit,
}

/// Which scene to activate next.
pub enum SceneRequest {
    World,
    Battle(EncounterSpec),
    GameOver,
}

/// Exclusive handles a scene receives for one update.
pub struct SceneContext<'a> {
    pub data: &'a mut GameData,
    pub bus: &'a mut EventBus,
}

/// A top-level scene: town, battle, game over.
pub trait Scene {
    fn name(&self) -> &'static str;

    fn on_enter(&mut self, _ctx: &mut SceneContext<'_>) {}

    /// One fixed-timestep update. Input was sampled before this call and is
    /// identical for every consumer this tick.
    fn update(
        &mut self,
        ctx: &mut SceneContext<'_>,
        input: &InputSnapshot,
        dt: Duration,
    ) -> SceneOutcome;

    /// Flush results into the snapshot; runs before the transition
    /// completes.
    fn on_exit(&mut self, _ctx: &mut SceneContext<'_>) {}
}

/// Supplies one input snapshot per frame, sampled before scene updates.
pub trait InputSource {
    fn sample(&mut self) -> std::io::Result<InputSnapshot>;
}

/// Owns the game data, the bus, and the active scene; runs the fixed-rate
/// cooperative loop.
pub struct SceneController {
    data: GameData,
    bus: EventBus,
    content: Arc<GameContent>,
    active: Box<dyn Scene>,
    clock: FrameClock,
    save: SaveRepository,
    save_slot: String,
    rng_seed: Option<u64>,
    battles_started: u64,
}

impl SceneController {
    /// Starts in the overworld scene.
    pub fn new(
        data: GameData,
        content: Arc<GameContent>,
        settings: &RuntimeSettings,
        save: SaveRepository,
    ) -> Self {
        let active: Box<dyn Scene> = Box::new(WorldScene::new(Arc::clone(&content)));
        Self {
            data,
            bus: EventBus::new(),
            content,
            active,
            clock: FrameClock::new(),
            save,
            save_slot: settings.save_slot.clone(),
            rng_seed: settings.rng_seed,
            battles_started: 0,
        }
    }

    /// Register listeners here before calling [`Self::run`].
    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    pub fn data(&self) -> &GameData {
        &self.data
    }

    pub fn scene_name(&self) -> &'static str {
        self.active.name()
    }

    /// Runs the loop until a scene requests quit: sample input, drain fixed
    /// ticks, sleep off the remainder.
    pub fn run(&mut self, input: &mut dyn InputSource) -> Result<(), RuntimeError> {
        tracing::info!("entering main loop at {} Hz", GameConfig::TICK_RATE);
        loop {
            let snapshot = input.sample()?;
            for _ in 0..self.clock.advance() {
                if self.step(&snapshot, GameConfig::TICK)? {
                    tracing::info!("main loop finished");
                    return Ok(());
                }
            }
            self.clock.sleep_until_next_tick();
        }
    }

    /// One fixed tick. Returns true when the game should quit.
    pub fn step(&mut self, input: &InputSnapshot, dt: Duration) -> Result<bool, RuntimeError> {
        let outcome = {
            let mut ctx = SceneContext {
                data: &mut self.data,
                bus: &mut self.bus,
            };
            self.active.update(&mut ctx, input, dt)
        };
        match outcome {
            SceneOutcome::Continue => Ok(false),
            SceneOutcome::Transition(request) => {
                self.switch_scene(request)?;
                Ok(false)
            }
            SceneOutcome::Quit => {
                self.shutdown()?;
                Ok(true)
            }
        }
    }

    fn switch_scene(&mut self, request: SceneRequest) -> Result<(), RuntimeError> {
        let from = self.active.name();
        {
            let mut ctx = SceneContext {
                data: &mut self.data,
                bus: &mut self.bus,
            };
            self.active.on_exit(&mut ctx);
        }

        self.active = self.build_scene(request)?;
        let to = self.active.name();
        self.data.last_state = to.to_owned();
        self.bus.publish(&GameEvent::SceneChanged {
            from: from.to_owned(),
            to: to.to_owned(),
        });
        tracing::info!(from, to, "scene transition");

        let mut ctx = SceneContext {
            data: &mut self.data,
            bus: &mut self.bus,
        };
        self.active.on_enter(&mut ctx);
        Ok(())
    }

    fn build_scene(&mut self, request: SceneRequest) -> Result<Box<dyn Scene>, RuntimeError> {
        Ok(match request {
            SceneRequest::World => Box::new(WorldScene::new(Arc::clone(&self.content))),
            SceneRequest::Battle(encounter) => {
                // Derive a distinct stream per battle from the configured
                // seed so reruns replay the same fights.
                let seed = self.rng_seed.map(|seed| seed ^ self.battles_started);
                self.battles_started += 1;
                Box::new(BattleScene::new(
                    &self.data,
                    &self.content,
                    &encounter,
                    Box::new(SeededCombatRng::new(seed)),
                )?)
            }
            SceneRequest::GameOver => Box::new(GameOverScene::new()),
        })
    }

    /// Flush the active scene and persist the snapshot.
    fn shutdown(&mut self) -> Result<(), RuntimeError> {
        let mut ctx = SceneContext {
            data: &mut self.data,
            bus: &mut self.bus,
        };
        self.active.on_exit(&mut ctx);
        self.save.save(&self.save_slot, &self.data)?;
        self.bus.publish(&GameEvent::GameSaved);
        Ok(())
    }
}
