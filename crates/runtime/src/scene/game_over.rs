//! Game-over scene after a lost battle.

use std::time::Duration;

use thornvale_core::{InputSnapshot, LogicalKey, Meter};

use super::{Scene, SceneContext, SceneOutcome, SceneRequest};

/// Terminal scene; confirm revives back into the overworld.
pub struct GameOverScene {
    _private: (),
}

impl GameOverScene {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Default for GameOverScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for GameOverScene {
    fn name(&self) -> &'static str {
        "game-over"
    }

    fn update(
        &mut self,
        _ctx: &mut SceneContext<'_>,
        input: &InputSnapshot,
        _dt: Duration,
    ) -> SceneOutcome {
        if input.pressed(LogicalKey::Quit) {
            return SceneOutcome::Quit;
        }
        if input.pressed(LogicalKey::Confirm) {
            return SceneOutcome::Transition(SceneRequest::World);
        }
        SceneOutcome::Continue
    }

    fn on_exit(&mut self, ctx: &mut SceneContext<'_>) {
        // Revive with full vitals; gold and items are kept.
        ctx.data.player.health = Meter::full(ctx.data.player.health.maximum);
        ctx.data.player.magic = Meter::full(ctx.data.player.magic.maximum);
    }
}
