//! Overworld scene: the loaded tile map plus encounter triggers.
//!
//! Deliberately thin. Movement and its collision grid live behind this
//! scene's interface; what matters here is loading the map document,
//! deriving collision rectangles, and handing encounters to the
//! controller.

use std::sync::Arc;
use std::time::Duration;

use thornvale_core::{ActorSprite, Direction, InputSnapshot, LogicalKey};
use thornvale_content::Rect;

use super::{EncounterSpec, GameContent, Scene, SceneContext, SceneOutcome, SceneRequest};
use crate::events::GameEvent;

/// Town/overworld scene.
pub struct WorldScene {
    content: Arc<GameContent>,
    collision: Vec<Rect>,
    player: ActorSprite,
    encounters: Vec<EncounterSpec>,
    next_encounter: usize,
}

impl WorldScene {
    pub fn new(content: Arc<GameContent>) -> Self {
        let map = &content.map;
        let collision = map.collision_rects();

        let spawn_tile = map
            .object_group("spawns")
            .and_then(|group| group.of_kind("player").next())
            .map(|object| {
                (
                    (object.x / map.tile_width.max(1) as f32) as i32,
                    (object.y / map.tile_height.max(1) as f32) as i32,
                )
            })
            .unwrap_or((1, 1));
        let player = ActorSprite::at_tile(spawn_tile.0, spawn_tile.1, Direction::Down);

        let mut encounters = Vec::new();
        for group in map.object_groups() {
            for object in group.of_kind("encounter") {
                let tier = object
                    .property("tier")
                    .and_then(|value| value.as_int())
                    .unwrap_or(1) as u32;
                let kinds: Vec<String> = object
                    .property("enemies")
                    .and_then(|value| value.as_str())
                    .map(|list| {
                        list.split(',')
                            .map(str::trim)
                            .filter(|kind| !kind.is_empty())
                            .map(str::to_owned)
                            .collect()
                    })
                    .unwrap_or_default();
                if !kinds.is_empty() {
                    encounters.push(EncounterSpec { tier, kinds });
                }
            }
        }
        if encounters.is_empty() {
            // A map without authored encounters still fights something.
            if let Some(kind) = content.enemies.kinds().next() {
                encounters.push(EncounterSpec {
                    tier: 1,
                    kinds: vec![kind.to_owned(), kind.to_owned()],
                });
            }
        }

        tracing::debug!(
            map = %map.name,
            collision_rects = collision.len(),
            encounters = encounters.len(),
            "world scene ready"
        );

        Self {
            content,
            collision,
            player,
            encounters,
            next_encounter: 0,
        }
    }

    pub fn collision_rects(&self) -> &[Rect] {
        &self.collision
    }
}

impl Scene for WorldScene {
    fn name(&self) -> &'static str {
        "world"
    }

    fn update(
        &mut self,
        ctx: &mut SceneContext<'_>,
        input: &InputSnapshot,
        dt: Duration,
    ) -> SceneOutcome {
        if input.pressed(LogicalKey::Quit) {
            return SceneOutcome::Quit;
        }

        for (key, direction) in [
            (LogicalKey::Up, Direction::Up),
            (LogicalKey::Down, Direction::Down),
            (LogicalKey::Left, Direction::Left),
            (LogicalKey::Right, Direction::Right),
        ] {
            if input.pressed(key) {
                self.player.face(direction);
            }
        }

        if input.pressed(LogicalKey::Confirm) && !self.encounters.is_empty() {
            let encounter = self.encounters[self.next_encounter % self.encounters.len()].clone();
            self.next_encounter += 1;
            ctx.bus.publish(&GameEvent::EncounterTriggered {
                tier: encounter.tier,
            });
            return SceneOutcome::Transition(SceneRequest::Battle(encounter));
        }

        let _ = self.player.update(dt);
        SceneOutcome::Continue
    }

    fn on_exit(&mut self, ctx: &mut SceneContext<'_>) {
        ctx.data.last_location = self.content.map.name.clone();
        ctx.data.last_direction = self.player.direction();
    }
}
