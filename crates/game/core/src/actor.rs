//! Movement and animation state machine shared by player and NPC sprites.
//!
//! An [`ActorSprite`] sits on a pixel anchor that is an exact multiple of the
//! tile size whenever it rests. Animations never move the anchor; they play
//! out in a transient offset that returns to zero, so the grid-alignment
//! invariant holds structurally rather than by fixup. Completion is reported
//! through [`AnimationSignal`]s polled once per tick; nothing here blocks.

use core::time::Duration;

use crate::config::GameConfig;

/// Facing of a directional sprite.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector in screen coordinates (y grows downward).
    pub fn unit(self) -> (f32, f32) {
        match self {
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Integer pixel position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position of the given tile's top-left corner.
    pub const fn from_tile(tile_x: i32, tile_y: i32) -> Self {
        Self {
            x: tile_x * GameConfig::TILE_SIZE,
            y: tile_y * GameConfig::TILE_SIZE,
        }
    }

    /// Whether both coordinates sit on exact tile multiples.
    pub fn is_tile_aligned(self) -> bool {
        self.x % GameConfig::TILE_SIZE == 0 && self.y % GameConfig::TILE_SIZE == 0
    }
}

/// Animation/movement state tag.
#[derive(Clone, Copy, Debug, PartialEq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorMode {
    /// Standing on the overworld grid.
    Resting,
    /// Walking toward the next tile.
    Moving { destination: PixelPoint },
    /// Standing in a battle slot.
    BattleResting,
    /// Player attack lunge.
    Attacking { elapsed: Duration },
    /// Enemy attack lunge.
    EnemyAttacking { elapsed: Duration },
    /// Shoved back by a hit, returning to the slot.
    KnockedBack { elapsed: Duration },
    /// Death fade-out; terminal once the fade completes.
    FadingDead { elapsed: Duration },
    /// Post-victory celebration loop.
    VictoryDancing { elapsed: Duration },
}

/// Raised by [`ActorSprite::update`] when an animation crosses a boundary the
/// battle engine cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationSignal {
    /// A walk reached its destination tile.
    Arrived,
    /// An attack lunge (player or enemy) returned to its slot.
    AttackFinished,
    /// The knock-back shove settled.
    KnockbackFinished,
    /// A death fade reached full transparency.
    FadeFinished,
}

/// Directional sprite with a grid-aligned anchor and a transient animation
/// offset.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorSprite {
    anchor: PixelPoint,
    offset: (f32, f32),
    direction: Direction,
    mode: ActorMode,
    lunge_px: f32,
    knockback_px: f32,
}

impl ActorSprite {
    /// Creates a resting sprite on the given tile.
    pub fn at_tile(tile_x: i32, tile_y: i32, direction: Direction) -> Self {
        Self::at_anchor(PixelPoint::from_tile(tile_x, tile_y), direction)
    }

    /// Creates a resting sprite at an arbitrary pixel anchor (battle slots).
    pub fn at_anchor(anchor: PixelPoint, direction: Direction) -> Self {
        let config = GameConfig::default();
        Self {
            anchor,
            offset: (0.0, 0.0),
            direction,
            mode: ActorMode::Resting,
            lunge_px: config.attack_lunge_px,
            knockback_px: config.knockback_px,
        }
    }

    pub fn mode(&self) -> ActorMode {
        self.mode
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn face(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn anchor(&self) -> PixelPoint {
        self.anchor
    }

    /// Anchor plus the transient animation offset.
    pub fn pixel_position(&self) -> (f32, f32) {
        (
            self.anchor.x as f32 + self.offset.0,
            self.anchor.y as f32 + self.offset.1,
        )
    }

    /// Sprite opacity: 255 everywhere except during the death fade.
    pub fn alpha(&self) -> u8 {
        match self.mode {
            ActorMode::FadingDead { elapsed } => {
                let total = GameConfig::DEATH_FADE.as_secs_f32();
                let remaining = (1.0 - elapsed.as_secs_f32() / total).clamp(0.0, 1.0);
                (remaining * 255.0) as u8
            }
            _ => 255,
        }
    }

    pub fn is_resting(&self) -> bool {
        matches!(self.mode, ActorMode::Resting | ActorMode::BattleResting)
    }

    // ===== mode transitions =====

    /// Starts walking one tile in the given direction.
    pub fn begin_move(&mut self, direction: Direction) {
        let (dx, dy) = direction.unit();
        self.direction = direction;
        self.mode = ActorMode::Moving {
            destination: PixelPoint::new(
                self.anchor.x + (dx as i32) * GameConfig::TILE_SIZE,
                self.anchor.y + (dy as i32) * GameConfig::TILE_SIZE,
            ),
        };
    }

    pub fn enter_battle(&mut self, slot: PixelPoint, direction: Direction) {
        self.anchor = slot;
        self.offset = (0.0, 0.0);
        self.direction = direction;
        self.mode = ActorMode::BattleResting;
    }

    pub fn begin_attack(&mut self) {
        self.mode = ActorMode::Attacking {
            elapsed: Duration::ZERO,
        };
    }

    pub fn begin_enemy_attack(&mut self) {
        self.mode = ActorMode::EnemyAttacking {
            elapsed: Duration::ZERO,
        };
    }

    pub fn knock_back(&mut self) {
        self.mode = ActorMode::KnockedBack {
            elapsed: Duration::ZERO,
        };
    }

    pub fn begin_death_fade(&mut self) {
        self.mode = ActorMode::FadingDead {
            elapsed: Duration::ZERO,
        };
    }

    pub fn begin_victory_dance(&mut self) {
        self.mode = ActorMode::VictoryDancing {
            elapsed: Duration::ZERO,
        };
    }

    // ===== per-tick update =====

    /// Advances the current animation by `dt`.
    ///
    /// Returns at most one signal per call; a large `dt` completes the
    /// animation in a single step rather than looping.
    pub fn update(&mut self, dt: Duration) -> Option<AnimationSignal> {
        match self.mode {
            ActorMode::Resting | ActorMode::BattleResting => None,
            ActorMode::Moving { destination } => self.step_walk(destination, dt),
            ActorMode::Attacking { elapsed } => self.step_lunge(
                elapsed + dt,
                GameConfig::ATTACK_ANIMATION,
                self.lunge_px,
                false,
            ),
            ActorMode::EnemyAttacking { elapsed } => self.step_lunge(
                elapsed + dt,
                GameConfig::ENEMY_ATTACK_ANIMATION,
                self.lunge_px,
                true,
            ),
            ActorMode::KnockedBack { elapsed } => {
                self.step_knockback(elapsed + dt, GameConfig::KNOCKBACK_ANIMATION)
            }
            ActorMode::FadingDead { elapsed } => {
                let was_done = elapsed >= GameConfig::DEATH_FADE;
                let elapsed = elapsed + dt;
                self.mode = ActorMode::FadingDead { elapsed };
                if !was_done && elapsed >= GameConfig::DEATH_FADE {
                    Some(AnimationSignal::FadeFinished)
                } else {
                    None
                }
            }
            ActorMode::VictoryDancing { elapsed } => {
                let elapsed = elapsed + dt;
                // gentle bob, looping forever
                let phase = elapsed.as_secs_f32() * core::f32::consts::TAU;
                self.offset = (0.0, -4.0 * phase.sin().abs());
                self.mode = ActorMode::VictoryDancing { elapsed };
                None
            }
        }
    }

    fn step_walk(&mut self, destination: PixelPoint, dt: Duration) -> Option<AnimationSignal> {
        let step = GameConfig::WALK_SPEED * dt.as_secs_f32();
        let (dx, dy) = (
            destination.x as f32 - (self.anchor.x as f32 + self.offset.0),
            destination.y as f32 - (self.anchor.y as f32 + self.offset.1),
        );
        let distance = (dx * dx + dy * dy).sqrt();
        if distance <= step {
            self.anchor = destination;
            self.offset = (0.0, 0.0);
            self.mode = ActorMode::Resting;
            return Some(AnimationSignal::Arrived);
        }
        self.offset.0 += step * dx / distance;
        self.offset.1 += step * dy / distance;
        self.mode = ActorMode::Moving { destination };
        None
    }

    /// Triangular out-and-back lunge along the facing direction.
    fn step_lunge(
        &mut self,
        elapsed: Duration,
        total: Duration,
        amplitude: f32,
        enemy: bool,
    ) -> Option<AnimationSignal> {
        if elapsed >= total {
            self.offset = (0.0, 0.0);
            self.mode = ActorMode::BattleResting;
            return Some(AnimationSignal::AttackFinished);
        }
        let progress = elapsed.as_secs_f32() / total.as_secs_f32();
        let reach = amplitude * (1.0 - (2.0 * progress - 1.0).abs());
        let (dx, dy) = self.direction.unit();
        self.offset = (dx * reach, dy * reach);
        self.mode = if enemy {
            ActorMode::EnemyAttacking { elapsed }
        } else {
            ActorMode::Attacking { elapsed }
        };
        None
    }

    fn step_knockback(&mut self, elapsed: Duration, total: Duration) -> Option<AnimationSignal> {
        if elapsed >= total {
            self.offset = (0.0, 0.0);
            self.mode = ActorMode::BattleResting;
            return Some(AnimationSignal::KnockbackFinished);
        }
        let progress = elapsed.as_secs_f32() / total.as_secs_f32();
        let reach = self.knockback_px * (1.0 - (2.0 * progress - 1.0).abs());
        let (dx, dy) = self.direction.opposite().unit();
        self.offset = (dx * reach, dy * reach);
        self.mode = ActorMode::KnockedBack { elapsed };
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resting_positions_are_tile_aligned() {
        let sprite = ActorSprite::at_tile(5, 9, Direction::Down);
        assert!(sprite.anchor().is_tile_aligned());
        assert_eq!(sprite.pixel_position(), (160.0, 288.0));
    }

    #[test]
    fn walk_crosses_one_tile_and_realigns() {
        let mut sprite = ActorSprite::at_tile(1, 1, Direction::Down);
        sprite.begin_move(Direction::Right);

        // Mid-walk the offset is fractional; the anchor has not moved.
        assert_eq!(sprite.update(Duration::from_millis(100)), None);
        assert_eq!(sprite.anchor(), PixelPoint::from_tile(1, 1));
        assert!(sprite.pixel_position().0 > 32.0);

        // A generous step lands exactly on the destination tile.
        assert_eq!(
            sprite.update(Duration::from_secs(1)),
            Some(AnimationSignal::Arrived)
        );
        assert_eq!(sprite.anchor(), PixelPoint::from_tile(2, 1));
        assert!(sprite.anchor().is_tile_aligned());
        assert!(sprite.is_resting());
    }

    #[test]
    fn attack_lunge_signals_once_and_returns_to_rest() {
        let mut sprite = ActorSprite::at_anchor(PixelPoint::new(64, 96), Direction::Left);
        sprite.begin_attack();

        assert_eq!(sprite.update(Duration::from_millis(200)), None);
        assert!(sprite.pixel_position().0 < 64.0);

        assert_eq!(
            sprite.update(GameConfig::ATTACK_ANIMATION),
            Some(AnimationSignal::AttackFinished)
        );
        assert_eq!(sprite.pixel_position(), (64.0, 96.0));
        assert_eq!(sprite.mode(), ActorMode::BattleResting);
    }

    #[test]
    fn death_fade_signals_exactly_once() {
        let mut sprite = ActorSprite::at_anchor(PixelPoint::new(0, 0), Direction::Down);
        sprite.begin_death_fade();
        assert_eq!(
            sprite.update(GameConfig::DEATH_FADE),
            Some(AnimationSignal::FadeFinished)
        );
        assert_eq!(sprite.alpha(), 0);
        assert_eq!(sprite.update(Duration::from_millis(16)), None);
    }
}
