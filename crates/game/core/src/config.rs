use core::time::Duration;

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Pixel distance of the attack lunge animation.
    pub attack_lunge_px: f32,
    /// Pixel distance a unit is shoved while knocked back.
    pub knockback_px: f32,
}

impl GameConfig {
    // ===== grid and scheduling =====
    /// Edge length of one map tile in pixels. Resting actors sit on exact
    /// multiples of this.
    pub const TILE_SIZE: i32 = 32;
    /// Target update rate of the cooperative tick loop.
    pub const TICK_RATE: u32 = 60;
    /// Elapsed time fed to one fixed-timestep update.
    pub const TICK: Duration = Duration::from_nanos(1_000_000_000 / Self::TICK_RATE as u64);

    // ===== leveling =====
    /// Player level at which a second queued action per turn unlocks.
    pub const TWO_ACTIONS_LEVEL: u32 = 3;
    /// Maximum health grows by 1/4 (floored) on level-up.
    pub const HEALTH_GROWTH_DIVISOR: u32 = 4;
    /// Maximum magic grows by 1/5 (floored) on level-up.
    pub const MAGIC_GROWTH_DIVISOR: u32 = 5;

    // ===== animation timing =====
    /// Full out-and-back duration of the player attack lunge.
    pub const ATTACK_ANIMATION: Duration = Duration::from_millis(400);
    /// Full out-and-back duration of an enemy attack lunge.
    pub const ENEMY_ATTACK_ANIMATION: Duration = Duration::from_millis(400);
    /// Shove-and-return duration of the knocked-back reaction.
    pub const KNOCKBACK_ANIMATION: Duration = Duration::from_millis(300);
    /// Fade-out duration of a defeated unit's death animation.
    pub const DEATH_FADE: Duration = Duration::from_millis(600);
    /// Walking speed between tiles, in pixels per second.
    pub const WALK_SPEED: f32 = 128.0;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ATTACK_LUNGE_PX: f32 = 24.0;
    pub const DEFAULT_KNOCKBACK_PX: f32 = 16.0;

    pub fn new() -> Self {
        Self {
            attack_lunge_px: Self::DEFAULT_ATTACK_LUNGE_PX,
            knockback_px: Self::DEFAULT_KNOCKBACK_PX,
        }
    }

    /// Experience required to advance past `level`.
    ///
    /// The threshold is `floor(level * 50 * 0.75)`, computed in integer
    /// arithmetic as `level * 150 / 4`.
    pub const fn experience_threshold(level: u32) -> u32 {
        level * 150 / 4
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
