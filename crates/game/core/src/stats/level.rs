//! Experience and level-up resolution.

use crate::config::GameConfig;

/// Outcome of applying a battle's experience award.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LevelUp {
    /// Not enough experience to level; the remaining threshold is stored.
    None { remaining: u32 },
    /// The player advanced one level.
    Leveled {
        new_level: u32,
        /// Flat increase applied to maximum health (25%, floored).
        health_bonus: u32,
        /// Flat increase applied to maximum magic (20%, floored).
        magic_bonus: u32,
        /// Experience still required to advance past `new_level`.
        new_threshold: u32,
    },
}

/// Applies an experience award against the current experience-to-next-level
/// counter.
///
/// The award is subtracted from the counter. If the counter is exhausted the
/// overshoot seeds the next threshold: the level increments once, maximum
/// health grows by a quarter and maximum magic by a fifth (both floored), and
/// the new counter is `floor(new_level * 50 * 0.75) - overshoot`.
///
/// At most one level is gained per call; the threshold formula already prices
/// the next level well above any single battle's award.
pub fn apply_experience(
    level: u32,
    experience_to_next: u32,
    award: u32,
    health_maximum: u32,
    magic_maximum: u32,
) -> LevelUp {
    if award < experience_to_next {
        return LevelUp::None {
            remaining: experience_to_next - award,
        };
    }

    let overshoot = award - experience_to_next;
    let new_level = level + 1;
    LevelUp::Leveled {
        new_level,
        health_bonus: health_maximum / GameConfig::HEALTH_GROWTH_DIVISOR,
        magic_bonus: magic_maximum / GameConfig::MAGIC_GROWTH_DIVISOR,
        new_threshold: GameConfig::experience_threshold(new_level).saturating_sub(overshoot),
    }
}
