//! Player melee hit resolution.

use super::rng::CombatRng;

/// Chance denominator for a player melee swing going wide.
const MELEE_MISS_ONE_IN: u32 = 8;

/// Outcome of a single attack attempt.
///
/// A miss is a first-class value, not damage zero: presentation renders the
/// two differently and the engine never constructs `Hit(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HitOutcome {
    Miss,
    Hit(u32),
}

impl HitOutcome {
    pub fn is_miss(self) -> bool {
        matches!(self, HitOutcome::Miss)
    }

    /// Damage dealt; zero for a miss.
    pub fn damage(self) -> u32 {
        match self {
            HitOutcome::Miss => 0,
            HitOutcome::Hit(amount) => amount,
        }
    }
}

/// Rolls a player melee swing.
///
/// Damage is non-negative and never exceeds `weapon_power`. The lower bound
/// rises with level so seasoned characters swing less erratically. A
/// weaponless or zero-power swing always misses.
pub fn roll_player_hit(weapon_power: u32, level: u32, rng: &mut dyn CombatRng) -> HitOutcome {
    if weapon_power == 0 {
        return HitOutcome::Miss;
    }
    if rng.one_in(MELEE_MISS_ONE_IN) {
        return HitOutcome::Miss;
    }

    let floor = (1 + level / 2).min(weapon_power);
    HitOutcome::Hit(rng.roll_range(floor, weapon_power))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MinRoll;

    impl CombatRng for MinRoll {
        fn roll_range(&mut self, lo: u32, _hi: u32) -> u32 {
            lo
        }
        fn one_in(&mut self, _n: u32) -> bool {
            false
        }
    }

    struct AlwaysMiss;

    impl CombatRng for AlwaysMiss {
        fn roll_range(&mut self, _lo: u32, hi: u32) -> u32 {
            hi
        }
        fn one_in(&mut self, _n: u32) -> bool {
            true
        }
    }

    #[test]
    fn hit_is_bounded_and_nonzero() {
        let outcome = roll_player_hit(9, 1, &mut MinRoll);
        assert_eq!(outcome, HitOutcome::Hit(1));
    }

    #[test]
    fn high_level_raises_the_floor_without_exceeding_power() {
        let outcome = roll_player_hit(3, 20, &mut MinRoll);
        assert_eq!(outcome, HitOutcome::Hit(3));
    }

    #[test]
    fn miss_roll_and_zero_power_both_miss() {
        assert!(roll_player_hit(9, 1, &mut AlwaysMiss).is_miss());
        assert!(roll_player_hit(0, 1, &mut MinRoll).is_miss());
    }
}
