//! Enemy attack and spell damage.

use super::hit::HitOutcome;
use super::rng::CombatRng;

/// Rolls an enemy attack against the player.
///
/// The raw roll spans `0..=attack_power`; the sum of equipped armor power is
/// then subtracted. A zero result after reduction is a legitimate,
/// distinguishable miss, so a well-armored player shrugs off weak attackers
/// outright.
pub fn roll_enemy_hit(attack_power: u32, armor_sum: u32, rng: &mut dyn CombatRng) -> HitOutcome {
    let raw = rng.roll_range(0, attack_power);
    match raw.saturating_sub(armor_sum) {
        0 => HitOutcome::Miss,
        damage => HitOutcome::Hit(damage),
    }
}

/// Rolls Fire Blast damage for one target.
///
/// Every living enemy takes an independently rolled hit in the half-to-full
/// range of the spell's power; the spell itself cannot miss.
pub fn roll_fire_blast(spell_power: u32, rng: &mut dyn CombatRng) -> HitOutcome {
    match rng.roll_range(spell_power / 2, spell_power) {
        0 => HitOutcome::Miss,
        damage => HitOutcome::Hit(damage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(u32);

    impl CombatRng for Fixed {
        fn roll_range(&mut self, lo: u32, hi: u32) -> u32 {
            self.0.clamp(lo, hi)
        }
        fn one_in(&mut self, _n: u32) -> bool {
            false
        }
    }

    #[test]
    fn armor_reduces_to_a_distinguishable_miss() {
        assert_eq!(roll_enemy_hit(6, 10, &mut Fixed(6)), HitOutcome::Miss);
        assert_eq!(roll_enemy_hit(6, 2, &mut Fixed(6)), HitOutcome::Hit(4));
    }

    #[test]
    fn fire_blast_stays_in_half_to_full_range() {
        assert_eq!(roll_fire_blast(40, &mut Fixed(0)), HitOutcome::Hit(20));
        assert_eq!(roll_fire_blast(40, &mut Fixed(u32::MAX)), HitOutcome::Hit(40));
    }
}
