/// Dice source for combat rolls.
///
/// The engine never touches a PRNG directly; every roll goes through this
/// trait. Tests implement it with scripted values to pin down outcomes, the
/// runtime wraps a seeded `StdRng`.
pub trait CombatRng {
    /// Uniform roll in `lo..=hi`. Callers guarantee `lo <= hi`.
    fn roll_range(&mut self, lo: u32, hi: u32) -> u32;

    /// Returns true with probability `1/n`. Callers guarantee `n >= 1`.
    fn one_in(&mut self, n: u32) -> bool;
}
