//! Combat roll resolution.
//!
//! Pure functions that turn stats plus dice into hit outcomes. Randomness is
//! injected through [`CombatRng`] so the battle engine stays deterministic
//! under test; the runtime supplies a seeded PRNG implementation.

mod damage;
mod hit;
mod rng;

pub use damage::{roll_enemy_hit, roll_fire_blast};
pub use hit::{HitOutcome, roll_player_hit};
pub use rng::CombatRng;
