//! Battle notifications.
//!
//! The engine records what happened each tick as plain data; the runtime's
//! event bus fans these out to presentation and audio listeners. Nothing in
//! the core depends on who is listening.

use crate::battle::{BattleOutcome, RejectReason};
use crate::combat::HitOutcome;
use crate::unit::UnitId;

/// Named sound-effect keys raised alongside battle beats. Purely advisory;
/// the audio collaborator maps them to assets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "kebab-case")]
pub enum SoundCue {
    CursorMove,
    Confirm,
    Slash,
    EnemyHit,
    PlayerHit,
    Fire,
    Cure,
    PotionGulp,
    RunAway,
    Victory,
    Powerup,
    Death,
}

/// One observable battle beat.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    /// The encounter began with this many enemies.
    BattleStarted { enemies: usize },

    /// A selection was refused (not enough magic, no potion left). A normal
    /// outcome surfaced as an in-battle message, never an error.
    ActionRejected { reason: RejectReason },

    /// The player's attack animation completed and damage was resolved.
    PlayerFinishedAttack { target: UnitId, hit: HitOutcome },

    /// An enemy took damage (or shrugged off a miss).
    EnemyDamaged { unit: UnitId, hit: HitOutcome },

    /// An enemy's health reached zero; its death fade continues visually but
    /// it is already gone from the roster.
    EnemyDefeated {
        unit: UnitId,
        name: String,
        experience: u32,
        gold: u32,
    },

    /// A Fire Blast visual should spawn over this unit.
    SpellEffectSpawned { unit: UnitId },

    /// The Cure spell restored this much health.
    PlayerCured { amount: u32 },

    /// A potion was consumed.
    PotionDrunk { item: String, restored: u32 },

    /// This enemy began its attack lunge.
    EnemyStartedAttack { unit: UnitId },

    /// The player took an enemy hit (possibly a miss).
    PlayerDamaged { attacker: UnitId, hit: HitOutcome },

    /// The player escaped the battle.
    RanAway,

    /// Every enemy is defeated.
    BattleWon,

    /// Accumulated gold was granted (exactly once per battle).
    GoldAwarded { amount: u32 },

    /// Accumulated experience was applied (exactly once per battle).
    ExperienceAwarded { amount: u32 },

    /// The experience award crossed the threshold.
    LeveledUp { level: u32 },

    /// Reaching level 3 unlocked the second queued action per turn.
    TwoActionsUnlocked,

    /// The player's health reached zero.
    PlayerDied,

    /// The fade-out finished; the encounter is over.
    BattleEnded { outcome: BattleOutcome },

    /// Advisory audio cue.
    Sound(SoundCue),
}
