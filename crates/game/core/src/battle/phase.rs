//! Battle phases and their fixed delays.

use core::time::Duration;

/// Top-level battle state.
///
/// The engine holds exactly one of these at a time; every transition goes
/// through `BattleEngine::enter`, which also runs the phase's entry effects
/// (so grants like gold and experience happen exactly once).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "kebab-case")]
pub enum BattlePhase {
    /// Fade from the overworld into the battle.
    TransitionIn,
    /// Main menu: attack / items / magic / run.
    SelectAction,
    /// Arrow over the enemy to strike.
    SelectEnemy,
    /// Consumable submenu.
    SelectItem,
    /// Spell submenu.
    SelectMagic,
    /// Player lunge animation in flight.
    PlayerAttack,
    /// Damage number lingering over the struck enemy.
    EnemyDamaged,
    /// Cure resolved; healing number lingering.
    CureSpell,
    /// Fire Blast resolved across the roster.
    FireSpell,
    DrinkHealingPotion,
    DrinkEtherPotion,
    /// Current enemy's lunge animation in flight.
    EnemyAttack,
    /// Damage number lingering over the player.
    PlayerDamaged,
    /// Escape message before leaving.
    RunAway,
    BattleWon,
    ShowGold,
    ShowExperience,
    LevelUp,
    TwoActionsUnlock,
    /// Player fell; fades into the death scene.
    DeathFade,
    /// Fade back out; the scene exits when this completes.
    TransitionOut,
}

impl BattlePhase {
    /// Fixed dwell time for timer-gated phases.
    ///
    /// `None` marks phases that leave on input (the select menus) or on an
    /// animation completion signal (the two attack phases).
    pub fn fixed_delay(self) -> Option<Duration> {
        let millis = match self {
            BattlePhase::TransitionIn => 800,
            BattlePhase::EnemyDamaged => 1000,
            BattlePhase::CureSpell | BattlePhase::FireSpell => 1500,
            BattlePhase::DrinkHealingPotion | BattlePhase::DrinkEtherPotion => 1000,
            BattlePhase::PlayerDamaged => 600,
            BattlePhase::RunAway => 1500,
            BattlePhase::BattleWon => 1800,
            BattlePhase::ShowGold => 1800,
            BattlePhase::ShowExperience => 2200,
            BattlePhase::LevelUp => 2200,
            BattlePhase::TwoActionsUnlock => 3000,
            BattlePhase::DeathFade => 1500,
            BattlePhase::TransitionOut => 800,
            BattlePhase::SelectAction
            | BattlePhase::SelectEnemy
            | BattlePhase::SelectItem
            | BattlePhase::SelectMagic
            | BattlePhase::PlayerAttack
            | BattlePhase::EnemyAttack => return None,
        };
        Some(Duration::from_millis(millis))
    }
}

/// How the encounter ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "kebab-case")]
pub enum BattleOutcome {
    /// All enemies defeated; rewards were granted.
    Victory,
    /// The player ran away.
    Retreat,
    /// The player fell.
    Defeat,
}
