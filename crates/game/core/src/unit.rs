//! Combat units: the player and enemy roster members.

use core::fmt;

use crate::actor::{ActorSprite, Direction, PixelPoint};
use crate::stats::Meter;

/// Stable identifier for a unit within one battle.
///
/// Allocated by the roster arena and never reused; removing a unit
/// invalidates only its position in the turn order, not anyone's identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u32);

impl UnitId {
    /// Reserved identifier for the player-side unit.
    pub const PLAYER: Self = Self(0);

    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What side of the battle a unit fights on.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitKind {
    Player,
    /// Enemy archetype key, e.g. `"devil"`; resolves against the content
    /// catalog.
    Enemy { archetype: String },
}

/// Equipped weapon: a name mapped to its attack power.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    pub name: String,
    pub power: u32,
}

/// One equipped armor piece: a name mapped to its defense power.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Armor {
    pub name: String,
    pub power: u32,
}

/// Blueprint for one enemy at battle start, already scaled to the difficulty
/// tier of the originating map region.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitSpec {
    pub archetype: String,
    pub name: String,
    pub level: u32,
    pub health: u32,
    pub attack_power: u32,
    pub experience_reward: u32,
    pub gold_reward: u32,
}

impl UnitSpec {
    /// Scales base archetype numbers to a map region's difficulty tier.
    ///
    /// Tier 1 is the baseline; each tier above it adds vitals, power, and
    /// reward value.
    pub fn scaled(
        archetype: impl Into<String>,
        name: impl Into<String>,
        base_health: u32,
        base_power: u32,
        base_experience: u32,
        base_gold: u32,
        tier: u32,
    ) -> Self {
        let tier = tier.max(1);
        let above = tier - 1;
        Self {
            archetype: archetype.into(),
            name: name.into(),
            level: tier,
            health: base_health + above * 5,
            attack_power: base_power + above * 2,
            experience_reward: base_experience + above * 4,
            gold_reward: base_gold + above * 6,
        }
    }
}

/// A combatant: vitals, equipment, derived combat numbers, and the sprite
/// state machine that animates it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatUnit {
    pub id: UnitId,
    pub name: String,
    pub kind: UnitKind,
    pub health: Meter,
    /// Player only; enemies carry an empty meter.
    pub magic: Meter,
    pub level: u32,
    pub experience_to_next: u32,
    pub weapon: Option<Weapon>,
    pub armor: Vec<Armor>,
    pub attack_points: u32,
    pub defense_points: u32,
    /// Granted to the victor when this unit falls. Zero for the player.
    pub experience_reward: u32,
    pub gold_reward: u32,
    pub sprite: ActorSprite,
}

impl CombatUnit {
    /// Builds an enemy from its scaled spec, parked in a battle slot.
    pub fn enemy(id: UnitId, spec: &UnitSpec, slot: PixelPoint) -> Self {
        let mut sprite = ActorSprite::at_anchor(slot, Direction::Right);
        sprite.enter_battle(slot, Direction::Right);
        Self {
            id,
            name: spec.name.clone(),
            kind: UnitKind::Enemy {
                archetype: spec.archetype.clone(),
            },
            health: Meter::full(spec.health),
            magic: Meter::default(),
            level: spec.level,
            experience_to_next: 0,
            weapon: None,
            armor: Vec::new(),
            attack_points: spec.attack_power,
            defense_points: 0,
            experience_reward: spec.experience_reward,
            gold_reward: spec.gold_reward,
            sprite,
        }
    }

    /// Sum of equipped armor power, the flat reduction applied to incoming
    /// enemy damage.
    pub fn armor_sum(&self) -> u32 {
        self.armor.iter().map(|piece| piece.power).sum()
    }

    /// Attack power of the equipped weapon; zero bare-handed.
    pub fn weapon_power(&self) -> u32 {
        self.weapon.as_ref().map_or(0, |weapon| weapon.power)
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.health.is_empty()
    }
}
