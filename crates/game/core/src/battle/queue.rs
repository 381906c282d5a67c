//! Queued player actions and resource reservation.
//!
//! Selection and execution are separated by animation time, so resources are
//! *reserved* when an action is queued and only *spent* when it executes. A
//! second queued spell therefore cannot over-draw magic the first one has
//! claimed but not yet burned. A reservation is released either way once the
//! action leaves the queue: the execute path spends the resource alongside
//! the release, the skip path refunds it untouched.

use std::collections::VecDeque;

use super::engine::Loadout;
use super::{ETHER_POTION, HEALING_POTION};
use crate::unit::UnitId;

/// One queued player action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleAction {
    /// Melee swing at a chosen enemy. The id may go stale if an earlier
    /// action kills the target; the engine retargets at execution.
    Attack { target: UnitId },
    CureSpell,
    FireBlast,
    HealingPotion,
    EtherPotion,
}

impl BattleAction {
    /// Magic this action reserves at selection time.
    pub fn magic_cost(self, loadout: &Loadout) -> u32 {
        match self {
            BattleAction::CureSpell => loadout.cure.cost,
            BattleAction::FireBlast => loadout.fire.cost,
            _ => 0,
        }
    }

    /// Consumable this action reserves, if any.
    pub fn item_name(self) -> Option<&'static str> {
        match self {
            BattleAction::HealingPotion => Some(HEALING_POTION),
            BattleAction::EtherPotion => Some(ETHER_POTION),
            _ => None,
        }
    }
}

/// Why a selection was refused. Reported to the player as an in-battle
/// message, not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RejectReason {
    /// Current magic minus already-reserved magic cannot cover the cost.
    NotEnoughMagic,
    /// Carried quantity minus queued uses is zero.
    OutOfPotions { item: String },
}

/// FIFO of queued actions plus the running reservation totals.
#[derive(Clone, Debug, Default)]
pub struct ActionQueue {
    actions: VecDeque<BattleAction>,
    reserved_magic: u32,
    reserved_healing: u32,
    reserved_ether: u32,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Magic currently claimed by queued-but-unexecuted actions.
    pub fn reserved_magic(&self) -> u32 {
        self.reserved_magic
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Attempts to queue an action, reserving its costs against what is
    /// actually available right now.
    pub fn try_queue(
        &mut self,
        action: BattleAction,
        magic_current: u32,
        healing_potions: u32,
        ether_potions: u32,
        loadout: &Loadout,
    ) -> Result<(), RejectReason> {
        let cost = action.magic_cost(loadout);
        if magic_current < self.reserved_magic + cost {
            return Err(RejectReason::NotEnoughMagic);
        }
        match action.item_name() {
            Some(HEALING_POTION) if healing_potions <= self.reserved_healing => {
                return Err(RejectReason::OutOfPotions {
                    item: HEALING_POTION.to_owned(),
                });
            }
            Some(ETHER_POTION) if ether_potions <= self.reserved_ether => {
                return Err(RejectReason::OutOfPotions {
                    item: ETHER_POTION.to_owned(),
                });
            }
            _ => {}
        }

        self.reserved_magic += cost;
        match action.item_name() {
            Some(HEALING_POTION) => self.reserved_healing += 1,
            Some(ETHER_POTION) => self.reserved_ether += 1,
            _ => {}
        }
        self.actions.push_back(action);
        Ok(())
    }

    /// Next action in queued order. Does not touch reservations; the engine
    /// calls [`Self::release`] once it decides to execute or skip.
    pub fn pop(&mut self) -> Option<BattleAction> {
        self.actions.pop_front()
    }

    /// Returns an action's reservation to the pool.
    pub fn release(&mut self, action: BattleAction, loadout: &Loadout) {
        self.reserved_magic = self
            .reserved_magic
            .saturating_sub(action.magic_cost(loadout));
        match action.item_name() {
            Some(HEALING_POTION) => {
                self.reserved_healing = self.reserved_healing.saturating_sub(1);
            }
            Some(ETHER_POTION) => self.reserved_ether = self.reserved_ether.saturating_sub(1),
            _ => {}
        }
    }
}
