//! Enemy roster: an arena with stable ids plus a separate turn-order list.
//!
//! Identity and turn position are deliberately different things. Removing a
//! defeated unit frees its arena slot and shrinks the turn order, but never
//! renumbers the survivors, so queued actions can safely hold `UnitId`s
//! across removals and detect staleness with [`Roster::contains`].

use crate::unit::{CombatUnit, UnitId};

/// Arena of living enemy units.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    slots: Vec<Option<CombatUnit>>,
    turn_order: Vec<UnitId>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a fresh id and appends the unit to the end of the turn
    /// order. Ids start at 1; 0 is reserved for the player.
    pub fn insert(&mut self, build: impl FnOnce(UnitId) -> CombatUnit) -> UnitId {
        let id = UnitId(self.slots.len() as u32 + 1);
        self.slots.push(Some(build(id)));
        self.turn_order.push(id);
        id
    }

    fn slot_index(id: UnitId) -> Option<usize> {
        (id.0 as usize).checked_sub(1)
    }

    pub fn get(&self, id: UnitId) -> Option<&CombatUnit> {
        Self::slot_index(id).and_then(|i| self.slots.get(i)?.as_ref())
    }

    pub fn get_mut(&mut self, id: UnitId) -> Option<&mut CombatUnit> {
        Self::slot_index(id).and_then(|i| self.slots.get_mut(i)?.as_mut())
    }

    /// Whether the unit is still alive in the arena.
    pub fn contains(&self, id: UnitId) -> bool {
        self.get(id).is_some()
    }

    /// Removes a unit, returning it. Later units keep their ids; only the
    /// turn order shifts.
    pub fn remove(&mut self, id: UnitId) -> Option<CombatUnit> {
        let unit = Self::slot_index(id).and_then(|i| self.slots.get_mut(i)?.take());
        if unit.is_some() {
            self.turn_order.retain(|&other| other != id);
        }
        unit
    }

    pub fn is_empty(&self) -> bool {
        self.turn_order.is_empty()
    }

    pub fn len(&self) -> usize {
        self.turn_order.len()
    }

    /// Ids in the order enemies act, front to back.
    pub fn turn_order(&self) -> &[UnitId] {
        &self.turn_order
    }

    /// The id at a turn-order position, if that many units remain.
    pub fn at_turn(&self, position: usize) -> Option<UnitId> {
        self.turn_order.get(position).copied()
    }

    /// First living unit in turn order; the retarget fallback for actions
    /// whose chosen target died earlier in the turn.
    pub fn first(&self) -> Option<UnitId> {
        self.turn_order.first().copied()
    }

    /// Living units in turn order.
    pub fn iter(&self) -> impl Iterator<Item = &CombatUnit> {
        self.turn_order.iter().filter_map(|&id| self.get(id))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut CombatUnit> {
        self.slots.iter_mut().filter_map(|slot| slot.as_mut())
    }
}
