//! Battle state: the roster plus battle-wide flags.
//!
//! Combatant ids are roster indices. Allies occupy the first slots, enemies
//! follow. The roster never shrinks, so ids stay valid for the whole battle.
mod combatant;
mod common;
mod roster;
mod stats;
mod status;

use std::collections::{BTreeMap, BTreeSet};

pub use combatant::{AllySpec, AttackProfile, Combatant, Control};
pub use common::{
    AnimationId, CombatantId, EnemyId, ItemId, ResourceMeter, Side, SkillId, SoundId, StatusId,
    SwitchId, Tick,
};
pub use stats::{AffectedStats, Stats};
pub use status::{Restriction, StatusDescriptor, StatusSet};

/// Battle-wide boolean flags referenced by rule conditions and switch effects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwitchState {
    on: BTreeSet<SwitchId>,
}

impl SwitchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_on(&self, id: SwitchId) -> bool {
        self.on.contains(&id)
    }

    pub fn set(&mut self, id: SwitchId, value: bool) {
        if value {
            self.on.insert(id);
        } else {
            self.on.remove(&id);
        }
    }
}

impl FromIterator<SwitchId> for SwitchState {
    fn from_iter<I: IntoIterator<Item = SwitchId>>(iter: I) -> Self {
        Self {
            on: iter.into_iter().collect(),
        }
    }
}

/// Party item stock usable during the battle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    counts: BTreeMap<ItemId, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, item: ItemId) -> u32 {
        self.counts.get(&item).copied().unwrap_or(0)
    }

    pub fn add(&mut self, item: ItemId, amount: u32) {
        *self.counts.entry(item).or_insert(0) += amount;
    }

    /// Removes one unit. Returns false when none is left.
    pub fn take(&mut self, item: ItemId) -> bool {
        match self.counts.get_mut(&item) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }
}

impl FromIterator<(ItemId, u32)> for Inventory {
    fn from_iter<I: IntoIterator<Item = (ItemId, u32)>>(iter: I) -> Self {
        let mut inventory = Inventory::new();
        for (item, amount) in iter {
            inventory.add(item, amount);
        }
        inventory
    }
}

/// Mutable battle state owned by [`crate::engine::Battle`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BattleState {
    pub combatants: Vec<Combatant>,
    pub switches: SwitchState,
    pub inventory: Inventory,
    pub clock: Tick,
    /// Failed party escape attempts so far; each one raises the next chance.
    pub escape_attempts: u32,
    pub escape_requested: bool,
    pub abort_requested: bool,
}

impl BattleState {
    pub fn new(combatants: Vec<Combatant>, switches: SwitchState, inventory: Inventory) -> Self {
        Self {
            combatants,
            switches,
            inventory,
            ..Self::default()
        }
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.get(id.0 as usize)
    }

    pub fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.combatants.get_mut(id.0 as usize)
    }
}
