//! Status conditions carried by combatants.
//!
//! Statuses are data-driven: the core only knows a status id, its display
//! name and the action restriction it imposes when the bearer's gauge fills.

use arrayvec::ArrayVec;
use strum::{AsRefStr, Display, EnumString};

use crate::config::BattleConfig;
use crate::state::StatusId;

/// What a status does to its bearer's turn.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Restriction {
    #[default]
    None,
    /// The turn is skipped when the gauge fills.
    CannotAct,
    /// Forced basic attack on a random opponent.
    AttackEnemy,
    /// Forced basic attack on a random member of the bearer's own side.
    AttackAlly,
}

/// Static description of a status condition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusDescriptor {
    pub id: StatusId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub restriction: Restriction,
    /// Higher priority restrictions win when several statuses are active.
    #[cfg_attr(feature = "serde", serde(default))]
    pub priority: u8,
}

/// Active status ids on a combatant, in the order they were inflicted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusSet {
    ids: ArrayVec<StatusId, { BattleConfig::MAX_STATUSES }>,
}

impl StatusSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: StatusId) -> bool {
        self.ids.contains(&id)
    }

    /// Adds a status. Returns false when it was already present or the set is full.
    pub fn insert(&mut self, id: StatusId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.try_push(id).is_ok()
    }

    /// Removes a status. Returns false when it was not present.
    pub fn remove(&mut self, id: StatusId) -> bool {
        match self.ids.iter().position(|&s| s == id) {
            Some(index) => {
                self.ids.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = StatusId> + '_ {
        self.ids.iter().copied()
    }
}
