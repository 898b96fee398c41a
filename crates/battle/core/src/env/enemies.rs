//! Enemy templates.
//!
//! An [`EnemyDescriptor`] bundles the stats a troop member spawns with, its
//! behaviour table and what it leaves behind when defeated. Transform effects
//! swap the template of a live combatant for another one.

use crate::ai::EnemyActionRule;
use crate::state::{AnimationId, AttackProfile, EnemyId, ItemId, Stats};

/// Item a defeated enemy may drop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDrop {
    pub item: ItemId,
    /// Drop chance in percent.
    pub chance: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyDescriptor {
    pub id: EnemyId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub level: u32,
    pub max_hp: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_sp: u32,
    pub stats: Stats,
    /// Lowers the basic attack hit rate.
    #[cfg_attr(feature = "serde", serde(default))]
    pub prone_to_miss: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub exp: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub gold: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub drop: Option<ItemDrop>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rules: Vec<EnemyActionRule>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attack_animation: Option<AnimationId>,
}

impl EnemyDescriptor {
    /// Template with no rules, rewards or drops.
    pub fn basic(id: EnemyId, name: impl Into<String>, max_hp: u32, stats: Stats) -> Self {
        Self {
            id,
            name: name.into(),
            level: 1,
            max_hp,
            max_sp: 0,
            stats,
            prone_to_miss: false,
            exp: 0,
            gold: 0,
            drop: None,
            rules: Vec::new(),
            attack_animation: None,
        }
    }

    pub fn with_rules(mut self, rules: Vec<EnemyActionRule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn attack_profile(&self) -> AttackProfile {
        AttackProfile {
            hit: if self.prone_to_miss {
                AttackProfile::ENEMY_HIT_PRONE_TO_MISS
            } else {
                AttackProfile::ENEMY_HIT
            },
            animation: self.attack_animation,
        }
    }
}
