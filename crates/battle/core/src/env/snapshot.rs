//! In-memory data oracle.
//!
//! [`DataSnapshot`] owns every descriptor of a battle, keyed by id. Loaders and
//! tests build one and hand it to [`crate::env::Env`] as the data oracle.

use std::collections::BTreeMap;

use crate::action::{ActionDescriptor, ItemDescriptor};
use crate::env::{DataOracle, EnemyDescriptor, SystemSound};
use crate::state::{EnemyId, ItemId, SkillId, SoundId, StatusDescriptor, StatusId};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataSnapshot {
    pub skills: BTreeMap<SkillId, ActionDescriptor>,
    pub items: BTreeMap<ItemId, ItemDescriptor>,
    pub enemies: BTreeMap<EnemyId, EnemyDescriptor>,
    pub statuses: BTreeMap<StatusId, StatusDescriptor>,
    pub system_sounds: BTreeMap<SystemSound, SoundId>,
}

impl DataSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_skill(mut self, skill: ActionDescriptor) -> Self {
        self.skills.insert(skill.id, skill);
        self
    }

    pub fn with_item(mut self, item: ItemDescriptor) -> Self {
        self.items.insert(item.id, item);
        self
    }

    pub fn with_enemy(mut self, enemy: EnemyDescriptor) -> Self {
        self.enemies.insert(enemy.id, enemy);
        self
    }

    pub fn with_status(mut self, status: StatusDescriptor) -> Self {
        self.statuses.insert(status.id, status);
        self
    }

    pub fn with_system_sound(mut self, sound: SystemSound, cue: SoundId) -> Self {
        self.system_sounds.insert(sound, cue);
        self
    }
}

impl DataOracle for DataSnapshot {
    fn skill(&self, id: SkillId) -> Option<&ActionDescriptor> {
        self.skills.get(&id)
    }

    fn item(&self, id: ItemId) -> Option<&ItemDescriptor> {
        self.items.get(&id)
    }

    fn enemy(&self, id: EnemyId) -> Option<&EnemyDescriptor> {
        self.enemies.get(&id)
    }

    fn status(&self, id: StatusId) -> Option<&StatusDescriptor> {
        self.statuses.get(&id)
    }

    fn system_sound(&self, sound: SystemSound) -> Option<SoundId> {
        self.system_sounds.get(&sound).copied()
    }
}
