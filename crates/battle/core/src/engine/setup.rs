//! Battle start parameters.

use crate::state::{AllySpec, EnemyId, Inventory, ItemId, SwitchId, SwitchState};

/// Everything the party and troop providers hand over when a battle begins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSetup {
    /// Party members in formation order.
    pub allies: Vec<AllySpec>,
    /// Enemy templates in formation order.
    pub troop: Vec<EnemyId>,
    pub switches: SwitchState,
    pub inventory: Inventory,
}

impl BattleSetup {
    pub fn new(allies: Vec<AllySpec>, troop: Vec<EnemyId>) -> Self {
        Self {
            allies,
            troop,
            switches: SwitchState::new(),
            inventory: Inventory::new(),
        }
    }

    pub fn with_switch(mut self, switch: SwitchId) -> Self {
        self.switches.set(switch, true);
        self
    }

    pub fn with_item(mut self, item: ItemId, count: u32) -> Self {
        self.inventory.add(item, count);
        self
    }
}
