//! Starting party loader.

use std::path::Path;

use battle_core::{AllySpec, BattleConfig, Inventory, ItemId};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub item: ItemId,
    pub count: u32,
}

/// Party members and the item stock they bring into battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyDefinition {
    pub members: Vec<AllySpec>,
    #[serde(default)]
    pub inventory: Vec<InventoryEntry>,
}

impl PartyDefinition {
    pub fn inventory(&self) -> Inventory {
        self.inventory
            .iter()
            .map(|entry| (entry.item, entry.count))
            .collect()
    }
}

/// Loader for the party definition from a RON file.
pub struct PartyLoader;

impl PartyLoader {
    pub fn load(path: &Path) -> LoadResult<PartyDefinition> {
        let content = read_file(path)?;
        let party: PartyDefinition = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse party RON: {}", e))?;

        if party.members.is_empty() {
            anyhow::bail!("Party has no members");
        }
        if party.members.len() > BattleConfig::MAX_ALLIES {
            anyhow::bail!(
                "Party has {} members (max {})",
                party.members.len(),
                BattleConfig::MAX_ALLIES
            );
        }
        Ok(party)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::Control;

    #[test]
    fn test_load_party_with_inventory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("party.ron");
        std::fs::write(
            &path,
            r#"(
                members: [
                    (name: "Ayla", level: 4, max_hp: 120, max_sp: 20,
                     stats: (attack: 22, defense: 12, spirit: 8, agility: 14),
                     skills: [1], control: Auto),
                    (name: "Bren", level: 3, max_hp: 90, max_sp: 40, hp: Some(45),
                     stats: (attack: 12, defense: 8, spirit: 20, agility: 10)),
                ],
                inventory: [(item: 1, count: 3), (item: 2, count: 1)],
            )"#,
        )
        .unwrap();

        let party = PartyLoader::load(&path).unwrap();
        assert_eq!(party.members.len(), 2);
        assert_eq!(party.members[0].control, Control::Auto);
        assert_eq!(party.members[1].control, Control::Manual);
        assert_eq!(party.members[1].hp, Some(45));

        let inventory = party.inventory();
        assert_eq!(inventory.count(ItemId(1)), 3);
        assert_eq!(inventory.count(ItemId(2)), 1);
        assert_eq!(inventory.count(ItemId(3)), 0);
    }
}
