//! Content factory for building a battle bundle from data files.

use std::path::{Path, PathBuf};

use battle_core::{BattleConfig, BattleSetup, DataSnapshot};

use crate::loaders::{
    ConfigLoader, DataLoader, LoadResult, PartyDefinition, PartyLoader, TroopDefinition,
    TroopLoader,
};

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── battle.toml      (optional)
/// ├── skills.ron
/// ├── enemies.ron
/// ├── items.ron        (optional)
/// ├── statuses.ron     (optional)
/// ├── system.ron       (optional)
/// ├── troops.ron
/// └── party.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle configuration from `battle.toml`, or the defaults when the
    /// file is absent.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("battle.toml");
        if path.exists() {
            ConfigLoader::load(&path)
        } else {
            Ok(BattleConfig::default())
        }
    }

    pub fn load_data(&self) -> LoadResult<DataSnapshot> {
        DataLoader::load_dir(&self.data_dir)
    }

    pub fn load_troops(&self) -> LoadResult<Vec<TroopDefinition>> {
        TroopLoader::load(&self.data_dir.join("troops.ron"))
    }

    pub fn load_party(&self) -> LoadResult<PartyDefinition> {
        PartyLoader::load(&self.data_dir.join("party.ron"))
    }

    /// Loads everything and checks that troops and party skills resolve.
    pub fn load_bundle(&self) -> LoadResult<ContentBundle> {
        let bundle = ContentBundle {
            config: self.load_config()?,
            data: self.load_data()?,
            troops: self.load_troops()?,
            party: self.load_party()?,
        };
        bundle.validate()?;

        tracing::info!(
            "content: loaded {} troops from {}",
            bundle.troops.len(),
            self.data_dir.display()
        );
        Ok(bundle)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Everything needed to start any troop battle.
#[derive(Debug, Clone)]
pub struct ContentBundle {
    pub config: BattleConfig,
    pub data: DataSnapshot,
    pub troops: Vec<TroopDefinition>,
    pub party: PartyDefinition,
}

impl ContentBundle {
    pub fn troop(&self, id: u32) -> Option<&TroopDefinition> {
        self.troops.iter().find(|troop| troop.id == id)
    }

    /// Battle configuration with the troop's overrides applied.
    pub fn config_for(&self, troop: &TroopDefinition) -> BattleConfig {
        let mut config = self.config.clone();
        if let Some(allowed) = troop.escape_allowed {
            config.escape_allowed = allowed;
        }
        config
    }

    /// Battle setup pitting the party against `troop`.
    pub fn setup_for(&self, troop: &TroopDefinition) -> BattleSetup {
        let mut setup = BattleSetup::new(self.party.members.clone(), troop.members.clone());
        setup.inventory = self.party.inventory();
        for &switch in &troop.switches {
            setup = setup.with_switch(switch);
        }
        setup
    }

    fn validate(&self) -> LoadResult<()> {
        for troop in &self.troops {
            if let Some(member) = troop.members.iter().find(|id| !self.data.enemies.contains_key(id)) {
                anyhow::bail!("Troop '{}' references unknown enemy {}", troop.name, member.0);
            }
        }
        for ally in &self.party.members {
            if let Some(skill) = ally.skills.iter().find(|id| !self.data.skills.contains_key(id)) {
                anyhow::bail!("Party member '{}' knows unknown skill {}", ally.name, skill.0);
            }
        }
        for entry in &self.party.inventory {
            if !self.data.items.contains_key(&entry.item) {
                anyhow::bail!("Party inventory holds unknown item {}", entry.item.0);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{EnemyId, ItemId, SwitchId};

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn test_sample_content_loads() {
        let factory = ContentFactory::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));
        let bundle = factory.load_bundle().expect("sample content should load");

        assert!(!bundle.troops.is_empty());
        for troop in &bundle.troops {
            let setup = bundle.setup_for(troop);
            assert_eq!(setup.troop, troop.members);
            assert_eq!(setup.allies.len(), bundle.party.members.len());
        }
    }

    #[test]
    fn test_troop_overrides_apply() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::write(root.join("battle.toml"), "result_hold_ticks = 2\n").unwrap();
        std::fs::write(root.join("skills.ron"), "(skills: [])").unwrap();
        std::fs::write(root.join("items.ron"), r#"(items: [(id: 1, name: "Potion", scope: Ally, hp_flat: 50)])"#).unwrap();
        std::fs::write(
            root.join("enemies.ron"),
            r#"(enemies: [(id: 1, name: "Slime", max_hp: 30, stats: (attack: 10, defense: 4, spirit: 2, agility: 6))])"#,
        )
        .unwrap();
        std::fs::write(
            root.join("troops.ron"),
            r#"(troops: [(id: 7, name: "Boss", members: [1], switches: [2], escape_allowed: Some(false))])"#,
        )
        .unwrap();
        std::fs::write(
            root.join("party.ron"),
            r#"(members: [(name: "Ayla", level: 1, max_hp: 50, max_sp: 0, stats: (attack: 10))], inventory: [(item: 1, count: 2)])"#,
        )
        .unwrap();

        let bundle = ContentFactory::new(root).load_bundle().unwrap();
        let troop = bundle.troop(7).unwrap();
        let config = bundle.config_for(troop);
        assert!(!config.escape_allowed);
        assert_eq!(config.result_hold_ticks, 2);

        let setup = bundle.setup_for(troop);
        assert_eq!(setup.troop, vec![EnemyId(1)]);
        assert!(setup.switches.is_on(SwitchId(2)));
        assert_eq!(setup.inventory.count(ItemId(1)), 2);
        assert!(bundle.troop(8).is_none());
    }

    #[test]
    fn test_unknown_troop_member_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::write(root.join("skills.ron"), "(skills: [])").unwrap();
        std::fs::write(root.join("enemies.ron"), "(enemies: [])").unwrap();
        std::fs::write(root.join("troops.ron"), r#"(troops: [(id: 1, name: "Ghosts", members: [9])])"#).unwrap();
        std::fs::write(
            root.join("party.ron"),
            r#"(members: [(name: "Ayla", level: 1, max_hp: 50, max_sp: 0, stats: ())])"#,
        )
        .unwrap();

        let err = ContentFactory::new(root).load_bundle().unwrap_err();
        assert!(err.to_string().contains("unknown enemy 9"));
    }
}
