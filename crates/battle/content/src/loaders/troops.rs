//! Troop catalog loader.

use std::path::Path;

use battle_core::{BattleConfig, EnemyId, SwitchId};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// An enemy formation that can be fought.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TroopDefinition {
    pub id: u32,
    pub name: String,
    /// Enemy templates in formation order.
    pub members: Vec<EnemyId>,
    /// Switches already on when the battle starts.
    #[serde(default)]
    pub switches: Vec<SwitchId>,
    /// Overrides `BattleConfig::escape_allowed` for this troop.
    #[serde(default)]
    pub escape_allowed: Option<bool>,
}

/// Troop catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TroopCatalog {
    pub troops: Vec<TroopDefinition>,
}

/// Loader for troop catalogs from RON files.
pub struct TroopLoader;

impl TroopLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<TroopDefinition>> {
        let content = read_file(path)?;
        let catalog: TroopCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse troop catalog RON: {}", e))?;

        for troop in &catalog.troops {
            if troop.members.is_empty() {
                anyhow::bail!("Troop '{}' has no members", troop.name);
            }
            if troop.members.len() > BattleConfig::MAX_ENEMIES {
                anyhow::bail!(
                    "Troop '{}' has {} members (max {})",
                    troop.name,
                    troop.members.len(),
                    BattleConfig::MAX_ENEMIES
                );
            }
        }
        Ok(catalog.troops)
    }
}
