//! Descriptor catalog loader.
//!
//! Each catalog is a RON file holding one list:
//!
//! ```text
//! skills.ron    (skills: [ ... ])     required
//! enemies.ron   (enemies: [ ... ])    required
//! items.ron     (items: [ ... ])      optional
//! statuses.ron  (statuses: [ ... ])   optional
//! system.ron    (cues: [ ... ])       optional
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use battle_core::{
    ActionDescriptor, DataSnapshot, EnemyDescriptor, ItemDescriptor, RuleEffect, SoundId,
    StatusDescriptor, SystemSound,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<ActionDescriptor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemDescriptor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyCatalog {
    pub enemies: Vec<EnemyDescriptor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCatalog {
    pub statuses: Vec<StatusDescriptor>,
}

/// Binding of a system event to a sound cue.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SystemCue {
    pub sound: SystemSound,
    pub cue: SoundId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemCatalog {
    pub cues: Vec<SystemCue>,
}

/// Loader for descriptor catalogs from RON files.
pub struct DataLoader;

impl DataLoader {
    pub fn load_skills(path: &Path) -> LoadResult<Vec<ActionDescriptor>> {
        Ok(load_ron::<SkillCatalog>(path, "skill catalog")?.skills)
    }

    pub fn load_items(path: &Path) -> LoadResult<Vec<ItemDescriptor>> {
        Ok(load_ron::<ItemCatalog>(path, "item catalog")?.items)
    }

    pub fn load_enemies(path: &Path) -> LoadResult<Vec<EnemyDescriptor>> {
        Ok(load_ron::<EnemyCatalog>(path, "enemy catalog")?.enemies)
    }

    pub fn load_statuses(path: &Path) -> LoadResult<Vec<StatusDescriptor>> {
        Ok(load_ron::<StatusCatalog>(path, "status catalog")?.statuses)
    }

    pub fn load_system_cues(path: &Path) -> LoadResult<Vec<SystemCue>> {
        Ok(load_ron::<SystemCatalog>(path, "system cue catalog")?.cues)
    }

    /// Loads every catalog in `dir` into one validated [`DataSnapshot`].
    pub fn load_dir(dir: &Path) -> LoadResult<DataSnapshot> {
        let mut snapshot = DataSnapshot::new();

        for skill in Self::load_skills(&dir.join("skills.ron"))? {
            ensure_unique(snapshot.skills.contains_key(&skill.id), "skill", skill.id.0)?;
            snapshot = snapshot.with_skill(skill);
        }
        for enemy in Self::load_enemies(&dir.join("enemies.ron"))? {
            ensure_unique(snapshot.enemies.contains_key(&enemy.id), "enemy", enemy.id.0)?;
            snapshot = snapshot.with_enemy(enemy);
        }

        let items = dir.join("items.ron");
        if items.exists() {
            for item in Self::load_items(&items)? {
                ensure_unique(snapshot.items.contains_key(&item.id), "item", item.id.0)?;
                snapshot = snapshot.with_item(item);
            }
        }
        let statuses = dir.join("statuses.ron");
        if statuses.exists() {
            for status in Self::load_statuses(&statuses)? {
                ensure_unique(snapshot.statuses.contains_key(&status.id), "status", status.id.0)?;
                snapshot = snapshot.with_status(status);
            }
        }
        let system = dir.join("system.ron");
        if system.exists() {
            for SystemCue { sound, cue } in Self::load_system_cues(&system)? {
                snapshot = snapshot.with_system_sound(sound, cue);
            }
        }

        validate(&snapshot)?;
        tracing::debug!(
            "content: {} skills, {} items, {} enemies, {} statuses",
            snapshot.skills.len(),
            snapshot.items.len(),
            snapshot.enemies.len(),
            snapshot.statuses.len()
        );
        Ok(snapshot)
    }
}

fn load_ron<T: DeserializeOwned>(path: &Path, what: &str) -> LoadResult<T> {
    let content = read_file(path)?;
    ron::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse {} RON {}: {}", what, path.display(), e))
}

fn ensure_unique(duplicate: bool, kind: &str, id: u32) -> LoadResult<()> {
    if duplicate {
        anyhow::bail!("Duplicate {} id {}", kind, id);
    }
    Ok(())
}

/// Cross-references between catalogs must resolve.
fn validate(snapshot: &DataSnapshot) -> LoadResult<()> {
    for enemy in snapshot.enemies.values() {
        for rule in &enemy.rules {
            match rule.effect {
                RuleEffect::Skill(skill) if !snapshot.skills.contains_key(&skill) => {
                    anyhow::bail!("Enemy '{}' uses unknown skill {}", enemy.name, skill.0)
                }
                RuleEffect::Transform(form) if !snapshot.enemies.contains_key(&form) => {
                    anyhow::bail!("Enemy '{}' transforms into unknown enemy {}", enemy.name, form.0)
                }
                _ => {}
            }
        }
        if let Some(drop) = enemy.drop {
            if !snapshot.items.contains_key(&drop.item) {
                anyhow::bail!("Enemy '{}' drops unknown item {}", enemy.name, drop.item.0);
            }
        }
    }

    let known: BTreeSet<_> = snapshot.statuses.keys().copied().collect();
    for skill in snapshot.skills.values() {
        if let Some(status) = skill.statuses.iter().find(|id| !known.contains(id)) {
            anyhow::bail!("Skill '{}' references unknown status {}", skill.name, status.0);
        }
    }
    for item in snapshot.items.values() {
        if let Some(status) = item.cures.iter().find(|id| !known.contains(id)) {
            anyhow::bail!("Item '{}' cures unknown status {}", item.name, status.0);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{AffectedStats, EnemyId, Scope, SkillId};
    use std::fs;

    const SKILLS: &str = r#"(
        skills: [
            (id: 1, name: "Fire", scope: Enemy, sp_cost: 5, power: 30, magical_rate: 20,
             hit: 100, variance: 3, affects: "HP"),
        ],
    )"#;

    const ENEMIES: &str = r#"(
        enemies: [
            (id: 1, name: "Imp", max_hp: 40, max_sp: 20,
             stats: (attack: 14, defense: 6, spirit: 12, agility: 9),
             exp: 12, gold: 7,
             rules: [
                (rating: 5, effect: Basic(Attack)),
                (condition: HpPercent(min: 0, max: 50), rating: 3, effect: Skill(1)),
             ]),
        ],
    )"#;

    #[test]
    fn test_load_dir_builds_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("skills.ron"), SKILLS).unwrap();
        fs::write(dir.path().join("enemies.ron"), ENEMIES).unwrap();
        fs::write(
            dir.path().join("system.ron"),
            "(cues: [(sound: reject, cue: 3), (sound: enemy_death, cue: 9)])",
        )
        .unwrap();

        let snapshot = DataLoader::load_dir(dir.path()).unwrap();

        let fire = &snapshot.skills[&SkillId(1)];
        assert_eq!(fire.scope, Scope::Enemy);
        assert_eq!(fire.power, 30);
        assert!(fire.has_numeric_effect());

        let imp = &snapshot.enemies[&EnemyId(1)];
        assert_eq!(imp.rules.len(), 2);
        assert_eq!(imp.rules[0].rating, 5);
        assert_eq!(snapshot.system_sounds[&SystemSound::Reject], SoundId(3));
        assert!(snapshot.items.is_empty());
    }

    #[test]
    fn test_affected_stats_read_as_flag_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skills.ron");
        fs::write(
            &path,
            r#"(skills: [
                (id: 1, name: "Drain", scope: Enemy, power: 10, hit: 100, affects: "HP | SP"),
                (id: 2, name: "Screech", scope: Enemies, power: 5, hit: 80, affects: "DEFENSE"),
            ])"#,
        )
        .unwrap();

        let skills = DataLoader::load_skills(&path).unwrap();

        assert_eq!(skills[0].affects, AffectedStats::HP | AffectedStats::SP);
        assert_eq!(skills[1].affects, AffectedStats::DEFENSE);
    }

    #[test]
    fn test_missing_required_catalog_fails() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("skills.ron"), SKILLS).unwrap();
        let err = DataLoader::load_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains("enemies.ron"));
    }

    #[test]
    fn test_unknown_rule_skill_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("skills.ron"), "(skills: [])").unwrap();
        fs::write(dir.path().join("enemies.ron"), ENEMIES).unwrap();
        let err = DataLoader::load_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains("unknown skill 1"));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let doubled = SKILLS.replace(
            "],\n    )",
            "(id: 1, name: \"Fire2\", scope: Enemy, hit: 100),\n        ],\n    )",
        );
        fs::write(dir.path().join("skills.ron"), doubled).unwrap();
        fs::write(dir.path().join("enemies.ron"), ENEMIES).unwrap();
        let err = DataLoader::load_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains("Duplicate skill id 1"));
    }
}
