//! Shared fixtures for unit tests.

use crate::env::EnemyDescriptor;
use crate::state::{
    AllySpec, AttackProfile, BattleState, Combatant, CombatantId, Control, EnemyId, Inventory,
    Stats, SwitchState,
};

pub const ALLY_MAX_HP: u32 = 100;
pub const ENEMY_MAX_HP: u32 = 50;

pub fn ally_spec(name: &str) -> AllySpec {
    AllySpec {
        name: name.into(),
        level: 10,
        max_hp: ALLY_MAX_HP,
        max_sp: 0,
        hp: None,
        sp: None,
        stats: Stats::new(20, 10, 10, 10),
        attack: AttackProfile::default(),
        skills: Vec::new(),
        control: Control::Manual,
    }
}

pub fn slime() -> EnemyDescriptor {
    EnemyDescriptor::basic(EnemyId(1), "Slime", ENEMY_MAX_HP, Stats::new(16, 8, 8, 10))
}

pub fn ally(index: u32, hp: u32) -> Combatant {
    let mut combatant = Combatant::ally(CombatantId(index), index as u8, &ally_spec("ally"), 30);
    combatant.hp.set(hp);
    combatant
}

pub fn enemy(index: u32, hp: u32) -> Combatant {
    let mut combatant = Combatant::enemy(CombatantId(index), index as u8, &slime(), 30);
    combatant.hp.set(hp);
    combatant
}

pub fn state(allies: Vec<Combatant>, enemies: Vec<Combatant>) -> BattleState {
    let combatants = allies.into_iter().chain(enemies).collect();
    BattleState::new(combatants, SwitchState::new(), Inventory::new())
}
