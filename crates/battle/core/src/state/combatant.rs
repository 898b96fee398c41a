//! Per-unit runtime state.
//!
//! A [`Combatant`] is created at battle start from an [`AllySpec`] or an
//! [`EnemyDescriptor`] and then mutated only by the scheduler and executor.
//! Death never removes a combatant from the roster; it just stops being
//! *active* until a revival effect restores HP.

use strum::{AsRefStr, Display, EnumString};

use crate::action::BattleAction;
use crate::env::EnemyDescriptor;
use crate::state::{
    AnimationId, CombatantId, EnemyId, ResourceMeter, Side, SkillId, Stats, StatusSet,
};

/// Who decides what a combatant does when its gauge fills.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Control {
    /// Waits for a player command.
    #[default]
    Manual,
    /// Ally on auto-battle: basic attack on a random enemy.
    Auto,
    /// Enemy driven by its rule table.
    Ai,
}

/// Basic attack parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackProfile {
    /// Base hit percentage before the agility adjustment.
    pub hit: u32,
    pub animation: Option<AnimationId>,
}

impl AttackProfile {
    pub const ALLY_HIT: u32 = 90;
    pub const ENEMY_HIT: u32 = 90;
    pub const ENEMY_HIT_PRONE_TO_MISS: u32 = 70;
}

impl Default for AttackProfile {
    fn default() -> Self {
        Self {
            hit: Self::ALLY_HIT,
            animation: None,
        }
    }
}

/// Party member definition supplied by the party provider at battle start.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllySpec {
    pub name: String,
    pub level: u32,
    pub max_hp: u32,
    pub max_sp: u32,
    /// Current HP at battle start. `None` means full.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hp: Option<u32>,
    /// Current SP at battle start. `None` means full.
    #[cfg_attr(feature = "serde", serde(default))]
    pub sp: Option<u32>,
    pub stats: Stats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attack: AttackProfile,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<SkillId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub control: Control,
}

/// One battle participant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Combatant {
    pub id: CombatantId,
    pub side: Side,
    /// Formation index inside its side; defines the rotation order used when
    /// a dead target is reassigned.
    pub slot: u8,
    pub name: String,
    pub level: u32,
    pub control: Control,

    pub hp: ResourceMeter,
    pub sp: ResourceMeter,
    pub base: Stats,
    pub modifiers: Stats,

    /// Readiness gauge in `[0, gauge_full]`.
    pub gauge: u32,
    /// Amount added to the gauge each tick.
    pub speed: u32,

    pub defending: bool,
    pub charged: bool,
    /// Escaped or self-destructed. Hidden combatants are out of the battle
    /// without being dead.
    pub hidden: bool,
    pub statuses: StatusSet,

    /// Action this combatant has queued and not yet finished.
    pub pending: Option<BattleAction>,
    pub attack: AttackProfile,
    pub skills: Vec<SkillId>,
    /// Enemy template backing this combatant.
    pub enemy: Option<EnemyId>,
    /// Number of actions this combatant has resolved.
    pub turns: u32,
}

impl Combatant {
    pub fn ally(id: CombatantId, slot: u8, spec: &AllySpec, speed: u32) -> Self {
        let hp = ResourceMeter::new(spec.hp.unwrap_or(spec.max_hp), spec.max_hp);
        let sp = ResourceMeter::new(spec.sp.unwrap_or(spec.max_sp), spec.max_sp);
        Self {
            id,
            side: Side::Ally,
            slot,
            name: spec.name.clone(),
            level: spec.level,
            control: match spec.control {
                Control::Ai => Control::Auto,
                other => other,
            },
            hp,
            sp,
            base: spec.stats,
            modifiers: Stats::default(),
            gauge: 0,
            speed,
            defending: false,
            charged: false,
            hidden: false,
            statuses: StatusSet::new(),
            pending: None,
            attack: spec.attack,
            skills: spec.skills.clone(),
            enemy: None,
            turns: 0,
        }
    }

    pub fn enemy(id: CombatantId, slot: u8, template: &EnemyDescriptor, speed: u32) -> Self {
        Self {
            id,
            side: Side::Enemy,
            slot,
            name: template.name.clone(),
            level: template.level,
            control: Control::Ai,
            hp: ResourceMeter::full(template.max_hp),
            sp: ResourceMeter::full(template.max_sp),
            base: template.stats,
            modifiers: Stats::default(),
            gauge: 0,
            speed,
            defending: false,
            charged: false,
            hidden: false,
            statuses: StatusSet::new(),
            pending: None,
            attack: template.attack_profile(),
            skills: Vec::new(),
            enemy: Some(template.id),
            turns: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.hp.is_empty()
    }

    pub fn is_dead(&self) -> bool {
        self.hp.is_empty()
    }

    /// Alive and still taking part in the battle.
    pub fn is_active(&self) -> bool {
        self.is_alive() && !self.hidden
    }

    /// Effective battle parameters.
    pub fn stats(&self) -> Stats {
        self.base.effective(&self.modifiers)
    }

    pub fn gauge_is_full(&self, gauge_full: u32) -> bool {
        self.gauge >= gauge_full
    }

    /// Removes HP and returns the amount actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        (-self.hp.apply(-i64::from(amount))) as u32
    }

    /// Kills the combatant. Statuses and temporary flags are cleared.
    pub fn kill(&mut self) {
        self.hp.set(0);
        self.statuses.clear();
        self.defending = false;
        self.charged = false;
    }

    /// Restores a dead combatant to at least 1 HP. The gauge restarts from empty.
    pub fn revive(&mut self, hp: u32) {
        self.hp.set(hp.max(1));
        self.gauge = 0;
    }

    /// Swaps the enemy template backing this combatant, keeping current HP/SP
    /// (clamped to the new maxima).
    pub fn transform_into(&mut self, template: &EnemyDescriptor) {
        self.name = template.name.clone();
        self.level = template.level;
        self.base = template.stats;
        self.hp.set_maximum(template.max_hp);
        self.sp.set_maximum(template.max_sp);
        self.attack = template.attack_profile();
        self.enemy = Some(template.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> AllySpec {
        AllySpec {
            name: "Alex".into(),
            level: 5,
            max_hp: 120,
            max_sp: 30,
            hp: Some(80),
            sp: None,
            stats: Stats::new(20, 12, 10, 15),
            attack: AttackProfile::default(),
            skills: vec![SkillId(1)],
            control: Control::Manual,
        }
    }

    #[test]
    fn ally_starts_with_spec_resources() {
        let ally = Combatant::ally(CombatantId(0), 0, &spec(), 30);
        assert_eq!(ally.hp.current, 80);
        assert_eq!(ally.sp.current, 30);
        assert_eq!(ally.side, Side::Ally);
        assert!(ally.is_active());
    }

    #[test]
    fn ai_control_on_an_ally_becomes_auto() {
        let mut spec = spec();
        spec.control = Control::Ai;
        let ally = Combatant::ally(CombatantId(0), 0, &spec, 30);
        assert_eq!(ally.control, Control::Auto);
    }

    #[test]
    fn damage_past_zero_kills() {
        let mut ally = Combatant::ally(CombatantId(0), 0, &spec(), 30);
        assert_eq!(ally.take_damage(500), 80);
        assert!(ally.is_dead());
        assert!(!ally.is_active());
    }

    #[test]
    fn hidden_combatant_is_alive_but_inactive() {
        let mut ally = Combatant::ally(CombatantId(0), 0, &spec(), 30);
        ally.hidden = true;
        assert!(ally.is_alive());
        assert!(!ally.is_active());
    }

    #[test]
    fn revive_restores_at_least_one_hp() {
        let mut ally = Combatant::ally(CombatantId(0), 0, &spec(), 30);
        ally.gauge = 1200;
        ally.kill();
        ally.revive(0);
        assert_eq!(ally.hp.current, 1);
        assert_eq!(ally.gauge, 0);
    }
}
