//! Enemy behaviour tables.

use strum::{AsRefStr, Display, EnumString};

use crate::state::{EnemyId, SkillId, SwitchId};

/// Built-in behaviours a rule can pick without a skill descriptor.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BasicBehavior {
    Attack,
    DualAttack,
    Defend,
    Observe,
    Charge,
    SelfDestruct,
    Escape,
    Nothing,
}

/// What a rule does when chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RuleEffect {
    Basic(BasicBehavior),
    Skill(SkillId),
    Transform(EnemyId),
}

/// Gate on a rule. Ranges are inclusive on both ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RuleCondition {
    #[default]
    Always,
    /// Battle switch is on.
    Switch { switch: SwitchId },
    /// Fires on turn `start` and every `interval` turns after it.
    Turn { start: u32, interval: u32 },
    /// Active members of the rule owner's own side.
    EnemiesAlive { min: u32, max: u32 },
    /// Owner's HP as a percentage of maximum.
    HpPercent { min: u32, max: u32 },
    /// Owner's SP as a percentage of maximum.
    SpPercent { min: u32, max: u32 },
    /// Average level of the opposing party.
    PartyLevel { min: u32, max: u32 },
    /// Fatigue of the opposing party.
    PartyFatigue { min: i32, max: i32 },
}

/// One weighted, conditional entry of an enemy's behaviour table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyActionRule {
    #[cfg_attr(feature = "serde", serde(default))]
    pub condition: RuleCondition,
    /// Relative selection weight. Zero never wins.
    pub rating: u32,
    pub effect: RuleEffect,
    #[cfg_attr(feature = "serde", serde(default))]
    pub switch_on: Option<SwitchId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub switch_off: Option<SwitchId>,
}

impl EnemyActionRule {
    pub fn new(condition: RuleCondition, rating: u32, effect: RuleEffect) -> Self {
        Self {
            condition,
            rating,
            effect,
            switch_on: None,
            switch_off: None,
        }
    }

    pub fn always(rating: u32, effect: RuleEffect) -> Self {
        Self::new(RuleCondition::Always, rating, effect)
    }
}
