//! Immutable effect templates.
//!
//! Descriptors are looked up by id through [`crate::env::DataOracle`] and are
//! never mutated during a battle.

use strum::{AsRefStr, Display, EnumString};

use crate::state::{AffectedStats, AnimationId, ItemId, Side, SkillId, SoundId, StatusId, SwitchId};

/// Legal target set of an effect, relative to its user.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scope {
    /// Single opponent.
    #[default]
    Enemy,
    /// Every active opponent.
    Enemies,
    /// The user only.
    User,
    /// Single member of the user's side.
    Ally,
    /// Every active member of the user's side.
    Allies,
    /// Every member of the user's side, fallen members included.
    Party,
}

impl Scope {
    /// Targets the opposing side.
    pub const fn is_offensive(self) -> bool {
        matches!(self, Scope::Enemy | Scope::Enemies)
    }

    /// Picks exactly one target.
    pub const fn is_single(self) -> bool {
        matches!(self, Scope::Enemy | Scope::Ally | Scope::User)
    }

    /// Side the targets are drawn from, given the user's side.
    pub const fn group(self, user: Side) -> Side {
        if self.is_offensive() { user.opposite() } else { user }
    }
}

/// Skill behaviour beyond the numeric/status effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillKind {
    #[default]
    Normal,
    /// Turns a battle switch on.
    Switch(SwitchId),
    /// The user leaves the battle.
    Escape,
}

/// Whether listed statuses are added or removed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusMode {
    #[default]
    Inflict,
    Cure,
}

/// Sound cues attached to the three executor phases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SoundCues {
    pub start: Option<SoundId>,
    pub result: Option<SoundId>,
    pub death: Option<SoundId>,
}

/// Skill template.
///
/// # Formula
///
/// ```text
/// effect = power + atk * physical_rate / 20 + spi * magical_rate / 40
/// if offensive && !ignore_defense:
///     effect -= def * physical_rate / 40 + spi * magical_rate / 40
/// ```
///
/// A descriptor with `power == 0` only toggles statuses.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionDescriptor {
    pub id: SkillId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: SkillKind,
    pub scope: Scope,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sp_cost: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub power: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub physical_rate: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub magical_rate: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ignore_defense: bool,
    /// Hit percentage, shared by the numeric effect and each status toggle.
    pub hit: u32,
    /// Variance level; each level is 5%.
    #[cfg_attr(feature = "serde", serde(default))]
    pub variance: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub affects: AffectedStats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub status_mode: StatusMode,
    #[cfg_attr(feature = "serde", serde(default))]
    pub statuses: Vec<StatusId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cues: SoundCues,
    #[cfg_attr(feature = "serde", serde(default))]
    pub animation: Option<AnimationId>,
}

impl ActionDescriptor {
    /// True when the descriptor changes a numeric stat at all.
    pub fn has_numeric_effect(&self) -> bool {
        self.power > 0 && !self.affects.is_empty()
    }

    /// A dead target is only legal for party-wide effects.
    pub fn requires_living_target(&self) -> bool {
        self.scope != Scope::Party
    }
}

/// Consumable template used through the `Item` command.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDescriptor {
    pub id: ItemId,
    pub name: String,
    pub scope: Scope,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hp_rate: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hp_flat: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sp_rate: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sp_flat: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cures: Vec<StatusId>,
    /// Only works on fallen targets and brings them back.
    #[cfg_attr(feature = "serde", serde(default))]
    pub revive: bool,
    #[cfg_attr(feature = "serde", serde(default = "default_consumable"))]
    pub consumable: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cues: SoundCues,
    #[cfg_attr(feature = "serde", serde(default))]
    pub animation: Option<AnimationId>,
}

#[cfg(feature = "serde")]
fn default_consumable() -> bool {
    true
}

impl ItemDescriptor {
    pub fn requires_living_target(&self) -> bool {
        !self.revive && self.scope != Scope::Party
    }

    /// Amount restored on a resource with the given maximum.
    ///
    /// # Formula
    ///
    /// `maximum * rate / 100 + flat`
    pub fn recovery(maximum: u32, rate: u32, flat: u32) -> u32 {
        (u64::from(maximum) * u64::from(rate) / 100) as u32 + flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_group_is_relative_to_user() {
        assert_eq!(Scope::Enemy.group(Side::Ally), Side::Enemy);
        assert_eq!(Scope::Enemies.group(Side::Enemy), Side::Ally);
        assert_eq!(Scope::Party.group(Side::Enemy), Side::Enemy);
        assert_eq!(Scope::User.group(Side::Ally), Side::Ally);
    }

    #[test]
    fn recovery_combines_rate_and_flat() {
        assert_eq!(ItemDescriptor::recovery(200, 25, 10), 60);
        assert_eq!(ItemDescriptor::recovery(0, 50, 0), 0);
    }

    #[test]
    fn scope_parses_case_insensitively() {
        assert_eq!("ALLIES".parse::<Scope>(), Ok(Scope::Allies));
    }
}
