use std::fmt;

use strum::{AsRefStr, Display, EnumString};

macro_rules! data_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

data_id!(
    /// Identifier of a combatant for the lifetime of one battle.
    CombatantId,
    "#"
);
data_id!(
    /// Skill descriptor id.
    SkillId,
    "skill:"
);
data_id!(
    /// Item descriptor id.
    ItemId,
    "item:"
);
data_id!(
    /// Enemy template id.
    EnemyId,
    "enemy:"
);
data_id!(
    /// Status condition id.
    StatusId,
    "status:"
);
data_id!(
    /// Battle-wide boolean flag id.
    SwitchId,
    "switch:"
);
data_id!(AnimationId, "anim:");
data_id!(SoundId, "se:");

/// Which side of the battle a combatant fights for.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Ally,
    Enemy,
}

impl Side {
    pub const fn opposite(self) -> Self {
        match self {
            Side::Ally => Side::Enemy,
            Side::Enemy => Side::Ally,
        }
    }
}

/// Discrete simulation step counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Self = Self(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Integer resource meter (HP, SP) clamped to `[0, maximum]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub fn new(current: u32, maximum: u32) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    pub fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Applies a signed change and returns the amount actually applied.
    pub fn apply(&mut self, delta: i64) -> i64 {
        let before = i64::from(self.current);
        let after = (before + delta).clamp(0, i64::from(self.maximum));
        self.current = after as u32;
        after - before
    }

    pub fn set(&mut self, value: u32) {
        self.current = value.min(self.maximum);
    }

    /// Replaces the maximum and clamps the current value into range.
    pub fn set_maximum(&mut self, maximum: u32) {
        self.maximum = maximum;
        self.current = self.current.min(maximum);
    }

    /// Current value as a percentage of the maximum. A zero maximum counts as 1.
    pub fn percent(&self) -> u32 {
        (u64::from(self.current) * 100 / u64::from(self.maximum.max(1))) as u32
    }
}
