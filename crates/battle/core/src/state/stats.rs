//! Combat parameters shared by combatants and descriptors.

use bitflags::bitflags;

/// The four battle parameters. Used both for base values and for additive
/// modifiers applied by buff/debuff effects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Stats {
    pub attack: i32,
    pub defense: i32,
    pub spirit: i32,
    pub agility: i32,
}

impl Stats {
    pub const fn new(attack: i32, defense: i32, spirit: i32, agility: i32) -> Self {
        Self {
            attack,
            defense,
            spirit,
            agility,
        }
    }

    /// Effective parameters: base plus modifiers, floored at 1.
    pub fn effective(&self, modifiers: &Stats) -> Stats {
        Stats {
            attack: (self.attack + modifiers.attack).max(1),
            defense: (self.defense + modifiers.defense).max(1),
            spirit: (self.spirit + modifiers.spirit).max(1),
            agility: (self.agility + modifiers.agility).max(1),
        }
    }

    /// Adds `amount` to every parameter selected by `which`.
    pub fn shift(&mut self, which: AffectedStats, amount: i32) {
        if which.contains(AffectedStats::ATTACK) {
            self.attack += amount;
        }
        if which.contains(AffectedStats::DEFENSE) {
            self.defense += amount;
        }
        if which.contains(AffectedStats::SPIRIT) {
            self.spirit += amount;
        }
        if which.contains(AffectedStats::AGILITY) {
            self.agility += amount;
        }
    }
}

bitflags! {
    /// Which numeric stats an effect touches.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct AffectedStats: u8 {
        const HP      = 1 << 0;
        const SP      = 1 << 1;
        const ATTACK  = 1 << 2;
        const DEFENSE = 1 << 3;
        const SPIRIT  = 1 << 4;
        const AGILITY = 1 << 5;

        const PARAMETERS = Self::ATTACK.bits()
            | Self::DEFENSE.bits()
            | Self::SPIRIT.bits()
            | Self::AGILITY.bits();
    }
}
