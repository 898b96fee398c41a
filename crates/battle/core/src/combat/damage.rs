//! Effect magnitude calculations.
//!
//! All formulas use integer arithmetic and floor at 0.

use crate::action::ActionDescriptor;
use crate::env::Dice;
use crate::state::Stats;

/// Basic attack damage.
///
/// # Formula
///
/// ```text
/// damage = max(0, atk / 2 - def / 4)
/// ```
pub fn physical_damage(attack: i32, defense: i32) -> u32 {
    (attack / 2 - defense / 4).max(0) as u32
}

/// Self-destruct damage.
///
/// # Formula
///
/// ```text
/// damage = max(0, atk - def / 2)
/// ```
pub fn self_destruct_damage(attack: i32, defense: i32) -> u32 {
    (attack - defense / 2).max(0) as u32
}

/// Variance level used by self-destruct.
pub const SELF_DESTRUCT_VARIANCE: u32 = 4;

/// Skill effect before variance. See [`ActionDescriptor`] for the formula.
pub fn skill_effect(skill: &ActionDescriptor, user: &Stats, target: &Stats) -> u32 {
    let physical = skill.physical_rate as i32;
    let magical = skill.magical_rate as i32;
    let mut effect = skill.power as i32 + user.attack * physical / 20 + user.spirit * magical / 40;
    if skill.scope.is_offensive() && !skill.ignore_defense {
        effect -= target.defense * physical / 40 + target.spirit * magical / 40;
    }
    effect.max(0) as u32
}

/// Perturbs an effect by up to `±variance * 5` percent.
///
/// # Formula
///
/// ```text
/// p = variance * 5
/// act = roll[0, 2p) - p
/// effect += effect * act / 100
/// ```
///
/// Variance 0 returns the effect unchanged without drawing.
pub fn apply_variance(effect: u32, variance: u32, dice: &mut Dice<'_>) -> u32 {
    if variance == 0 || effect == 0 {
        return effect;
    }
    let percent = (variance * 5) as i64;
    let act = i64::from(dice.below(2 * percent as u32)) - percent;
    let effect = i64::from(effect);
    (effect + effect * act / 100).max(0) as u32
}

/// Damage taken by a defending combatant.
pub fn defended(damage: u32) -> u32 {
    damage / 2
}
