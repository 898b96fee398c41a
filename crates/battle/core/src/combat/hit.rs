//! Hit chance calculations.

/// Physical hit chance adjusted by relative agility.
///
/// # Formula
///
/// ```text
/// adjusted = 100 - (100 - base_hit) * (1 + (target_agi / actor_agi - 1) / 2)
/// ```
///
/// A faster target pushes the chance down; a slower one pushes it up. Actor
/// agility is floored at 1.
pub fn adjusted_hit(base_hit: u32, actor_agility: i32, target_agility: i32) -> f64 {
    let ratio = f64::from(target_agility.max(0)) / f64::from(actor_agility.max(1));
    let miss = f64::from(100u32.saturating_sub(base_hit));
    100.0 - miss * (1.0 + (ratio - 1.0) / 2.0)
}

/// A roll in `[0, 100)` hits when it is below the chance.
pub fn check_hit(chance: f64, roll: u32) -> bool {
    f64::from(roll) < chance
}
