//! Weighted conditional rule selection.
//!
//! # Algorithm
//!
//! 1. Keep every rule whose condition holds and that the owner can actually
//!    perform (skills need enough SP, transforms need a known template).
//! 2. Sum the ratings of the kept rules into `total`.
//! 3. Draw `r` uniformly in `[0, total)` and walk the kept rules in table
//!    order: the first rule with `r < rating` wins, otherwise `r -= rating`.
//! 4. `total == 0` means no action this turn.
//!
//! Rules are never reordered, so a fixed seed always yields the same choice.

use crate::ai::{EnemyActionRule, RuleEffect};
use crate::context::BattleContext;
use crate::env::{DataOracle, Dice};
use crate::state::Combatant;

/// Rule selector for enemy-side combatants.
pub struct RuleSelector;

impl RuleSelector {
    /// Selects a rule for `owner`, or `None` when nothing can be chosen.
    pub fn select<'r>(
        owner: &Combatant,
        rules: &'r [EnemyActionRule],
        ctx: &BattleContext<'_>,
        data: &dyn DataOracle,
        dice: &mut Dice<'_>,
    ) -> Option<&'r EnemyActionRule> {
        let valid = Self::valid_rules(owner, rules, ctx, data);
        let total: u32 = valid.iter().map(|rule| rule.rating).sum();

        tracing::debug!(
            "RuleSelector: {} has {}/{} valid rules (total rating {})",
            owner.name,
            valid.len(),
            rules.len(),
            total
        );

        if total == 0 {
            return None;
        }

        let roll = dice.below(total);
        let chosen = Self::pick_weighted(&valid, roll);

        tracing::debug!(
            "RuleSelector: {} rolled {} -> {:?}",
            owner.name,
            roll,
            chosen.map(|rule| rule.effect)
        );

        chosen
    }

    /// Rules whose condition holds and whose effect is currently usable, in
    /// table order.
    pub fn valid_rules<'r>(
        owner: &Combatant,
        rules: &'r [EnemyActionRule],
        ctx: &BattleContext<'_>,
        data: &dyn DataOracle,
    ) -> Vec<&'r EnemyActionRule> {
        rules
            .iter()
            .filter(|rule| rule.condition.holds(owner, ctx))
            .filter(|rule| Self::is_usable(owner, rule, data))
            .collect()
    }

    /// Cumulative-weight pick for a roll in `[0, total)`.
    pub fn pick_weighted<'r>(
        valid: &[&'r EnemyActionRule],
        mut roll: u32,
    ) -> Option<&'r EnemyActionRule> {
        for rule in valid {
            if roll < rule.rating {
                return Some(rule);
            }
            roll -= rule.rating;
        }
        None
    }

    fn is_usable(owner: &Combatant, rule: &EnemyActionRule, data: &dyn DataOracle) -> bool {
        match rule.effect {
            RuleEffect::Basic(_) => true,
            RuleEffect::Skill(id) => data
                .skill(id)
                .is_some_and(|skill| owner.sp.current >= skill.sp_cost),
            RuleEffect::Transform(id) => data.enemy(id).is_some(),
        }
    }
}
