//! Rule condition evaluation.

use crate::ai::RuleCondition;
use crate::context::BattleContext;
use crate::state::Combatant;

impl RuleCondition {
    /// Evaluates the condition for the rule `owner` against the battle context.
    pub fn holds(&self, owner: &Combatant, ctx: &BattleContext<'_>) -> bool {
        let opponents = owner.side.opposite();
        match *self {
            RuleCondition::Always => true,
            RuleCondition::Switch { switch } => ctx.switch_on(switch),
            RuleCondition::Turn { start, interval } => {
                let turn = ctx.turn();
                // Turns before `start` never match, even on the interval.
                turn >= start && (turn - start) % interval.max(1) == 0
            }
            RuleCondition::EnemiesAlive { min, max } => {
                let alive = ctx.living_count(owner.side) as u32;
                (min..=max).contains(&alive)
            }
            RuleCondition::HpPercent { min, max } => (min..=max).contains(&owner.hp.percent()),
            RuleCondition::SpPercent { min, max } => (min..=max).contains(&owner.sp.percent()),
            RuleCondition::PartyLevel { min, max } => {
                (min..=max).contains(&ctx.average_level(opponents))
            }
            RuleCondition::PartyFatigue { min, max } => {
                (min..=max).contains(&ctx.party_fatigue(opponents))
            }
        }
    }
}
