//! Battle outcome evaluation and rewards.
//!
//! # Priority
//!
//! 1. `Aborted`: an abort was requested.
//! 2. `Defeat`: no active ally remains.
//! 3. `Victory`: no active enemy remains.
//! 4. `Escaped`: a party escape succeeded.
//! 5. Otherwise `InProgress`.

use strum::{AsRefStr, Display, EnumString};

use crate::context::BattleContext;
use crate::env::{DataOracle, Dice};
use crate::state::{BattleState, ItemId, Side};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleOutcome {
    #[default]
    InProgress,
    Victory,
    Defeat,
    Escaped,
    Aborted,
}

impl BattleOutcome {
    pub const fn is_terminal(self) -> bool {
        !matches!(self, BattleOutcome::InProgress)
    }
}

/// Stateless outcome evaluation over a [`BattleContext`].
pub struct OutcomeChecker;

impl OutcomeChecker {
    /// Full evaluation. Runs whenever the executor is between actions.
    pub fn evaluate(ctx: &BattleContext<'_>) -> BattleOutcome {
        if ctx.abort_requested() {
            BattleOutcome::Aborted
        } else if !ctx.any_active(Side::Ally) {
            BattleOutcome::Defeat
        } else if !ctx.any_active(Side::Enemy) {
            BattleOutcome::Victory
        } else if ctx.escape_requested() {
            BattleOutcome::Escaped
        } else {
            BattleOutcome::InProgress
        }
    }

    /// Requests that end the battle even in the middle of an action.
    /// Runs at the top of every tick.
    pub fn interrupt(ctx: &BattleContext<'_>) -> BattleOutcome {
        if ctx.abort_requested() {
            BattleOutcome::Aborted
        } else if ctx.escape_requested() {
            BattleOutcome::Escaped
        } else {
            BattleOutcome::InProgress
        }
    }
}

/// Experience, gold and items earned from a victory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleRewards {
    pub exp: u32,
    pub gold: u32,
    pub drops: Vec<ItemId>,
}

impl BattleRewards {
    /// Sums rewards over defeated enemies. Escaped or self-destructed
    /// enemies give nothing. Each drop is rolled against its chance.
    pub fn collect(state: &BattleState, data: &dyn DataOracle, dice: &mut Dice<'_>) -> Self {
        let mut rewards = Self::default();
        for enemy in state.members(Side::Enemy) {
            if enemy.hidden || enemy.is_alive() {
                continue;
            }
            let Some(template) = enemy.enemy.and_then(|id| data.enemy(id)) else {
                continue;
            };
            rewards.exp += template.exp;
            rewards.gold += template.gold;
            if let Some(drop) = template.drop {
                if dice.percent() < drop.chance {
                    rewards.drops.push(drop.item);
                }
            }
        }
        rewards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BattleConfig;
    use crate::env::{DataSnapshot, FixedRng, ItemDrop, RollCursor};
    use crate::testing::{ally, enemy, slime, state};

    fn outcome_of(state: &BattleState) -> BattleOutcome {
        let config = BattleConfig::default();
        OutcomeChecker::evaluate(&BattleContext::new(state, &config))
    }

    #[test]
    fn in_progress_while_both_sides_stand() {
        let state = state(vec![ally(0, 10)], vec![enemy(1, 10)]);
        assert_eq!(outcome_of(&state), BattleOutcome::InProgress);
    }

    #[test]
    fn defeat_takes_priority_over_victory() {
        let state = state(vec![ally(0, 0)], vec![enemy(1, 0)]);
        assert_eq!(outcome_of(&state), BattleOutcome::Defeat);
    }

    #[test]
    fn hidden_enemies_count_as_gone() {
        let mut hidden = enemy(1, 10);
        hidden.hidden = true;
        let state = state(vec![ally(0, 10)], vec![hidden]);
        assert_eq!(outcome_of(&state), BattleOutcome::Victory);
    }

    #[test]
    fn abort_beats_everything() {
        let mut state = state(vec![ally(0, 0)], vec![enemy(1, 10)]);
        state.abort_requested = true;
        state.escape_requested = true;
        assert_eq!(outcome_of(&state), BattleOutcome::Aborted);
    }

    #[test]
    fn interrupt_ignores_side_wipes() {
        let mut state = state(vec![ally(0, 10)], vec![enemy(1, 0)]);
        let config = BattleConfig::default();
        assert_eq!(
            OutcomeChecker::interrupt(&BattleContext::new(&state, &config)),
            BattleOutcome::InProgress
        );
        state.escape_requested = true;
        assert_eq!(
            OutcomeChecker::interrupt(&BattleContext::new(&state, &config)),
            BattleOutcome::Escaped
        );
    }

    #[test]
    fn rewards_only_count_defeated_enemies() {
        let mut template = slime();
        template.exp = 7;
        template.gold = 3;
        template.drop = Some(ItemDrop {
            item: ItemId(9),
            chance: 50,
        });
        let data = DataSnapshot::new().with_enemy(template);

        let mut escaped = enemy(2, 0);
        escaped.hidden = true;
        let state = state(vec![ally(0, 10)], vec![enemy(1, 0), escaped, enemy(3, 0)]);

        let mut cursor = RollCursor::new(0);
        let mut dice = Dice::new(&FixedRng(10), &mut cursor);
        let rewards = BattleRewards::collect(&state, &data, &mut dice);
        assert_eq!(rewards.exp, 14);
        assert_eq!(rewards.gold, 6);
        assert_eq!(rewards.drops, vec![ItemId(9), ItemId(9)]);
    }
}
