//! Turns a chosen rule (or a forced behaviour) into a queued action.
//!
//! Computer-controlled targets are random: one active opponent for single
//! offensive effects, one active member of the own side for single support
//! effects, the whole group otherwise.

use crate::action::{BattleAction, QueuedAction, Scope, SwitchEffects, TargetList, collect_group};
use crate::ai::{EnemyActionRule, RuleEffect};
use crate::env::{DataOracle, Dice};
use crate::state::{BattleState, Combatant, Side};

/// Builds the queued action for a rule. `None` when the effect has no legal
/// target right now.
pub fn plan_rule(
    owner: &Combatant,
    rule: &EnemyActionRule,
    state: &BattleState,
    data: &dyn DataOracle,
    dice: &mut Dice<'_>,
) -> Option<QueuedAction> {
    let action = match rule.effect {
        RuleEffect::Basic(behavior) => BattleAction::from_basic(behavior),
        RuleEffect::Skill(id) => BattleAction::Skill(id),
        RuleEffect::Transform(id) => BattleAction::Transform(id),
    };
    let switches = SwitchEffects {
        turn_on: rule.switch_on,
        turn_off: rule.switch_off,
    };
    plan_action(owner, action, state, data, dice).map(|queued| queued.with_switches(switches))
}

/// Picks random targets for `action` on behalf of `owner`.
pub fn plan_action(
    owner: &Combatant,
    action: BattleAction,
    state: &BattleState,
    data: &dyn DataOracle,
    dice: &mut Dice<'_>,
) -> Option<QueuedAction> {
    let opponents = owner.side.opposite();
    let targets = match action {
        BattleAction::Attack => random_single(state, opponents, dice),
        BattleAction::DualAttack => {
            let ids = state.active_ids(opponents);
            let mut list = TargetList::new();
            if let Some(first) = dice.pick(&ids) {
                list.push(first);
            }
            if let Some(second) = dice.pick(&ids) {
                list.push(second);
            }
            list
        }
        BattleAction::SelfDestruct => collect_group(state, opponents, Scope::Enemies),
        BattleAction::Skill(id) => {
            let skill = data.skill(id)?;
            targets_for_scope(owner, skill.scope, state, dice)
        }
        BattleAction::Item(id) => {
            let item = data.item(id)?;
            targets_for_scope(owner, item.scope, state, dice)
        }
        BattleAction::Defend
        | BattleAction::Observe
        | BattleAction::Charge
        | BattleAction::Escape
        | BattleAction::Transform(_)
        | BattleAction::Nothing => targets_for_scope(owner, Scope::User, state, dice),
    };

    if targets.is_empty() {
        tracing::debug!("planner: {} has no target for {}", owner.name, action);
        return None;
    }
    Some(QueuedAction::new(owner.id, action, targets))
}

/// Forced basic attack against a random active member of `group`, excluding
/// the attacker itself.
pub fn plan_forced_attack(
    owner: &Combatant,
    group: Side,
    state: &BattleState,
    dice: &mut Dice<'_>,
) -> Option<QueuedAction> {
    let ids: Vec<_> = state
        .active(group)
        .filter(|c| c.id != owner.id)
        .map(|c| c.id)
        .collect();
    let target = dice.pick(&ids)?;
    let mut targets = TargetList::new();
    targets.push(target);
    Some(QueuedAction::new(owner.id, BattleAction::Attack, targets).forced_at(group))
}

fn random_single(state: &BattleState, group: Side, dice: &mut Dice<'_>) -> TargetList {
    let ids = state.active_ids(group);
    dice.pick(&ids).into_iter().collect()
}

fn targets_for_scope(
    owner: &Combatant,
    scope: Scope,
    state: &BattleState,
    dice: &mut Dice<'_>,
) -> TargetList {
    let group = scope.group(owner.side);
    match scope {
        Scope::User => std::iter::once(owner.id).collect(),
        Scope::Enemy | Scope::Ally => random_single(state, group, dice),
        Scope::Enemies | Scope::Allies | Scope::Party => collect_group(state, group, scope),
    }
}
