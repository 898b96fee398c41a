//! Target resolution and revalidation.
//!
//! Targets are resolved when an action is queued and checked again when the
//! executor starts it. Between the two, targets may have died:
//!
//! - Single-target scopes that need a living target move on to the next
//!   active member of the same side, in formation order.
//! - Group scopes are re-collected from the side's current members.
//! - If nothing legal remains the action resolves with no effect.

use crate::action::{BattleAction, Scope, TargetList};
use crate::config::BattleConfig;
use crate::env::DataOracle;
use crate::state::{BattleState, Combatant, CombatantId, Side};

// ============================================================================
// Target Rule
// ============================================================================

/// Targeting constraints of one action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetRule {
    pub scope: Scope,
    /// Dead targets are illegal and trigger reassignment.
    pub requires_living: bool,
}

impl TargetRule {
    pub const fn new(scope: Scope, requires_living: bool) -> Self {
        Self {
            scope,
            requires_living,
        }
    }

    /// Derives the rule for an action. Returns `None` when the action refers
    /// to a descriptor the data provider does not know.
    pub fn for_action(action: BattleAction, data: &dyn DataOracle) -> Option<Self> {
        let rule = match action {
            BattleAction::Attack | BattleAction::DualAttack => Self::new(Scope::Enemy, true),
            BattleAction::SelfDestruct => Self::new(Scope::Enemies, true),
            BattleAction::Skill(id) => {
                let skill = data.skill(id)?;
                Self::new(skill.scope, skill.requires_living_target())
            }
            BattleAction::Item(id) => {
                let item = data.item(id)?;
                Self::new(item.scope, item.requires_living_target())
            }
            BattleAction::Defend
            | BattleAction::Observe
            | BattleAction::Charge
            | BattleAction::Escape
            | BattleAction::Transform(_)
            | BattleAction::Nothing => Self::new(Scope::User, true),
        };
        Some(rule)
    }

    /// Side targets are drawn from, given the user's side.
    pub const fn group(&self, user: Side) -> Side {
        self.scope.group(user)
    }

    /// Re-aims the rule at `group`, keeping single or group targeting.
    pub fn aimed_at(self, user: Side, group: Side) -> Self {
        let own = group == user;
        let scope = match self.scope {
            Scope::Enemy | Scope::Ally if own => Scope::Ally,
            Scope::Enemy | Scope::Ally => Scope::Enemy,
            Scope::Enemies | Scope::Allies if own => Scope::Allies,
            Scope::Enemies | Scope::Allies => Scope::Enemies,
            scope => scope,
        };
        Self { scope, ..self }
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Every legal member of a group for a multi-target scope.
pub fn collect_group(state: &BattleState, group: Side, scope: Scope) -> TargetList {
    let include_fallen = scope == Scope::Party;
    state
        .members(group)
        .filter(|c| !c.hidden && (include_fallen || c.is_alive()))
        .map(|c| c.id)
        .take(BattleConfig::MAX_COMBATANTS)
        .collect()
}

/// Checks a single target against the rule, reassigning it when it has died.
fn revalidate_single(
    state: &BattleState,
    group: Side,
    rule: TargetRule,
    target: CombatantId,
) -> Option<CombatantId> {
    let combatant = state.combatant(target)?;
    if combatant.side != group {
        return None;
    }
    if combatant.is_active() || (!rule.requires_living && !combatant.hidden) {
        return Some(target);
    }
    state.next_active_after(target)
}

/// Re-checks queued targets at the start of execution.
///
/// Returns an empty list when no legal target remains.
pub fn revalidate(
    state: &BattleState,
    source: &Combatant,
    rule: TargetRule,
    targets: &TargetList,
) -> TargetList {
    let group = rule.group(source.side);
    match rule.scope {
        Scope::User => {
            let mut list = TargetList::new();
            if source.is_active() {
                list.push(source.id);
            }
            list
        }
        Scope::Enemies | Scope::Allies | Scope::Party => collect_group(state, group, rule.scope),
        Scope::Enemy | Scope::Ally => targets
            .iter()
            .filter_map(|&target| revalidate_single(state, group, rule, target))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::EnemyDescriptor;
    use crate::state::{EnemyId, Inventory, Stats, SwitchState};

    fn enemy(index: u32, hp: u32) -> Combatant {
        let template = EnemyDescriptor::basic(EnemyId(1), "Slime", 10, Stats::new(5, 5, 5, 5));
        let mut c = Combatant::enemy(CombatantId(index), index as u8, &template, 30);
        c.hp.set(hp);
        c
    }

    fn state(combatants: Vec<Combatant>) -> BattleState {
        BattleState::new(combatants, SwitchState::new(), Inventory::new())
    }

    fn list(ids: &[u32]) -> TargetList {
        ids.iter().map(|&id| CombatantId(id)).collect()
    }

    #[test]
    fn dead_single_target_moves_to_next_active() {
        let state = state(vec![enemy(0, 10), enemy(1, 0), enemy(2, 10)]);
        let source = enemy(0, 10);
        let rule = TargetRule::new(Scope::Ally, true);
        assert_eq!(revalidate(&state, &source, rule, &list(&[1])), list(&[2]));
    }

    #[test]
    fn no_living_member_leaves_no_target() {
        let state = state(vec![enemy(0, 0), enemy(1, 0)]);
        let source = enemy(0, 10);
        let rule = TargetRule::new(Scope::Ally, true);
        assert!(revalidate(&state, &source, rule, &list(&[1])).is_empty());
    }

    #[test]
    fn fallen_target_kept_when_rule_allows_it() {
        let state = state(vec![enemy(0, 10), enemy(1, 0)]);
        let source = enemy(0, 10);
        let rule = TargetRule::new(Scope::Ally, false);
        assert_eq!(revalidate(&state, &source, rule, &list(&[1])), list(&[1]));
    }

    #[test]
    fn group_scope_is_recollected() {
        let mut hidden = enemy(2, 10);
        hidden.hidden = true;
        let state = state(vec![enemy(0, 10), enemy(1, 0), hidden, enemy(3, 4)]);
        let source = enemy(0, 10);
        let allies = TargetRule::new(Scope::Allies, true);
        assert_eq!(revalidate(&state, &source, allies, &list(&[1, 2])), list(&[0, 3]));

        let party = TargetRule::new(Scope::Party, false);
        assert_eq!(revalidate(&state, &source, party, &TargetList::new()), list(&[0, 1, 3]));
    }

    #[test]
    fn aimed_rule_targets_the_users_own_side() {
        let state = state(vec![enemy(0, 10), enemy(1, 10)]);
        let source = enemy(0, 10);
        let rule = TargetRule::new(Scope::Enemy, true).aimed_at(Side::Enemy, Side::Enemy);
        assert_eq!(rule.scope, Scope::Ally);
        assert_eq!(revalidate(&state, &source, rule, &list(&[1])), list(&[1]));
    }

    #[test]
    fn target_on_wrong_side_is_dropped() {
        let state = state(vec![enemy(0, 10)]);
        let source = enemy(0, 10);
        let rule = TargetRule::new(Scope::Enemy, true);
        assert!(revalidate(&state, &source, rule, &list(&[0])).is_empty());
    }
}
