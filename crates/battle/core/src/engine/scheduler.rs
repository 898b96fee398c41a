//! Gauge scheduler.
//!
//! Every tick each active combatant adds its speed to its gauge, clamped at
//! `gauge_full`. A full gauge means the combatant is ready:
//!
//! - manual allies wait for a player command;
//! - auto allies queue a basic attack on a random enemy;
//! - AI enemies ask the [`RuleSelector`] for a rule.
//!
//! Status restrictions are resolved before any of these. Gauges of dead or
//! hidden combatants are frozen, never reset.

use crate::action::{ActionQueue, BattleAction, QueuedAction};
use crate::ai::{RuleSelector, plan_action, plan_forced_attack, plan_rule};
use crate::config::{AtbMode, BattleConfig};
use crate::context::BattleContext;
use crate::env::{DataOracle, Dice};
use crate::state::{BattleState, Combatant, CombatantId, Control, Restriction, Side};

/// True when gauges must not move this tick.
pub fn gauges_frozen(state: &BattleState, queue: &ActionQueue, config: &BattleConfig) -> bool {
    match config.atb_mode {
        AtbMode::Active => false,
        AtbMode::Wait => !queue.is_empty() || awaiting_command(state, config).is_some(),
    }
}

/// Advances every active gauge by one tick.
pub fn advance_gauges(state: &mut BattleState, config: &BattleConfig) {
    let full = config.gauge_full;
    for combatant in state.combatants.iter_mut().filter(|c| c.is_active()) {
        if combatant.gauge >= full {
            continue;
        }
        combatant.gauge = combatant.gauge.saturating_add(combatant.speed).min(full);
        tracing::trace!(
            "scheduler: {} gauge {}/{}",
            combatant.name,
            combatant.gauge,
            full
        );
        if combatant.gauge == full {
            tracing::debug!("scheduler: {} is ready", combatant.name);
        }
    }
}

/// First manual ally whose gauge is full and who has nothing queued.
pub fn awaiting_command(state: &BattleState, config: &BattleConfig) -> Option<CombatantId> {
    state
        .active(Side::Ally)
        .find(|c| {
            c.control == Control::Manual && c.gauge_is_full(config.gauge_full) && c.pending.is_none()
        })
        .map(|c| c.id)
}

/// Lets every ready computer-controlled combatant pick its action.
///
/// The gauge of each dispatched combatant is reset whether or not an action
/// was chosen; a combatant with nothing to do simply loses its turn.
pub fn dispatch_ready(
    state: &mut BattleState,
    queue: &mut ActionQueue,
    config: &BattleConfig,
    data: &dyn DataOracle,
    dice: &mut Dice<'_>,
) {
    for index in 0..state.combatants.len() {
        let decision = {
            let combatant = &state.combatants[index];
            if !combatant.is_active()
                || !combatant.gauge_is_full(config.gauge_full)
                || combatant.pending.is_some()
            {
                continue;
            }
            let restriction = restriction_of(combatant, data);
            if restriction == Restriction::None && combatant.control == Control::Manual {
                continue;
            }
            decide(combatant, restriction, state, config, data, dice)
        };

        let combatant = &mut state.combatants[index];
        combatant.gauge = 0;
        match decision {
            Some(queued) => {
                tracing::debug!(
                    "scheduler: {} queues {} on {:?}",
                    combatant.name,
                    queued.action,
                    queued.targets.as_slice()
                );
                combatant.pending = Some(queued.action);
                queue.push(queued);
            }
            None => tracing::debug!("scheduler: {} loses its turn", combatant.name),
        }
    }
}

/// Strongest restriction among the combatant's statuses.
pub fn restriction_of(combatant: &Combatant, data: &dyn DataOracle) -> Restriction {
    combatant
        .statuses
        .iter()
        .filter_map(|id| data.status(id))
        .filter(|status| status.restriction != Restriction::None)
        .max_by_key(|status| status.priority)
        .map(|status| status.restriction)
        .unwrap_or_default()
}

fn decide(
    owner: &Combatant,
    restriction: Restriction,
    state: &BattleState,
    config: &BattleConfig,
    data: &dyn DataOracle,
    dice: &mut Dice<'_>,
) -> Option<QueuedAction> {
    match restriction {
        Restriction::CannotAct => None,
        Restriction::AttackEnemy => plan_forced_attack(owner, owner.side.opposite(), state, dice),
        Restriction::AttackAlly => plan_forced_attack(owner, owner.side, state, dice),
        Restriction::None => match owner.control {
            Control::Manual => None,
            Control::Auto => plan_action(owner, BattleAction::Attack, state, data, dice),
            Control::Ai if owner.charged => {
                plan_action(owner, BattleAction::Attack, state, data, dice)
            }
            Control::Ai => {
                let Some(template) = owner.enemy.and_then(|id| data.enemy(id)) else {
                    tracing::warn!("scheduler: {} has no enemy template", owner.name);
                    return None;
                };
                let ctx = BattleContext::new(state, config);
                let rule = RuleSelector::select(owner, &template.rules, &ctx, data, dice)?;
                plan_rule(owner, rule, state, data, dice)
            }
        },
    }
}
