//! Three-phase action executor.
//!
//! The front of the [`ActionQueue`] moves through `Start -> Result ->
//! Finished` one phase per tick, and never while the presenter reports an
//! animation in progress. The entry stays at the front of the queue until
//! `Finished` pops it, so the queue is strictly FIFO.
//!
//! - `Start`: discards actions whose source is no longer active, revalidates
//!   targets, rolls every effect, pays costs, plays the start cue and
//!   requests animations.
//! - `Result`: applies the rolled effects, shows floating results and plays
//!   the result cue. A display hold then starts.
//! - `Finished`: once the hold expires, settles poses, plays death cues and
//!   pops the entry.

use strum::{AsRefStr, Display};

use crate::action::{ActionQueue, BattleAction, SkillKind, TargetRule, revalidate};
use crate::combat::AppliedEffect;
use crate::config::BattleConfig;
use crate::engine::effects::{ActionPlan, SideEffect, plan_effects};
use crate::env::{DataOracle, Dice, Notification, Outputs, Pose, SystemSound};
use crate::state::{BattleState, CombatantId, Side};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecutionPhase {
    #[default]
    Start,
    Result,
    Finished,
}

/// Executor state carried between ticks.
#[derive(Clone, Debug, Default)]
pub struct Executor {
    phase: ExecutionPhase,
    plan: Option<ActionPlan>,
    applied: Vec<AppliedEffect>,
    hold: u32,
}

impl Executor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ExecutionPhase {
        self.phase
    }

    /// No action is between `Start` and `Finished`.
    pub fn is_idle(&self) -> bool {
        self.phase == ExecutionPhase::Start && self.plan.is_none()
    }

    /// Drops the action in flight.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advances the front of the queue by at most one phase.
    pub fn step(
        &mut self,
        state: &mut BattleState,
        queue: &mut ActionQueue,
        config: &BattleConfig,
        data: &dyn DataOracle,
        dice: &mut Dice<'_>,
        out: &mut Outputs<'_>,
    ) {
        if out.presenter.is_animation_in_progress() {
            return;
        }
        match self.phase {
            ExecutionPhase::Start => self.start(state, queue, config, data, dice, out),
            ExecutionPhase::Result => self.resolve(state, config, data, out),
            ExecutionPhase::Finished => self.finish(state, queue, data, out),
        }
    }

    // ========================================================================
    // Start
    // ========================================================================

    fn start(
        &mut self,
        state: &mut BattleState,
        queue: &mut ActionQueue,
        config: &BattleConfig,
        data: &dyn DataOracle,
        dice: &mut Dice<'_>,
        out: &mut Outputs<'_>,
    ) {
        let Some(queued) = queue.front().cloned() else {
            return;
        };

        let source_active = state
            .combatant(queued.source)
            .is_some_and(|source| source.is_active());
        if !source_active {
            tracing::debug!(
                "executor: discarding {} from inactive {}",
                queued.action,
                queued.source
            );
            queue.pop();
            if let Some(source) = state.combatant_mut(queued.source) {
                source.pending = None;
            }
            return;
        }

        if let Some(source) = state.combatant_mut(queued.source) {
            source.defending = false;
        }

        let Some(source) = state.combatant(queued.source) else {
            return;
        };
        let rule = TargetRule::for_action(queued.action, data).map(|rule| {
            queued
                .forced_group
                .map_or(rule, |group| rule.aimed_at(source.side, group))
        });
        let targets = match rule {
            Some(rule) => revalidate(state, source, rule, &queued.targets),
            None => {
                tracing::warn!("executor: {} refers to unknown data", queued.action);
                Default::default()
            }
        };
        if targets.is_empty() {
            tracing::debug!("executor: {} has no target for {}", source.name, queued.action);
            out.presenter
                .show_notification(Notification::NoTarget { source: source.id });
            queue.pop();
            complete(state, queued.source);
            return;
        }

        let plan = plan_effects(source, &queued, targets, state, config, data, dice);
        tracing::debug!(
            "executor: start {} by {} on {:?}",
            plan.action,
            source.name,
            plan.targets.as_slice()
        );

        if let Some(source) = state.combatant_mut(plan.source) {
            source.sp.apply(-i64::from(plan.cost.sp));
        }
        if let Some(item) = plan.cost.item {
            state.inventory.take(item);
        }

        out.presenter.show_notification(Notification::ActionStarted {
            source: plan.source,
            action: plan.action,
            ticks: config.notification_ticks,
        });
        out.play(plan.cues.start);
        if let Some(animation) = plan.animation {
            for &target in &plan.targets {
                out.presenter.request_animation(target, animation);
            }
        }

        self.plan = Some(plan);
        self.phase = ExecutionPhase::Result;
    }

    // ========================================================================
    // Result
    // ========================================================================

    fn resolve(
        &mut self,
        state: &mut BattleState,
        config: &BattleConfig,
        data: &dyn DataOracle,
        out: &mut Outputs<'_>,
    ) {
        let Some(plan) = self.plan.as_ref() else {
            self.phase = ExecutionPhase::Start;
            return;
        };

        for outcome in &plan.outcomes {
            let Some(target) = state.combatant_mut(outcome.target) else {
                continue;
            };
            let applied = outcome.apply(target);
            for &result in &applied.floating {
                out.presenter.show_floating_result(outcome.target, result);
            }
            if applied.damaged {
                out.presenter.set_pose(outcome.target, Pose::Damage);
            }
            self.applied.push(applied);
        }

        if let Some(switch) = plan.switches.turn_on {
            state.switches.set(switch, true);
        }
        if let Some(switch) = plan.switches.turn_off {
            state.switches.set(switch, false);
        }
        apply_side_effect(plan, state, data, out);

        if matches!(plan.action, BattleAction::Attack | BattleAction::DualAttack) {
            if let Some(source) = state.combatant_mut(plan.source) {
                source.charged = false;
            }
        }

        if plan.missed_everything() {
            out.play(data.system_sound(SystemSound::Evasion));
        } else {
            out.play(plan.cues.result);
        }

        self.hold = config.result_hold_ticks;
        self.phase = ExecutionPhase::Finished;
    }

    // ========================================================================
    // Finished
    // ========================================================================

    fn finish(
        &mut self,
        state: &mut BattleState,
        queue: &mut ActionQueue,
        data: &dyn DataOracle,
        out: &mut Outputs<'_>,
    ) {
        if self.hold > 0 {
            self.hold -= 1;
            return;
        }

        let plan = self.plan.take();
        let death_cue = plan.as_ref().and_then(|plan| plan.cues.death);
        for applied in self.applied.drain(..) {
            let Some(target) = state.combatant(applied.target) else {
                continue;
            };
            if applied.killed {
                let fallback = match target.side {
                    Side::Ally => SystemSound::AllyDeath,
                    Side::Enemy => SystemSound::EnemyDeath,
                };
                out.play(death_cue.or_else(|| data.system_sound(fallback)));
                out.presenter.set_pose(applied.target, Pose::Dead);
            } else if target.is_alive() {
                out.presenter.set_pose(applied.target, Pose::Idle);
            }
        }

        queue.pop();
        if let Some(plan) = plan {
            tracing::debug!("executor: finished {} by {}", plan.action, plan.source);
            complete(state, plan.source);
        }
        self.phase = ExecutionPhase::Start;
    }
}

/// Marks the source's queued action as done.
fn complete(state: &mut BattleState, source: CombatantId) {
    if let Some(source) = state.combatant_mut(source) {
        source.pending = None;
        source.turns += 1;
    }
}

fn apply_side_effect(
    plan: &ActionPlan,
    state: &mut BattleState,
    data: &dyn DataOracle,
    out: &mut Outputs<'_>,
) {
    match plan.side_effect {
        SideEffect::None => return,
        SideEffect::Switch(switch) => {
            state.switches.set(switch, true);
            return;
        }
        SideEffect::PartyEscape { success: true } => {
            tracing::debug!("executor: party escape succeeded");
            state.escape_requested = true;
            out.play(data.system_sound(SystemSound::Escape));
            return;
        }
        SideEffect::PartyEscape { success: false } => {
            state.escape_attempts += 1;
            out.presenter.show_notification(Notification::EscapeFailed);
            return;
        }
        SideEffect::Defend | SideEffect::Charge | SideEffect::Hide | SideEffect::Transform(_) => {}
    }

    let Some(source) = state.combatant_mut(plan.source) else {
        return;
    };
    match plan.side_effect {
        SideEffect::Defend => source.defending = true,
        SideEffect::Charge => source.charged = true,
        SideEffect::Hide => {
            source.hidden = true;
            if is_escape(plan.action, data) {
                out.play(data.system_sound(SystemSound::Escape));
            }
        }
        SideEffect::Transform(id) => {
            if let Some(template) = data.enemy(id) {
                tracing::debug!("executor: {} transforms into {}", source.name, template.name);
                source.transform_into(template);
            }
        }
        _ => {}
    }
}

fn is_escape(action: BattleAction, data: &dyn DataOracle) -> bool {
    match action {
        BattleAction::Escape => true,
        BattleAction::Skill(id) => data
            .skill(id)
            .is_some_and(|skill| skill.kind == SkillKind::Escape),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{QueuedAction, TargetList};
    use crate::env::{
        DataSnapshot, FixedRng, FloatingResult, PresentationEvent, Recorder, RollCursor,
    };
    use crate::state::SoundId;
    use crate::testing::{ally, enemy, state};

    const ENEMY_DEATH: SoundId = SoundId(40);

    struct Rig {
        state: BattleState,
        queue: ActionQueue,
        config: BattleConfig,
        data: DataSnapshot,
        cursor: RollCursor,
        executor: Executor,
        recorder: Recorder,
    }

    impl Rig {
        fn new(state: BattleState) -> Self {
            Self {
                state,
                queue: ActionQueue::new(),
                config: BattleConfig {
                    attack_variance: 0,
                    result_hold_ticks: 2,
                    ..BattleConfig::default()
                },
                data: DataSnapshot::new()
                    .with_system_sound(SystemSound::EnemyDeath, ENEMY_DEATH),
                cursor: RollCursor::new(9),
                executor: Executor::new(),
                recorder: Recorder::new(),
            }
        }

        fn queue(&mut self, source: u32, action: BattleAction, targets: &[u32]) {
            let targets: TargetList = targets.iter().map(|&id| CombatantId(id)).collect();
            if let Some(c) = self.state.combatant_mut(CombatantId(source)) {
                c.pending = Some(action);
            }
            self.queue.push(QueuedAction::new(CombatantId(source), action, targets));
        }

        fn step(&mut self) {
            let mut dice = Dice::new(&FixedRng(0), &mut self.cursor);
            let mut out = self.recorder.outputs();
            self.executor.step(
                &mut self.state,
                &mut self.queue,
                &self.config,
                &self.data,
                &mut dice,
                &mut out,
            );
            self.recorder.advance();
        }

        fn drain(&mut self) -> u32 {
            let mut ticks = 0;
            while !self.queue.is_empty() {
                self.step();
                ticks += 1;
                assert!(ticks < 1_000, "executor stalled");
            }
            ticks
        }
    }

    #[test]
    fn attack_goes_through_all_three_phases() {
        let mut rig = Rig::new(state(vec![ally(0, 100)], vec![enemy(1, 50)]));
        rig.queue(0, BattleAction::Attack, &[1]);

        rig.step();
        assert_eq!(rig.executor.phase(), ExecutionPhase::Result);
        assert_eq!(rig.state.combatants[1].hp.current, 50);

        rig.step();
        assert_eq!(rig.executor.phase(), ExecutionPhase::Finished);
        assert_eq!(rig.state.combatants[1].hp.current, 42);
        assert_eq!(rig.recorder.floating_for(CombatantId(1)), vec![FloatingResult::Damage(8)]);

        rig.step();
        rig.step();
        assert!(!rig.queue.is_empty(), "hold keeps the entry queued");
        rig.step();
        assert!(rig.queue.is_empty());
        assert!(rig.executor.is_idle());
        assert_eq!(rig.state.combatants[0].turns, 1);
        assert_eq!(rig.state.combatants[0].pending, None);
        assert_eq!(rig.recorder.last_pose(CombatantId(1)), Some(Pose::Idle));
    }

    #[test]
    fn killing_blow_plays_death_cue_and_dead_pose() {
        let mut rig = Rig::new(state(vec![ally(0, 100)], vec![enemy(1, 5)]));
        rig.queue(0, BattleAction::Attack, &[1]);
        rig.drain();
        assert!(rig.state.combatants[1].is_dead());
        assert_eq!(rig.recorder.last_pose(CombatantId(1)), Some(Pose::Dead));
        assert!(rig.recorder.audio.cues.contains(&ENEMY_DEATH));
    }

    #[test]
    fn dead_source_is_discarded_without_effect() {
        let mut rig = Rig::new(state(vec![ally(0, 100)], vec![enemy(1, 0)]));
        rig.queue(1, BattleAction::Attack, &[0]);
        rig.step();
        assert!(rig.queue.is_empty());
        assert_eq!(rig.state.combatants[0].hp.current, 100);
        assert_eq!(rig.state.combatants[1].pending, None);
        assert!(rig.recorder.screen.events.is_empty());
    }

    #[test]
    fn dead_target_is_reassigned_in_formation_order() {
        let mut rig = Rig::new(state(
            vec![ally(0, 100)],
            vec![enemy(1, 0), enemy(2, 50), enemy(3, 50)],
        ));
        rig.queue(0, BattleAction::Attack, &[1]);
        rig.drain();
        assert_eq!(rig.state.combatants[2].hp.current, 42);
        assert_eq!(rig.state.combatants[3].hp.current, 50);
    }

    #[test]
    fn forced_attack_lands_on_the_attackers_own_side() {
        let mut rig = Rig::new(state(vec![ally(0, 100), ally(1, 100)], vec![enemy(2, 50)]));
        let targets: TargetList = std::iter::once(CombatantId(1)).collect();
        rig.state.combatants[0].pending = Some(BattleAction::Attack);
        rig.queue.push(
            QueuedAction::new(CombatantId(0), BattleAction::Attack, targets).forced_at(Side::Ally),
        );
        rig.drain();

        assert_eq!(rig.state.combatants[1].hp.current, 92);
        assert_eq!(rig.state.combatants[2].hp.current, 50);
        assert_eq!(rig.state.combatants[0].turns, 1);
        assert!(!rig.recorder.screen.events.iter().any(|event| matches!(
            event,
            PresentationEvent::Notification(Notification::NoTarget { .. })
        )));
    }

    #[test]
    fn action_without_any_target_is_a_no_op() {
        let mut rig = Rig::new(state(vec![ally(0, 100)], vec![enemy(1, 0)]));
        rig.queue(0, BattleAction::Attack, &[1]);
        rig.step();
        assert!(rig.queue.is_empty());
        assert_eq!(rig.state.combatants[0].turns, 1);
        assert_eq!(
            rig.recorder.screen.events,
            vec![PresentationEvent::Notification(Notification::NoTarget {
                source: CombatantId(0)
            })]
        );
    }

    #[test]
    fn animation_blocks_phase_progress() {
        let mut rig = Rig::new(state(vec![ally(0, 100)], vec![enemy(1, 50)]));
        rig.recorder = Recorder::with_animation_ticks(3);
        rig.state.combatants[0].attack.animation = Some(crate::state::AnimationId(1));
        rig.queue(0, BattleAction::Attack, &[1]);

        rig.step();
        assert_eq!(rig.executor.phase(), ExecutionPhase::Result);
        rig.step();
        rig.step();
        assert_eq!(rig.executor.phase(), ExecutionPhase::Result);
        assert_eq!(rig.state.combatants[1].hp.current, 50);
        rig.drain();
        assert_eq!(rig.state.combatants[1].hp.current, 42);
    }

    #[test]
    fn defend_lasts_until_the_next_action_starts() {
        let mut rig = Rig::new(state(vec![ally(0, 100)], vec![enemy(1, 50)]));
        rig.queue(0, BattleAction::Defend, &[0]);
        rig.drain();
        assert!(rig.state.combatants[0].defending);

        rig.queue(0, BattleAction::Observe, &[0]);
        rig.step();
        assert!(!rig.state.combatants[0].defending);
    }

    #[test]
    fn queue_is_resolved_in_fifo_order() {
        let mut rig = Rig::new(state(
            vec![ally(0, 100), ally(1, 100), ally(2, 100)],
            vec![enemy(3, 50)],
        ));
        rig.queue(2, BattleAction::Observe, &[2]);
        rig.queue(0, BattleAction::Observe, &[0]);
        rig.queue(1, BattleAction::Observe, &[1]);
        rig.drain();

        let order: Vec<CombatantId> = rig
            .recorder
            .screen
            .events
            .iter()
            .filter_map(|event| match event {
                PresentationEvent::Notification(Notification::ActionStarted { source, .. }) => {
                    Some(*source)
                }
                _ => None,
            })
            .collect();
        assert_eq!(order, vec![CombatantId(2), CombatantId(0), CombatantId(1)]);
    }

    #[test]
    fn failed_party_escape_counts_attempts() {
        let mut rig = Rig::new(state(vec![ally(0, 100)], vec![enemy(1, 50)]));
        rig.config.escape_allowed = false;
        rig.queue(0, BattleAction::Escape, &[0]);
        rig.drain();
        assert_eq!(rig.state.escape_attempts, 1);
        assert!(!rig.state.escape_requested);
    }
}
