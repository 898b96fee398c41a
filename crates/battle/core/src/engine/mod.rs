//! Tick-driven battle engine.
//!
//! [`Battle`] owns the battle state, the action queue and the executor. A
//! host calls [`Battle::tick`] once per frame; every tick runs:
//!
//! 1. the interrupt check (abort, party escape);
//! 2. the gauge scheduler, which queues AI and auto actions;
//! 3. one executor phase;
//! 4. the full outcome check, whenever the executor is between actions.
//!
//! Player commands arrive between ticks through [`Battle::submit_command`].
mod effects;
mod errors;
mod executor;
mod outcome;
mod scheduler;
mod setup;

pub use effects::{ActionCost, ActionPlan, SideEffect, escape_chance, plan_effects};
pub use errors::{BattleError, CommandError};
pub use executor::{ExecutionPhase, Executor};
pub use outcome::{BattleOutcome, BattleRewards, OutcomeChecker};
pub use scheduler::{
    advance_gauges, awaiting_command, dispatch_ready, gauges_frozen, restriction_of,
};
pub use setup::BattleSetup;

use crate::action::{
    ActionQueue, BattleAction, QueuedAction, Scope, TargetList, TargetRule, collect_group,
};
use crate::config::BattleConfig;
use crate::context::BattleContext;
use crate::env::{
    BattleEnv, DataOracle, Dice, OracleError, Outputs, RngOracle, RollCursor, SystemSound,
};
use crate::state::{BattleState, Combatant, CombatantId, Control, Side, Tick};

/// How a player picked the target of a command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetSelection {
    /// First legal target in formation order, or the whole group.
    #[default]
    Auto,
    /// A specific combatant. Ignored by group and self scopes.
    Single(CombatantId),
}

/// A running battle.
#[derive(Clone, Debug)]
pub struct Battle {
    config: BattleConfig,
    state: BattleState,
    queue: ActionQueue,
    rolls: RollCursor,
    executor: Executor,
    outcome: BattleOutcome,
    rewards: Option<BattleRewards>,
}

impl Battle {
    /// Builds the roster and rolls every combatant's speed.
    ///
    /// # Errors
    ///
    /// Fails when an oracle is missing, a side is empty or oversized, or the
    /// troop names an unknown enemy template.
    pub fn new(
        config: BattleConfig,
        setup: BattleSetup,
        seed: u64,
        env: BattleEnv<'_>,
    ) -> Result<Self, BattleError> {
        let data = env.data()?;
        let rng = env.rng()?;

        check_side(Side::Ally, setup.allies.len(), BattleConfig::MAX_ALLIES)?;
        check_side(Side::Enemy, setup.troop.len(), BattleConfig::MAX_ENEMIES)?;

        let mut rolls = RollCursor::new(seed);
        let mut dice = Dice::new(rng, &mut rolls);
        let mut combatants = Vec::with_capacity(setup.allies.len() + setup.troop.len());

        for (slot, spec) in setup.allies.iter().enumerate() {
            let speed = config.speed_for(spec.stats.agility, dice.below(config.speed_spread));
            let id = CombatantId(combatants.len() as u32);
            let mut ally = Combatant::ally(id, slot as u8, spec, speed);
            if config.first_strike {
                ally.gauge = config.gauge_full;
            }
            combatants.push(ally);
        }

        for (slot, &enemy_id) in setup.troop.iter().enumerate() {
            let template = data
                .enemy(enemy_id)
                .ok_or(OracleError::EnemyNotFound(enemy_id))?;
            let speed = config.speed_for(template.stats.agility, dice.below(config.speed_spread));
            let id = CombatantId(combatants.len() as u32);
            combatants.push(Combatant::enemy(id, slot as u8, template, speed));
        }

        tracing::info!(
            "battle: {} allies vs {} enemies (seed {seed})",
            setup.allies.len(),
            setup.troop.len()
        );

        Ok(Self {
            config,
            state: BattleState::new(combatants, setup.switches, setup.inventory),
            queue: ActionQueue::new(),
            rolls,
            executor: Executor::new(),
            outcome: BattleOutcome::InProgress,
            rewards: None,
        })
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Advances the battle by one tick and returns the current outcome.
    ///
    /// Once the outcome is terminal this is a no-op.
    ///
    /// # Errors
    ///
    /// Fails only when an oracle is missing from `env`.
    pub fn tick(
        &mut self,
        env: BattleEnv<'_>,
        out: &mut Outputs<'_>,
    ) -> Result<BattleOutcome, BattleError> {
        if self.outcome.is_terminal() {
            return Ok(self.outcome);
        }
        let data = env.data()?;
        let rng = env.rng()?;

        let interrupt = OutcomeChecker::interrupt(&BattleContext::new(&self.state, &self.config));
        if interrupt.is_terminal() {
            self.conclude(interrupt, data, rng);
            return Ok(self.outcome);
        }

        self.state.clock = self.state.clock + 1;
        {
            let mut dice = Dice::new(rng, &mut self.rolls);
            if !gauges_frozen(&self.state, &self.queue, &self.config) {
                advance_gauges(&mut self.state, &self.config);
            }
            dispatch_ready(&mut self.state, &mut self.queue, &self.config, data, &mut dice);
            self.executor.step(
                &mut self.state,
                &mut self.queue,
                &self.config,
                data,
                &mut dice,
                out,
            );
        }

        if self.executor.is_idle() {
            let outcome = OutcomeChecker::evaluate(&BattleContext::new(&self.state, &self.config));
            if outcome.is_terminal() {
                self.conclude(outcome, data, rng);
            }
        }
        Ok(self.outcome)
    }

    fn conclude(&mut self, outcome: BattleOutcome, data: &dyn DataOracle, rng: &dyn RngOracle) {
        self.outcome = outcome;
        self.queue.clear();
        self.executor.reset();
        for combatant in &mut self.state.combatants {
            combatant.pending = None;
        }
        if outcome == BattleOutcome::Victory {
            let mut dice = Dice::new(rng, &mut self.rolls);
            self.rewards = Some(BattleRewards::collect(&self.state, data, &mut dice));
        }
        tracing::info!("battle: {} at tick {}", outcome, self.state.clock);
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Queues an already resolved action. The source must be active; its
    /// gauge restarts from empty.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] when the source is unknown or inactive, or
    /// the battle is over.
    pub fn enqueue_action(
        &mut self,
        source: CombatantId,
        action: BattleAction,
        targets: TargetList,
    ) -> Result<(), CommandError> {
        if self.outcome.is_terminal() {
            return Err(CommandError::NotAwaitingCommand(source));
        }
        let combatant = self
            .state
            .combatant(source)
            .ok_or(CommandError::UnknownCombatant(source))?;
        if !combatant.is_active() {
            return Err(CommandError::CombatantInactive(source));
        }
        if targets.is_empty() {
            return Err(CommandError::NoTarget);
        }
        self.push(QueuedAction::new(source, action, targets));
        Ok(())
    }

    /// Validates and queues a player command. A rejected command plays the
    /// reject cue and leaves the battle untouched.
    ///
    /// # Errors
    ///
    /// Returns the [`CommandError`] describing why the command was refused.
    pub fn submit_command(
        &mut self,
        actor: CombatantId,
        action: BattleAction,
        selection: TargetSelection,
        env: BattleEnv<'_>,
        out: &mut Outputs<'_>,
    ) -> Result<(), CommandError> {
        match self.validate_command(actor, action, selection, env) {
            Ok(queued) => {
                self.push(queued);
                Ok(())
            }
            Err(err) => {
                tracing::warn!("battle: rejected {} from {}: {}", action, actor, err);
                if let Ok(data) = env.data() {
                    out.play(data.system_sound(SystemSound::Reject));
                }
                Err(err)
            }
        }
    }

    fn validate_command(
        &self,
        actor: CombatantId,
        action: BattleAction,
        selection: TargetSelection,
        env: BattleEnv<'_>,
    ) -> Result<QueuedAction, CommandError> {
        let data = env.data()?;
        if self.outcome.is_terminal() {
            return Err(CommandError::NotAwaitingCommand(actor));
        }
        let combatant = self
            .state
            .combatant(actor)
            .ok_or(CommandError::UnknownCombatant(actor))?;
        if !combatant.is_active() {
            return Err(CommandError::CombatantInactive(actor));
        }
        if combatant.side != Side::Ally
            || combatant.control != Control::Manual
            || !combatant.gauge_is_full(self.config.gauge_full)
            || combatant.pending.is_some()
        {
            return Err(CommandError::NotAwaitingCommand(actor));
        }

        match action {
            BattleAction::DualAttack
            | BattleAction::Charge
            | BattleAction::SelfDestruct
            | BattleAction::Transform(_) => return Err(CommandError::ActionNotAvailable(action)),
            BattleAction::Skill(id) => {
                let skill = data.skill(id).ok_or(CommandError::UnknownSkill(id))?;
                if !combatant.skills.contains(&id) {
                    return Err(CommandError::SkillNotLearned(id));
                }
                if combatant.sp.current < skill.sp_cost {
                    return Err(CommandError::InsufficientSp {
                        required: skill.sp_cost,
                        available: combatant.sp.current,
                    });
                }
            }
            BattleAction::Item(id) => {
                if data.item(id).is_none() || self.state.inventory.count(id) == 0 {
                    return Err(CommandError::ItemUnavailable(id));
                }
            }
            BattleAction::Escape if !self.config.escape_allowed => {
                return Err(CommandError::EscapeForbidden);
            }
            BattleAction::Attack
            | BattleAction::Defend
            | BattleAction::Observe
            | BattleAction::Escape
            | BattleAction::Nothing => {}
        }

        let rule = TargetRule::for_action(action, data).ok_or(CommandError::NoTarget)?;
        let targets = self.select_targets(combatant, rule, selection)?;
        Ok(QueuedAction::new(actor, action, targets))
    }

    fn select_targets(
        &self,
        actor: &Combatant,
        rule: TargetRule,
        selection: TargetSelection,
    ) -> Result<TargetList, CommandError> {
        let group = rule.group(actor.side);
        let legal = |c: &Combatant| {
            c.side == group && !c.hidden && (c.is_alive() || !rule.requires_living)
        };

        let targets: TargetList = match (rule.scope, selection) {
            (Scope::User, _) => std::iter::once(actor.id).collect(),
            (Scope::Enemy | Scope::Ally, TargetSelection::Single(id)) => {
                let target = self
                    .state
                    .combatant(id)
                    .ok_or(CommandError::InvalidTarget(id))?;
                if !legal(target) {
                    return Err(CommandError::InvalidTarget(id));
                }
                std::iter::once(id).collect()
            }
            (Scope::Enemy | Scope::Ally, TargetSelection::Auto) => self
                .state
                .members(group)
                .find(|c| legal(c))
                .map(|c| c.id)
                .into_iter()
                .collect(),
            (Scope::Enemies | Scope::Allies | Scope::Party, _) => {
                collect_group(&self.state, group, rule.scope)
            }
        };

        if targets.is_empty() {
            return Err(CommandError::NoTarget);
        }
        Ok(targets)
    }

    fn push(&mut self, queued: QueuedAction) {
        if let Some(source) = self.state.combatant_mut(queued.source) {
            tracing::debug!("battle: {} queues {}", source.name, queued.action);
            source.pending = Some(queued.action);
            source.gauge = 0;
        }
        self.queue.push(queued);
    }

    /// Requests the battle to end with [`BattleOutcome::Aborted`] on the next
    /// tick.
    pub fn abort(&mut self) {
        self.state.abort_requested = true;
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Manual ally currently waiting for a command.
    pub fn awaiting_command(&self) -> Option<CombatantId> {
        if self.outcome.is_terminal() {
            return None;
        }
        awaiting_command(&self.state, &self.config)
    }

    pub fn outcome(&self) -> BattleOutcome {
        self.outcome
    }

    /// Rewards, available after a victory.
    pub fn rewards(&self) -> Option<&BattleRewards> {
        self.rewards.as_ref()
    }

    pub fn is_queue_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn queue(&self) -> &ActionQueue {
        &self.queue
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn clock(&self) -> Tick {
        self.state.clock
    }

    pub fn phase(&self) -> ExecutionPhase {
        self.executor.phase()
    }

    /// Read-only view used by rule conditions and the outcome checker.
    pub fn context(&self) -> BattleContext<'_> {
        BattleContext::new(&self.state, &self.config)
    }
}

fn check_side(side: Side, count: usize, max: usize) -> Result<(), BattleError> {
    if count == 0 {
        return Err(BattleError::EmptySide(side));
    }
    if count > max {
        return Err(BattleError::TooManyCombatants { side, count, max });
    }
    Ok(())
}
