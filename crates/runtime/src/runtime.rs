//! High-level runtime orchestrator.
//!
//! [`BattleRuntime`] owns one [`Battle`], drives its tick loop, asks the
//! [`CommandProvider`] for commands whenever a manual ally is waiting and
//! publishes everything the battle emits on the [`EventBus`].

use std::sync::Arc;
use std::time::Duration;

use battle_core::{
    Battle, BattleOutcome, BattleRewards, CombatantId, Outputs, Side,
};
use battle_content::ContentBundle;
use serde::{Deserialize, Serialize};

use crate::api::{AutoCommandProvider, CommandProvider, Result, RuntimeError};
use crate::events::{BattleEvent, Event, EventBus};
use crate::oracle::OracleManager;
use crate::presenter::{BusAudio, BusPresenter};

/// Runtime configuration shared across the orchestrator and its sinks.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Safety stop. A battle still running at this clock is aborted.
    pub max_ticks: u64,
    /// Wall-clock pacing between ticks. `None` runs as fast as possible.
    pub tick_interval: Option<Duration>,
    pub event_buffer_size: usize,
    /// Ticks each requested animation keeps the executor waiting.
    pub animation_ticks: u32,
    /// Rejected commands tolerated per request before giving up.
    pub max_command_retries: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_ticks: 100_000,
            tick_interval: None,
            event_buffer_size: 256,
            animation_ticks: 0,
            max_command_retries: 3,
        }
    }
}

/// Final state of one combatant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantReport {
    pub id: CombatantId,
    pub name: String,
    pub side: Side,
    pub hp: u32,
    pub max_hp: u32,
    pub hidden: bool,
    pub turns: u32,
}

/// Summary returned when a battle ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleReport {
    pub troop: u32,
    pub seed: u64,
    pub outcome: BattleOutcome,
    pub ticks: u64,
    pub rewards: Option<BattleRewards>,
    pub combatants: Vec<CombatantReport>,
}

impl BattleReport {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(RuntimeError::Report)
    }
}

/// Runs a single battle to completion.
pub struct BattleRuntime {
    config: RuntimeConfig,
    battle: Battle,
    oracles: OracleManager,
    provider: Box<dyn CommandProvider>,
    bus: EventBus,
    presenter: BusPresenter,
    audio: BusAudio,
    troop: u32,
    seed: u64,
}

impl BattleRuntime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn battle(&self) -> &Battle {
        &self.battle
    }

    /// Get a clone of the event bus for subscribing to topics
    pub fn event_bus(&self) -> EventBus {
        self.bus.clone()
    }

    /// Runs the tick loop until the battle reaches a terminal outcome.
    pub async fn run(mut self) -> Result<BattleReport> {
        self.publish(BattleEvent::Started {
            troop: self.troop,
            seed: self.seed,
        });

        let mut interval = self.config.tick_interval.map(tokio::time::interval);
        let mut phase = self.battle.phase();

        loop {
            if let Some(actor) = self.battle.awaiting_command() {
                self.request_command(actor).await?;
            }
            if let Some(interval) = interval.as_mut() {
                interval.tick().await;
            }
            if self.battle.clock().0 >= self.config.max_ticks {
                tracing::warn!("runtime: max ticks ({}) reached, aborting", self.config.max_ticks);
                self.battle.abort();
            }

            let outcome = self.step()?;
            if self.battle.phase() != phase {
                phase = self.battle.phase();
                self.publish(BattleEvent::PhaseChanged {
                    clock: self.battle.clock(),
                    phase,
                });
            }
            if outcome.is_terminal() {
                break;
            }
        }

        let report = self.report();
        self.publish(BattleEvent::Finished {
            outcome: report.outcome,
            clock: self.battle.clock(),
            rewards: report.rewards.clone(),
        });
        tracing::info!("runtime: {} after {} ticks", report.outcome, report.ticks);
        Ok(report)
    }

    fn step(&mut self) -> Result<BattleOutcome> {
        self.audio.set_clock(self.battle.clock());
        let env = self.oracles.as_battle_env();
        let mut out = Outputs::new(&mut self.presenter, &mut self.audio);
        let outcome = self.battle.tick(env, &mut out)?;
        self.presenter.advance();
        Ok(outcome)
    }

    async fn request_command(&mut self, actor: CombatantId) -> Result<()> {
        let mut attempts = 0;
        loop {
            self.publish(BattleEvent::CommandRequested {
                actor,
                clock: self.battle.clock(),
            });
            let command = self
                .provider
                .provide_command(actor, self.battle.state())
                .await?;

            let submitted = {
                let env = self.oracles.as_battle_env();
                let mut out = Outputs::new(&mut self.presenter, &mut self.audio);
                self.battle
                    .submit_command(actor, command.action, command.target, env, &mut out)
            };
            let Err(error) = submitted else {
                return Ok(());
            };

            attempts += 1;
            self.publish(BattleEvent::CommandRejected {
                actor,
                action: command.action,
                reason: error.to_string(),
            });
            if attempts > self.config.max_command_retries {
                return Err(RuntimeError::CommandRejected {
                    actor,
                    attempts,
                    source: error,
                });
            }
        }
    }

    fn report(&self) -> BattleReport {
        let state = self.battle.state();
        BattleReport {
            troop: self.troop,
            seed: self.seed,
            outcome: self.battle.outcome(),
            ticks: self.battle.clock().0,
            rewards: self.battle.rewards().cloned(),
            combatants: state
                .combatants
                .iter()
                .map(|c| CombatantReport {
                    id: c.id,
                    name: c.name.clone(),
                    side: c.side,
                    hp: c.hp.current,
                    max_hp: c.hp.maximum,
                    hidden: c.hidden,
                    turns: c.turns,
                })
                .collect(),
        }
    }

    fn publish(&self, event: BattleEvent) {
        self.bus.publish(Event::Battle(event));
    }
}

/// Builder for [`BattleRuntime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    content: Option<ContentBundle>,
    troop: Option<u32>,
    seed: u64,
    provider: Option<Box<dyn CommandProvider>>,
    bus: Option<EventBus>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            content: None,
            troop: None,
            seed: 0,
            provider: None,
            bus: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required battle content
    pub fn content(mut self, content: ContentBundle) -> Self {
        self.content = Some(content);
        self
    }

    /// Select the troop to fight
    pub fn troop(mut self, id: u32) -> Self {
        self.troop = Some(id);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the command provider for manual allies (defaults to auto attack)
    pub fn command_provider(mut self, provider: impl CommandProvider + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Publish on an existing bus instead of a fresh one
    pub fn event_bus(mut self, bus: EventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Build the runtime and set up the battle
    pub fn build(self) -> Result<BattleRuntime> {
        let content = self.content.ok_or(RuntimeError::MissingContent)?;
        let troop_id = self.troop.ok_or(RuntimeError::MissingTroop)?;
        let troop = content
            .troop(troop_id)
            .ok_or(RuntimeError::UnknownTroop(troop_id))?;

        let battle_config = content.config_for(troop);
        let setup = content.setup_for(troop);
        let oracles = OracleManager::new(Arc::new(content.data));
        let battle = Battle::new(battle_config, setup, self.seed, oracles.as_battle_env())?;

        let bus = self
            .bus
            .unwrap_or_else(|| EventBus::with_capacity(self.config.event_buffer_size));
        tracing::debug!("runtime: troop {} with seed {}", troop_id, self.seed);

        Ok(BattleRuntime {
            presenter: BusPresenter::new(bus.clone(), self.config.animation_ticks),
            audio: BusAudio::new(bus.clone()),
            config: self.config,
            battle,
            oracles,
            provider: self
                .provider
                .unwrap_or_else(|| Box::new(AutoCommandProvider)),
            bus,
            troop: troop_id,
            seed: self.seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_requires_content() {
        let err = BattleRuntime::builder().troop(1).build().err();
        assert!(matches!(err, Some(RuntimeError::MissingContent)));
    }

    #[test]
    fn test_default_config_is_unpaced() {
        let config = RuntimeConfig::default();
        assert!(config.tick_interval.is_none());
        assert_eq!(config.animation_ticks, 0);
    }
}
