//! Asynchronous abstraction for sourcing player commands.
//!
//! The runtime asks a [`CommandProvider`] whenever a manually controlled ally
//! is waiting. Implementations can wrap human input, scripted fixtures or a
//! simple auto-battle policy.
use std::collections::VecDeque;

use async_trait::async_trait;
use battle_core::{BattleAction, BattleState, CombatantId, Side, TargetSelection};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::errors::{Result, RuntimeError};

/// A command chosen for a waiting ally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCommand {
    pub action: BattleAction,
    pub target: TargetSelection,
}

impl PlayerCommand {
    pub fn new(action: BattleAction, target: TargetSelection) -> Self {
        Self { action, target }
    }

    /// Action with the first legal target picked automatically.
    pub fn auto(action: BattleAction) -> Self {
        Self::new(action, TargetSelection::Auto)
    }
}

/// Trait for providing commands based on the current battle state.
#[async_trait]
pub trait CommandProvider: Send + Sync {
    /// Provide a command for `actor`, whose gauge is full.
    ///
    /// A command the battle rejects is requested again.
    async fn provide_command(
        &self,
        actor: CombatantId,
        state: &BattleState,
    ) -> Result<PlayerCommand>;
}

/// Basic attack on the first active enemy.
pub struct AutoCommandProvider;

#[async_trait]
impl CommandProvider for AutoCommandProvider {
    async fn provide_command(
        &self,
        _actor: CombatantId,
        state: &BattleState,
    ) -> Result<PlayerCommand> {
        let target = state
            .active(Side::Enemy)
            .next()
            .map_or(TargetSelection::Auto, |enemy| TargetSelection::Single(enemy.id));
        Ok(PlayerCommand::new(BattleAction::Attack, target))
    }
}

/// Replays a fixed list of commands in order.
///
/// Once the script runs out the fallback provider takes over, or
/// [`RuntimeError::ScriptExhausted`] is returned when there is none.
pub struct ScriptedCommandProvider {
    commands: Mutex<VecDeque<PlayerCommand>>,
    fallback: Option<Box<dyn CommandProvider>>,
}

impl ScriptedCommandProvider {
    /// Script that falls back to [`AutoCommandProvider`].
    pub fn new(commands: impl IntoIterator<Item = PlayerCommand>) -> Self {
        Self {
            commands: Mutex::new(commands.into_iter().collect()),
            fallback: Some(Box::new(AutoCommandProvider)),
        }
    }

    pub fn with_fallback(mut self, fallback: impl CommandProvider + 'static) -> Self {
        self.fallback = Some(Box::new(fallback));
        self
    }

    pub fn without_fallback(mut self) -> Self {
        self.fallback = None;
        self
    }

    pub async fn remaining(&self) -> usize {
        self.commands.lock().await.len()
    }
}

#[async_trait]
impl CommandProvider for ScriptedCommandProvider {
    async fn provide_command(
        &self,
        actor: CombatantId,
        state: &BattleState,
    ) -> Result<PlayerCommand> {
        let next = self.commands.lock().await.pop_front();
        match (next, &self.fallback) {
            (Some(command), _) => Ok(command),
            (None, Some(fallback)) => fallback.provide_command(actor, state).await,
            (None, None) => Err(RuntimeError::ScriptExhausted { actor }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{
        AllySpec, AttackProfile, BattleState, Combatant, Control, EnemyDescriptor, EnemyId,
        Inventory, Stats, SwitchState,
    };

    fn state() -> BattleState {
        let ally = AllySpec {
            name: "Ayla".into(),
            level: 1,
            max_hp: 50,
            max_sp: 0,
            hp: None,
            sp: None,
            stats: Stats::new(10, 10, 10, 10),
            attack: AttackProfile::default(),
            skills: Vec::new(),
            control: Control::Manual,
        };
        let slime = EnemyDescriptor::basic(EnemyId(1), "Slime", 20, Stats::new(8, 4, 4, 4));
        let mut fallen = Combatant::enemy(CombatantId(1), 0, &slime, 30);
        fallen.kill();
        BattleState::new(
            vec![
                Combatant::ally(CombatantId(0), 0, &ally, 30),
                fallen,
                Combatant::enemy(CombatantId(2), 1, &slime, 30),
            ],
            SwitchState::new(),
            Inventory::new(),
        )
    }

    #[tokio::test]
    async fn test_auto_provider_targets_first_active_enemy() {
        let command = AutoCommandProvider
            .provide_command(CombatantId(0), &state())
            .await
            .unwrap();
        assert_eq!(command.action, BattleAction::Attack);
        assert_eq!(command.target, TargetSelection::Single(CombatantId(2)));
    }

    #[tokio::test]
    async fn test_script_plays_in_order_then_falls_back() {
        let provider = ScriptedCommandProvider::new([
            PlayerCommand::auto(BattleAction::Defend),
            PlayerCommand::auto(BattleAction::Escape),
        ]);
        let state = state();

        let first = provider.provide_command(CombatantId(0), &state).await.unwrap();
        let second = provider.provide_command(CombatantId(0), &state).await.unwrap();
        assert_eq!(first.action, BattleAction::Defend);
        assert_eq!(second.action, BattleAction::Escape);
        assert_eq!(provider.remaining().await, 0);

        let third = provider.provide_command(CombatantId(0), &state).await.unwrap();
        assert_eq!(third.action, BattleAction::Attack);
    }

    #[tokio::test]
    async fn test_script_without_fallback_runs_dry() {
        let provider = ScriptedCommandProvider::new([]).without_fallback();
        let err = provider
            .provide_command(CombatantId(0), &state())
            .await
            .unwrap_err();
        assert!(matches!(err, RuntimeError::ScriptExhausted { actor } if actor == CombatantId(0)));
    }
}
