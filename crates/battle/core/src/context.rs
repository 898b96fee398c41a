//! Read-only battle context.
//!
//! Rule conditions and the outcome checker read battle-wide facts (switches,
//! turn count, side aggregates) only through [`BattleContext`]. It borrows the
//! state immutably, so evaluation can never mutate the battle.

use crate::config::BattleConfig;
use crate::state::{BattleState, Side, SwitchId};

#[derive(Clone, Copy)]
pub struct BattleContext<'a> {
    state: &'a BattleState,
    config: &'a BattleConfig,
}

impl<'a> BattleContext<'a> {
    pub fn new(state: &'a BattleState, config: &'a BattleConfig) -> Self {
        Self { state, config }
    }

    pub fn state(&self) -> &'a BattleState {
        self.state
    }

    pub fn config(&self) -> &'a BattleConfig {
        self.config
    }

    pub fn switch_on(&self, id: SwitchId) -> bool {
        self.state.switches.is_on(id)
    }

    /// Elapsed battle turns.
    pub fn turn(&self) -> u32 {
        self.config.turns_at(self.state.clock.0)
    }

    pub fn living_count(&self, side: Side) -> usize {
        self.state.living_count(side)
    }

    pub fn average_level(&self, side: Side) -> u32 {
        self.state.average_level(side)
    }

    pub fn party_fatigue(&self, side: Side) -> i32 {
        self.state.party_fatigue(side)
    }

    pub fn any_active(&self, side: Side) -> bool {
        self.state.any_active(side)
    }

    pub fn escape_requested(&self) -> bool {
        self.state.escape_requested
    }

    pub fn abort_requested(&self) -> bool {
        self.state.abort_requested
    }
}
