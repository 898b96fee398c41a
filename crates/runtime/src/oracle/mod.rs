//! Runtime wrapper around static battle content.
//!
//! [`OracleManager`] owns the descriptor snapshot and the stateless RNG and
//! hands out [`BattleEnv`] views on demand. The data is immutable at runtime;
//! dynamic state lives in [`battle_core::Battle`].
use std::sync::Arc;

use battle_core::{BattleEnv, DataSnapshot, Env, PcgRng};

/// Manages all oracle implementations and provides unified access
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) data: Arc<DataSnapshot>,
    pub(crate) rng: PcgRng,
}

impl OracleManager {
    pub fn new(data: Arc<DataSnapshot>) -> Self {
        Self {
            data,
            rng: PcgRng, // PcgRng is stateless
        }
    }

    /// Converts oracle manager into a BattleEnv for battle-core
    pub fn as_battle_env(&self) -> BattleEnv<'_> {
        Env::with_all(self.data.as_ref(), &self.rng).into_battle_env()
    }

    pub fn data(&self) -> &DataSnapshot {
        &self.data
    }
}
