//! Event types for different topics.

use battle_core::{
    BattleAction, BattleOutcome, BattleRewards, CombatantId, ExecutionPhase, SoundId, Tick,
};
use serde::{Deserialize, Serialize};

/// Battle flow events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleEvent {
    Started { troop: u32, seed: u64 },

    /// The executor moved to another phase.
    PhaseChanged { clock: Tick, phase: ExecutionPhase },

    /// A manual ally is waiting for the command provider.
    CommandRequested { actor: CombatantId, clock: Tick },

    /// The battle refused a provided command and asks again.
    CommandRejected {
        actor: CombatantId,
        action: BattleAction,
        reason: String,
    },

    Finished {
        outcome: BattleOutcome,
        clock: Tick,
        rewards: Option<BattleRewards>,
    },
}

/// A sound cue played by the battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundEvent {
    pub cue: SoundId,
    pub clock: Tick,
}
