//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from battle setup, content lookup and command providers so
//! clients can bubble them up with consistent context.
use battle_core::{BattleError, CombatantId, CommandError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("runtime requires content to be configured before building")]
    MissingContent,

    #[error("no troop selected")]
    MissingTroop,

    #[error("unknown troop {0}")]
    UnknownTroop(u32),

    #[error(transparent)]
    Battle(#[from] BattleError),

    #[error("command provider failed: {0}")]
    Provider(String),

    #[error("scripted commands exhausted while {actor} was waiting")]
    ScriptExhausted { actor: CombatantId },

    #[error("command for {actor} rejected {attempts} times")]
    CommandRejected {
        actor: CombatantId,
        attempts: u32,
        #[source]
        source: CommandError,
    },

    #[error("failed to encode battle report")]
    Report(#[source] serde_json::Error),
}
