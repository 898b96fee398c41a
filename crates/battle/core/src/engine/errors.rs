//! Battle engine errors.
//!
//! Nothing that happens inside a running battle is an error: dead targets,
//! empty rule tables and unknown descriptor ids all fall back to a silent
//! no-op. The only failures are a battle that cannot be built and a player
//! command that cannot be accepted.

use crate::action::BattleAction;
use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{CombatantId, ItemId, Side, SkillId};

// ============================================================================
// Battle Errors
// ============================================================================

/// Errors surfaced while building or ticking a battle.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    /// A side has no members at battle start.
    #[error("battle needs at least one {0} combatant")]
    EmptySide(Side),

    /// A side exceeds its roster capacity.
    #[error("too many {side} combatants: {count} (max {max})")]
    TooManyCombatants { side: Side, count: usize, max: usize },
}

impl GameError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        use BattleError::*;
        match self {
            Oracle(err) => err.severity(),
            EmptySide(_) | TooManyCombatants { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use BattleError::*;
        match self {
            Oracle(err) => err.error_code(),
            EmptySide(_) => "BATTLE_EMPTY_SIDE",
            TooManyCombatants { .. } => "BATTLE_TOO_MANY_COMBATANTS",
        }
    }
}

// ============================================================================
// Command Errors
// ============================================================================

/// Reasons a player command is refused. A refused command leaves the battle
/// untouched and plays the reject cue.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    /// The battle is over, or the actor's gauge is not full.
    #[error("{0} is not waiting for a command")]
    NotAwaitingCommand(CombatantId),

    #[error("combatant {0} not found")]
    UnknownCombatant(CombatantId),

    /// Dead or hidden.
    #[error("combatant {0} is not active")]
    CombatantInactive(CombatantId),

    /// Player units cannot use enemy-only behaviours.
    #[error("{0} is not available to player units")]
    ActionNotAvailable(BattleAction),

    #[error("skill {0} not found")]
    UnknownSkill(SkillId),

    #[error("skill {0} has not been learned")]
    SkillNotLearned(SkillId),

    #[error("not enough SP: required {required}, available {available}")]
    InsufficientSp { required: u32, available: u32 },

    #[error("item {0} is not available")]
    ItemUnavailable(ItemId),

    #[error("escape is not allowed in this battle")]
    EscapeForbidden,

    #[error("invalid target {0}")]
    InvalidTarget(CombatantId),

    /// No legal target exists for the chosen action.
    #[error("no target available")]
    NoTarget,
}

impl GameError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        use CommandError::*;
        match self {
            Oracle(err) => err.severity(),
            NotAwaitingCommand(_) | CombatantInactive(_) => ErrorSeverity::Recoverable,
            InsufficientSp { .. } | ItemUnavailable(_) | EscapeForbidden | NoTarget => {
                ErrorSeverity::Recoverable
            }
            UnknownCombatant(_) | UnknownSkill(_) | SkillNotLearned(_) => {
                ErrorSeverity::Validation
            }
            ActionNotAvailable(_) | InvalidTarget(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use CommandError::*;
        match self {
            Oracle(err) => err.error_code(),
            NotAwaitingCommand(_) => "COMMAND_NOT_AWAITING",
            UnknownCombatant(_) => "COMMAND_UNKNOWN_COMBATANT",
            CombatantInactive(_) => "COMMAND_COMBATANT_INACTIVE",
            ActionNotAvailable(_) => "COMMAND_ACTION_NOT_AVAILABLE",
            UnknownSkill(_) => "COMMAND_UNKNOWN_SKILL",
            SkillNotLearned(_) => "COMMAND_SKILL_NOT_LEARNED",
            InsufficientSp { .. } => "COMMAND_INSUFFICIENT_SP",
            ItemUnavailable(_) => "COMMAND_ITEM_UNAVAILABLE",
            EscapeForbidden => "COMMAND_ESCAPE_FORBIDDEN",
            InvalidTarget(_) => "COMMAND_INVALID_TARGET",
            NoTarget => "COMMAND_NO_TARGET",
        }
    }
}
