//! Deterministic turn resolution for gauge-based (ATB) battles.
//!
//! `battle-core` owns the rules: gauge scheduling, rule-driven enemy AI, the
//! FIFO action queue, the three-phase executor, hit/damage formulas and the
//! outcome checker. It performs no I/O. Descriptors and randomness come in
//! through the oracles bundled in [`env::Env`]; presentation and audio go out
//! through [`env::Outputs`]. A host drives everything by calling
//! [`engine::Battle::tick`].
pub mod action;
pub mod ai;
pub mod combat;
pub mod config;
pub mod context;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use action::{
    ActionDescriptor, ActionQueue, BattleAction, ItemDescriptor, QueuedAction, Scope, SkillKind,
    SoundCues, StatusMode, SwitchEffects, TargetList, TargetRule,
};
pub use ai::{BasicBehavior, EnemyActionRule, RuleCondition, RuleEffect, RuleSelector};
pub use combat::{EffectOutcome, StatusChange};
pub use config::{AtbMode, BattleConfig};
pub use context::BattleContext;
pub use engine::{
    Battle, BattleError, BattleOutcome, BattleRewards, BattleSetup, CommandError, ExecutionPhase,
    OutcomeChecker, TargetSelection,
};
pub use env::{
    AudioLog, AudioSink, BattleEnv, DataOracle, DataSnapshot, Dice, EnemyDescriptor, Env,
    FixedRng, FloatingResult, ItemDrop, Notification, NullOutputs, OracleError, Outputs, PcgRng,
    Pose, PresentationEvent, Presenter, Recorder, RngOracle, RollCursor, ScreenLog, SystemSound,
};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    AffectedStats, AllySpec, AnimationId, AttackProfile, BattleState, Combatant, CombatantId,
    Control, EnemyId, Inventory, ItemId, ResourceMeter, Restriction, Side, SkillId, SoundId,
    Stats, StatusDescriptor, StatusId, StatusSet, SwitchId, SwitchState, Tick,
};
