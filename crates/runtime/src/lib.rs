//! Async orchestration for battles.
//!
//! This crate wires content, oracles, command providers and the event bus
//! around a synchronous [`battle_core::Battle`]. Consumers build a
//! [`BattleRuntime`], subscribe to the topics they care about and await
//! [`BattleRuntime::run`] for the final [`BattleReport`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`presenter`] forwards presentation and audio commands to the bus
//! - [`oracle`] adapts loaded content into battle oracles
pub mod api;
pub mod events;
pub mod oracle;
pub mod presenter;
pub mod runtime;

pub use api::{
    AutoCommandProvider, CommandProvider, PlayerCommand, Result, RuntimeError,
    ScriptedCommandProvider,
};
pub use events::{BattleEvent, Event, EventBus, SoundEvent, Topic};
pub use oracle::OracleManager;
pub use presenter::{BusAudio, BusPresenter};
pub use runtime::{BattleReport, BattleRuntime, CombatantReport, RuntimeBuilder, RuntimeConfig};
