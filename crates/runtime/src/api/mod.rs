//! Public runtime API surface.
//!
//! Types exposed to consumers of the runtime crate: errors and the command
//! provider abstraction.

pub mod errors;
pub mod providers;

pub use errors::{Result, RuntimeError};
pub use providers::{
    AutoCommandProvider, CommandProvider, PlayerCommand, ScriptedCommandProvider,
};
