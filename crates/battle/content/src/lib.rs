//! Data-driven battle content.
//!
//! Loaders read RON/TOML files into the in-memory types of `battle-core`:
//! - skill, item, enemy and status descriptors (RON)
//! - system sound cues (RON)
//! - troops and the starting party (RON)
//! - battle configuration (TOML)
//!
//! The files are plain serde representations of the core types. Content is
//! handed to the engine through `DataSnapshot` and `BattleSetup` and never
//! appears in battle state directly.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentBundle, ContentFactory, DataLoader, InventoryEntry, PartyDefinition,
    PartyLoader, TroopDefinition, TroopLoader,
};
