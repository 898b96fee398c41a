//! Content loaders for reading battle data from files.

pub mod config;
pub mod data;
pub mod factory;
pub mod party;
pub mod troops;

pub use config::ConfigLoader;
pub use data::DataLoader;
pub use factory::{ContentBundle, ContentFactory};
pub use party::{InventoryEntry, PartyDefinition, PartyLoader};
pub use troops::{TroopDefinition, TroopLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
