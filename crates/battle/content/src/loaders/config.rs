//! Battle configuration loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a [`BattleConfig`] from a TOML file.
    ///
    /// Missing keys fall back to the engine defaults.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::AtbMode;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("atb_mode = \"wait\"\nresult_hold_ticks = 5\n").unwrap();
        assert_eq!(config.atb_mode, AtbMode::Wait);
        assert_eq!(config.result_hold_ticks, 5);
        assert_eq!(config.gauge_full, BattleConfig::DEFAULT_GAUGE_FULL);
        assert!(config.escape_allowed);
    }

    #[test]
    fn test_malformed_config_is_rejected() {
        let err = ConfigLoader::parse("gauge_full = \"lots\"").unwrap_err();
        assert!(err.to_string().contains("config TOML"));
    }
}
