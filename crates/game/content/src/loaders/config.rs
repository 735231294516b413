//! Battle configuration loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if !(config.turn_cost.is_finite() && config.turn_cost > 0.0) {
            anyhow::bail!("turn_cost must be a positive number, got {}", config.turn_cost);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("seed = 7\nturn_limit = 500\n").unwrap();

        assert_eq!(config.seed, 7);
        assert_eq!(config.turn_limit, Some(500));
        assert_eq!(config.turn_cost, BattleConfig::DEFAULT_TURN_COST);
        assert_eq!(
            config.random_target_groups,
            BattleConfig::DEFAULT_RANDOM_TARGET_GROUPS
        );
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(ConfigLoader::parse("").unwrap(), BattleConfig::default());
    }

    #[test]
    fn test_rejects_non_positive_turn_cost() {
        assert!(ConfigLoader::parse("turn_cost = 0.0").is_err());
    }

    #[test]
    fn test_rejects_wrong_types() {
        assert!(ConfigLoader::parse("seed = \"abc\"").is_err());
    }
}
