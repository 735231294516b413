//! Command line arguments.

use std::path::PathBuf;
use std::time::Duration;

use battle_content::ConfigLoader;
use battle_runtime::RuntimeConfig;
use clap::Parser;

/// Run an automated turn-based battle between two teams
#[derive(Debug, Clone, Parser)]
#[command(name = "battle")]
#[command(version, long_about = None)]
pub struct Args {
    /// Seed for target sampling and generated recruits
    #[arg(long)]
    pub seed: Option<u64>,

    /// Combatants per side
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u16).range(1..))]
    pub team_size: u16,

    /// Pause between turns in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Give up after this many turns
    #[arg(long)]
    pub turn_limit: Option<u64>,

    /// JSON roster file; stored combatants fight first and everyone is saved afterwards
    #[arg(long, value_name = "FILE")]
    pub roster: Option<PathBuf>,

    /// Delete the roster file before loading it
    #[arg(long, requires = "roster")]
    pub clear_roster: bool,

    /// Battle configuration TOML; replaces the environment's battle settings
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Ability catalog RON; defaults to the built-in presets
    #[arg(long, value_name = "FILE")]
    pub abilities: Option<PathBuf>,
}

impl Args {
    /// Layers settings: `base` (usually the environment), then `--config`, then flags.
    pub fn runtime_config(&self, base: RuntimeConfig) -> anyhow::Result<RuntimeConfig> {
        let mut config = base;

        if let Some(path) = &self.config {
            config.battle = ConfigLoader::load(path)?;
        }
        if let Some(seed) = self.seed {
            config.battle.seed = seed;
        }
        if let Some(limit) = self.turn_limit {
            config.battle.turn_limit = Some(limit);
        }
        if let Some(ms) = self.delay_ms {
            config.turn_delay = Duration::from_millis(ms);
        }

        Ok(config)
    }
}
