//! Runtime configuration.
use std::env;
use std::time::Duration;

use battle_core::BattleConfig;

/// Settings for a hosted battle.
#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeConfig {
    pub battle: BattleConfig,
    /// Pause between turns so observers can follow along.
    pub turn_delay: Duration,
    /// Buffer size of each event bus topic.
    pub event_capacity: usize,
}

impl RuntimeConfig {
    pub const DEFAULT_TURN_DELAY: Duration = Duration::from_millis(1000);
    pub const DEFAULT_EVENT_CAPACITY: usize = 256;

    /// Construct runtime configuration from environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_TURN_DELAY_MS` - Delay between turns in milliseconds (default: 1000)
    /// - `BATTLE_SEED` - Target sampling seed
    /// - `BATTLE_TURN_LIMIT` - Turn cap (default: unlimited)
    /// - `BATTLE_EVENT_CAPACITY` - Per-topic event buffer (default: 256)
    ///
    /// Unparseable values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read_u64 = |key: &str| lookup(key)?.trim().parse::<u64>().ok();
        let mut config = Self::default();

        if let Some(ms) = read_u64("BATTLE_TURN_DELAY_MS") {
            config.turn_delay = Duration::from_millis(ms);
        }
        if let Some(seed) = read_u64("BATTLE_SEED") {
            config.battle.seed = seed;
        }
        if let Some(limit) = read_u64("BATTLE_TURN_LIMIT") {
            config.battle.turn_limit = Some(limit);
        }
        if let Some(capacity) = read_u64("BATTLE_EVENT_CAPACITY") {
            config.event_capacity = usize::try_from(capacity).unwrap_or(usize::MAX).max(1);
        }

        config
    }

    #[must_use]
    pub fn with_battle(mut self, battle: BattleConfig) -> Self {
        self.battle = battle;
        self
    }

    #[must_use]
    pub fn with_turn_delay(mut self, delay: Duration) -> Self {
        self.turn_delay = delay;
        self
    }

    #[must_use]
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity.max(1);
        self
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            battle: BattleConfig::default(),
            turn_delay: Self::DEFAULT_TURN_DELAY,
            event_capacity: Self::DEFAULT_EVENT_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn reads_every_variable() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            ("BATTLE_TURN_DELAY_MS", "250"),
            ("BATTLE_SEED", "99"),
            ("BATTLE_TURN_LIMIT", "400"),
            ("BATTLE_EVENT_CAPACITY", "0"),
        ]));

        assert_eq!(config.turn_delay, Duration::from_millis(250));
        assert_eq!(config.battle.seed, 99);
        assert_eq!(config.battle.turn_limit, Some(400));
        assert_eq!(config.event_capacity, 1);
    }

    #[test]
    fn ignores_garbage() {
        let config = RuntimeConfig::from_lookup(lookup(&[("BATTLE_SEED", "soon")]));
        assert_eq!(config, RuntimeConfig::default());
    }
}
