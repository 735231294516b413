/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Counter points an actor spends per turn taken.
    pub turn_cost: f32,

    /// Number of random target subsets sampled for group-targeting abilities,
    /// in addition to the heuristic "best" subset.
    pub random_target_groups: usize,

    /// Base seed for target-subset sampling. Battles with equal inputs and
    /// equal seeds replay identically.
    pub seed: u64,

    /// Optional cap on scheduler iterations that produced an actor.
    pub turn_limit: Option<u64>,
}

impl BattleConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TURN_COST: f32 = 100.0;
    pub const DEFAULT_RANDOM_TARGET_GROUPS: usize = 5;
    pub const DEFAULT_SEED: u64 = 0x5EED;

    pub fn new() -> Self {
        Self {
            turn_cost: Self::DEFAULT_TURN_COST,
            random_target_groups: Self::DEFAULT_RANDOM_TARGET_GROUPS,
            seed: Self::DEFAULT_SEED,
            turn_limit: None,
        }
    }

    pub fn with_turn_cost(mut self, turn_cost: f32) -> Self {
        self.turn_cost = turn_cost;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_turn_limit(mut self, turn_limit: u64) -> Self {
        self.turn_limit = Some(turn_limit);
        self
    }

    pub fn with_random_target_groups(mut self, groups: usize) -> Self {
        self.random_target_groups = groups;
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
