//! Deterministic battle rules shared by the runtime and content tooling.
//!
//! `battle-core` defines the canonical combat model (combatants, abilities,
//! effect formulas, the utility evaluator and the speed-counter scheduler) and
//! exposes pure APIs that are reused by the runtime and offline tools.
//! All battle-scoped mutation flows through [`engine::BattleEngine`], and
//! supporting crates depend on the types re-exported here.
pub mod ability;
pub mod ai;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod events;
pub mod state;
pub mod stats;

pub use ability::{
    AbilityCatalog, AbilityDefinition, AbilityId, AbilityInstance, AiCommand, CatalogError,
    DamageType, EffectKind, EffectSpec, ResourceCosts, StatKind, TargetRule,
};
pub use ai::{ActionEvaluator, ChosenAction, Score};
pub use combat::{AbilityReport, AppliedEffect, EffectOutcome};
pub use config::BattleConfig;
pub use engine::{BattleEngine, BattleError, BattleResult, TurnOutcome, TurnReport};
pub use env::{PcgRng, RngOracle, compute_seed};
pub use error::{ErrorSeverity, GameError};
pub use events::{BattleEvent, CombatantChange};
pub use state::{Combatant, CombatantId, CombatantRecord, Roster, RosterEntry, Side, TurnState};
pub use stats::{Attributes, GrowthParameters, ResourceCurrent, ResourceKind, ResourceMaximums};
