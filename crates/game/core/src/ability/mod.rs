//! Ability catalog, definitions and wielder-bound instances.
//!
//! Definitions are immutable and shared through [`AbilityCatalog`] as
//! `Arc<AbilityDefinition>`. Each combatant owns one [`AbilityInstance`] per
//! learned ability; the instance computes valid targets, projects expected
//! values for the evaluator and applies effects to the roster.
mod catalog;
mod definition;
mod effect;
mod error;
mod instance;
mod targeting;

pub use catalog::AbilityCatalog;
pub use definition::{AbilityDefinition, AbilityId, AiCommand, ResourceCosts};
pub use effect::{DamageType, EffectKind, EffectSpec, StatKind};
pub use error::CatalogError;
pub use instance::AbilityInstance;
pub use targeting::TargetRule;
