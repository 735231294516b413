//! Combat resolution system.
//!
//! Pure, deterministic formulas for damage, healing and resource effects plus
//! the report types the resolver produces. Nothing here mutates a combatant;
//! [`AbilityInstance::apply`](crate::AbilityInstance::apply) does that with the
//! numbers computed here.
//!
//! # Core Functions
//!
//! - `calculate_damage`: offense minus mitigation with a power-relative floor
//! - `calculate_heal`: heal amount before clamping by missing health
//! - `resource_amount`: integer part of a stamina/mana effect's power

pub mod damage;
pub mod result;

pub use damage::{calculate_damage, calculate_heal, resource_amount};
pub use result::{AbilityReport, AppliedEffect, EffectOutcome};
