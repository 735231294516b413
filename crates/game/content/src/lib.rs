//! Data-driven battle content and loaders.
//!
//! This crate houses static content and the tooling that turns it into
//! `battle-core` values:
//! - Ability presets (data-driven via RON)
//! - Battle configuration (data-driven via TOML)
//! - Random combatant generation
//! - A JSON roster store for persisted combatants
//!
//! Content is handed to the engine explicitly; nothing here is global.

pub mod combatants;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use combatants::{BASIC_ATTACK, CombatantFactory, EXTRA_ABILITIES};

#[cfg(feature = "loaders")]
pub use loaders::{AbilityCatalogLoader, ConfigLoader, ContentFactory, LoadResult, RosterStore};
